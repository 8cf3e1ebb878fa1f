//! Request descriptions: what the caller asks for, and what goes on the wire.

use bytes::Bytes;

use crate::credentials::Credentials;
use crate::security::url as url_security;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Head => reqwest::Method::HEAD,
        }
    }

    /// The verb as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Head => "HEAD",
        }
    }

    /// GET, DELETE and HEAD never carry a payload.
    pub fn allows_body(&self) -> bool {
        matches!(self, RequestMethod::Post | RequestMethod::Put)
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path of a resource relative to the session base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPath {
    /// Used as given; the caller is responsible for any escaping.
    Raw(String),
    /// Each segment is percent-encoded independently, then joined with `/`.
    Segments(Vec<String>),
}

impl ApiPath {
    /// The encoded path, without a leading slash.
    pub fn encode(&self) -> String {
        match self {
            ApiPath::Raw(path) => path.trim_start_matches('/').to_string(),
            ApiPath::Segments(segments) => url_security::encode_path(segments),
        }
    }
}

impl Default for ApiPath {
    fn default() -> Self {
        ApiPath::Raw(String::new())
    }
}

impl From<&str> for ApiPath {
    fn from(path: &str) -> Self {
        ApiPath::Raw(path.to_string())
    }
}

impl From<String> for ApiPath {
    fn from(path: String) -> Self {
        ApiPath::Raw(path)
    }
}

impl From<Vec<String>> for ApiPath {
    fn from(segments: Vec<String>) -> Self {
        ApiPath::Segments(segments)
    }
}

/// Ordered query arguments.
///
/// A name may appear several times; each occurrence becomes its own
/// `name=value` pair, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pairs: Vec<(String, String)>,
}

impl QueryArgs {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single `name=value` pair.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Append one pair per element of `values`, preserving their order.
    pub fn repeated<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        for value in values {
            self.pairs.push((name.clone(), value.into()));
        }
        self
    }

    /// Append a pair only when a value is present.
    pub fn optional(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.arg(name, value),
            None => self,
        }
    }

    /// Returns true if no arguments have been added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The arguments in wire order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Values recorded for `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `?`-prefixed, percent-encoded query string; empty when there are
    /// no arguments.
    pub fn to_query_string(&self) -> String {
        url_security::encode_args(&self.pairs)
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured value, serialized as JSON when sent with a JSON content type.
    Json(serde_json::Value),
    /// Text sent verbatim.
    Text(String),
    /// Bytes sent verbatim (opaque tag values).
    Bytes(Bytes),
}

/// Caller-side description of a single API call.
///
/// The method is chosen by the [`Session`](crate::Session) entry point
/// that receives the options; the options themselves are never modified.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Resource path relative to the base URL.
    pub path: ApiPath,
    /// Query arguments.
    pub args: QueryArgs,
    /// Optional payload.
    pub body: Option<Payload>,
    /// Explicit Content-Type, required for opaque tag values.
    pub content_type: Option<String>,
    /// Per-call Basic credentials that take precedence over the session's.
    pub credentials: Option<Credentials>,
}

impl RequestOptions {
    /// Options for a raw (already escaped) path.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: ApiPath::Raw(path.into()),
            ..Self::default()
        }
    }

    /// Options for a path given as segments to be encoded individually.
    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: ApiPath::Segments(segments.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Replace the query arguments.
    pub fn args(mut self, args: QueryArgs) -> Self {
        self.args = args;
        self
    }

    /// Set a structured JSON payload.
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Some(Payload::Json(value));
        self
    }

    /// Set a text payload sent verbatim.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.body = Some(Payload::Text(text.into()));
        self
    }

    /// Set a binary payload sent verbatim.
    pub fn bytes(mut self, bytes: impl Into<Bytes>) -> Self {
        self.body = Some(Payload::Bytes(bytes.into()));
        self
    }

    /// Set an explicit Content-Type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Override the session credentials for this call only.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// A fully specified request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl ResolvedRequest {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as UTF-8 text, if present and valid.
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}
