//! Fluidinfo session: request dispatch over a transport.
//!
//! ## Security
//!
//! - Basic credentials and access tokens are redacted in Debug output
//! - Request spans record method and path only, never headers

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, Instrument};

use crate::callbacks::Callbacks;
use crate::config::{validate_base_url, ClientConfig, SessionConfig};
use crate::credentials::AuthScheme;
use crate::error::Result;
use crate::mime::{detect_content_type, is_json_content_type, ContentTypeQuery};
use crate::request::{ApiPath, Payload, QueryArgs, RequestMethod, RequestOptions, ResolvedRequest};
use crate::response::ApiResponse;
use crate::transport::{HttpTransport, Transport};

/// A session with a Fluidinfo instance.
///
/// The session is immutable once built: base URL, credentials and transport
/// are shared read-only by every call issued through it, so concurrent calls
/// cannot interfere. Cloning is cheap.
///
/// Every entry point validates and resolves the request synchronously and
/// returns a future that performs exactly one HTTP exchange:
///
/// ```rust,ignore
/// let response = session.get(&RequestOptions::path("users/ntoll"))?.await?;
/// ```
pub struct Session<T = HttpTransport> {
    base_url: String,
    username: Option<String>,
    basic_token: Option<String>,
    access_token: Option<String>,
    transport: Arc<T>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            basic_token: self.basic_token.clone(),
            access_token: self.access_token.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("basic_token", &self.basic_token.as_ref().map(|_| "[REDACTED]"))
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Session<HttpTransport> {
    /// Open a session using the default HTTP transport.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Open a session with custom HTTP configuration.
    pub fn with_client_config(config: SessionConfig, client_config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(client_config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Session<T> {
    /// Open a session over the given transport.
    pub fn with_transport(config: SessionConfig, transport: T) -> Result<Self> {
        let base_url = config.instance.base_url().to_string();
        validate_base_url(&base_url)?;

        Ok(Self {
            base_url,
            username: config.credentials.as_ref().map(|c| c.username().to_string()),
            basic_token: config.credentials.as_ref().map(|c| c.basic_token()),
            access_token: config.access_token,
            transport: Arc::new(transport),
        })
    }

    /// The base URL, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The signed-in username, when Basic credentials are configured.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns true if the session holds Basic credentials or an OAuth2
    /// access token.
    pub fn has_credentials(&self) -> bool {
        self.basic_token.is_some() || self.access_token.is_some()
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for a path and its query arguments.
    pub fn url(&self, path: &ApiPath, args: &QueryArgs) -> String {
        format!("{}{}{}", self.base_url, path.encode(), args.to_query_string())
    }

    /// Turn call options into a fully specified request.
    ///
    /// Fails with a `Value` error when a tag-value PUT has no detectable
    /// Content-Type.
    pub fn resolve(&self, method: RequestMethod, options: &RequestOptions) -> Result<ResolvedRequest> {
        let path = options.path.encode();
        let body = if method.allows_body() {
            options.body.as_ref()
        } else {
            None
        };

        let content_type = detect_content_type(&ContentTypeQuery {
            method,
            path: &path,
            explicit: options.content_type.as_deref(),
            body,
        })?;

        let mut headers = AuthScheme::select(
            options.credentials.as_ref(),
            self.basic_token.as_deref(),
            self.access_token.as_deref(),
        )
        .headers();

        let body = match body {
            Some(payload) => Some(serialize_body(payload, content_type.as_deref())?),
            None => None,
        };

        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type));
        }

        Ok(ResolvedRequest {
            method,
            url: self.url(&options.path, &options.args),
            headers,
            body,
        })
    }

    /// Prepare a call with the given method.
    ///
    /// The caller's options are only read. Precondition failures are
    /// returned immediately; the returned future sends exactly one request
    /// and yields the normalized response, routed by status.
    pub fn request(
        &self,
        method: RequestMethod,
        options: &RequestOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        let resolved = self.resolve(method, options)?;
        let transport = Arc::clone(&self.transport);
        let span = info_span!("fluidinfo_request", method = %method, path = %options.path.encode());

        Ok(async move {
            let raw = transport.send(&resolved).await?;
            let response = ApiResponse::from_raw(raw)?;
            debug!(status = response.status, "Request completed");
            response.into_result()
        }
        .instrument(span))
    }

    /// Prepare a GET. Any payload in `options` is ignored.
    pub fn get(
        &self,
        options: &RequestOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        self.request(RequestMethod::Get, options)
    }

    /// Prepare a POST.
    pub fn post(
        &self,
        options: &RequestOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        self.request(RequestMethod::Post, options)
    }

    /// Prepare a PUT.
    pub fn put(
        &self,
        options: &RequestOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        self.request(RequestMethod::Put, options)
    }

    /// Prepare a DELETE. Any payload in `options` is ignored.
    pub fn delete(
        &self,
        options: &RequestOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        self.request(RequestMethod::Delete, options)
    }

    /// Prepare a HEAD. Any payload in `options` is ignored.
    pub fn head(
        &self,
        options: &RequestOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        self.request(RequestMethod::Head, options)
    }

    /// Run a prepared call in the background and deliver its outcome to
    /// exactly one of the callbacks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, R>(&self, call: F, callbacks: Callbacks<R>) -> JoinHandle<()>
    where
        F: Future<Output = Result<R>> + Send + 'static,
        R: Send + 'static,
    {
        tokio::spawn(async move { callbacks.deliver(call.await) })
    }
}

/// Serialize a payload for the wire.
///
/// JSON payloads under a JSON content type are serialized with serde_json,
/// so a primitive string tag value is sent quoted. Under any other content
/// type a JSON string is sent as its bare text.
fn serialize_body(payload: &Payload, content_type: Option<&str>) -> Result<Bytes> {
    let json_body = content_type.is_some_and(is_json_content_type);
    let bytes = match payload {
        Payload::Json(Value::String(text)) if !json_body => Bytes::from(text.clone()),
        Payload::Json(value) => Bytes::from(serde_json::to_vec(value)?),
        Payload::Text(text) => Bytes::from(text.clone()),
        Payload::Bytes(bytes) => bytes.clone(),
    };
    Ok(bytes)
}
