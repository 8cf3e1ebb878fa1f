//! Response normalization.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};
use crate::mime::is_json_content_type;
use crate::transport::{RawResponse, TransportHandle};

/// Response body after content sniffing.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// Parsed JSON (for `application/json` and the tag-value MIME type).
    Json(Value),
    /// The body text, unparsed.
    Text(String),
}

impl ResponseData {
    /// The parsed JSON value, if the body was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    /// The text, if the body was not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Json(_) => None,
            ResponseData::Text(text) => Some(text),
        }
    }
}

/// Normalized result of one API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    /// Header names are lower-cased.
    pub headers: BTreeMap<String, String>,
    /// The body bytes exactly as received.
    pub body: Bytes,
    /// The body as text, with invalid UTF-8 replaced.
    pub raw_body: String,
    pub data: ResponseData,
    pub handle: TransportHandle,
}

/// Returns true for statuses delivered as success: 1–299 and 304.
pub fn is_success_status(status: u16) -> bool {
    status > 0 && (status < 300 || status == 304)
}

impl ApiResponse {
    /// Normalize a raw transport response.
    ///
    /// A body whose Content-Type claims JSON but does not parse is an error;
    /// the partially built response is attached to it.
    pub fn from_raw(raw: RawResponse) -> Result<Self> {
        let mut headers = BTreeMap::new();
        for (name, value) in raw.headers {
            headers.entry(name.to_lowercase()).or_insert(value);
        }

        let claims_json = headers
            .get("content-type")
            .is_some_and(|ct| is_json_content_type(ct));

        let raw_body = String::from_utf8_lossy(&raw.body).into_owned();
        let mut response = ApiResponse {
            status: raw.status,
            status_text: raw.status_text,
            headers,
            body: raw.body,
            data: ResponseData::Text(raw_body.clone()),
            raw_body,
            handle: raw.handle,
        };

        if claims_json && !response.raw_body.trim().is_empty() {
            match serde_json::from_slice(&response.body) {
                Ok(value) => response.data = ResponseData::Json(value),
                Err(e) => {
                    return Err(Error::with_source(ErrorKind::Json(e.to_string()), e)
                        .with_response(response));
                }
            }
        }

        Ok(response)
    }

    /// Returns true if the status is delivered as success.
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the Location header.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Error class reported by the service for failed requests.
    pub fn error_class(&self) -> Option<&str> {
        self.header("x-fluiddb-error-class")
    }

    /// The parsed JSON body, if any.
    pub fn json(&self) -> Option<&Value> {
        self.data.as_json()
    }

    /// Deserialize the JSON body into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.data {
            ResponseData::Json(value) => Ok(T::deserialize(value)?),
            ResponseData::Text(_) => Err(Error::new(ErrorKind::Json(format!(
                "expected a JSON body, got {}",
                self.content_type().unwrap_or("no content type")
            )))),
        }
    }

    /// Route the response by status: success statuses pass through, all
    /// others become an `Http` error carrying the response.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::status(self))
        }
    }
}
