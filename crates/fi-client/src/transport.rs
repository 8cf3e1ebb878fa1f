//! The transport seam: one resolved request in, one raw response out.

use std::future::Future;

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestMethod, ResolvedRequest};

/// Identifies the exchange that produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportHandle {
    /// Method of the request that was sent.
    pub method: RequestMethod,
    /// Final URL of the exchange (after redirects, if the transport follows
    /// them).
    pub url: String,
}

impl TransportHandle {
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }
}

/// A fully buffered response as reported by a transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// Header names as received.
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub handle: TransportHandle,
}

/// Sends resolved requests.
///
/// Implementations issue exactly one HTTP exchange per call and never retry.
pub trait Transport: Send + Sync + 'static {
    /// Send the request and buffer the whole response.
    fn send(&self, request: &ResolvedRequest) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build the underlying HTTP client.
    ///
    /// Fails with `Config` when the client cannot be constructed in this
    /// environment.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.body(body.clone());
        }

        if self.config.enable_tracing {
            debug!(method = %request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let url = response.url().to_string();
        let headers = response.headers().iter().map(header_entry).collect();
        let body = response.bytes().await?;

        if self.config.enable_tracing {
            let status = status.as_u16();
            if status < 300 || status == 304 {
                debug!(status, bytes = body.len(), "Response received");
            } else {
                info!(status, bytes = body.len(), "Non-success response");
            }
        }

        Ok(RawResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
            handle: TransportHandle::new(request.method, url),
        })
    }
}

/// Header values that are not visible ASCII are decoded lossily, never dropped.
fn header_entry((name, value): (&HeaderName, &HeaderValue)) -> (String, String) {
    let value = match value.to_str() {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    };
    (name.as_str().to_string(), value)
}
