//! # fi-client
//!
//! Core HTTP client infrastructure for the Fluidinfo API.
//!
//! This crate turns a high-level call description into a fully specified
//! HTTP request, sends it through a [`Transport`], and normalizes the raw
//! response into an [`ApiResponse`]:
//! - Per-segment URL encoding and repeated query arguments
//! - Content-Type inference for tag-value writes
//! - Basic / OAuth2 credential selection
//! - Response header normalization and JSON sniffing
//! - Callback delivery and an opt-in blocking mode
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (fi-values: query, update, tag, objects, recent)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                              │
//! │  - Holds base URL + credentials + transport                 │
//! │  - get / post / put / delete / head                         │
//! │  - Resolves URL, Content-Type and Authorization headers     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Transport (HttpTransport)                  │
//! │  - One outbound request per call, no retries                │
//! │  - Raw status / headers / body handed to the normalizer     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fluidinfo_client::{Callbacks, RequestOptions, Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fluidinfo_client::Error> {
//!     let session = Session::new(
//!         SessionConfig::builder()
//!             .instance_name("sandbox")?
//!             .basic_auth("ntoll", "secret")
//!             .build(),
//!     )?;
//!
//!     // Future style: validation errors surface from the first `?`,
//!     // transport and status errors from the second.
//!     let response = session
//!         .get(&RequestOptions::segments(["namespaces", "ntoll"]))?
//!         .await?;
//!     println!("{}", response.status);
//!
//!     // Callback style
//!     let call = session.post(
//!         &RequestOptions::path("namespaces/ntoll")
//!             .json(serde_json::json!({"name": "books", "description": "My books"})),
//!     )?;
//!     session.spawn(
//!         call,
//!         Callbacks::new()
//!             .on_success(|r| println!("created: {}", r.status))
//!             .on_error(|e| eprintln!("failed: {e}")),
//!     );
//!
//!     Ok(())
//! }
//! ```

mod callbacks;
mod config;
mod credentials;
mod error;
mod mime;
mod request;
mod response;
pub mod security;
mod session;
mod transport;

pub use callbacks::{block_on, Callbacks};
pub use config::{ClientConfig, ClientConfigBuilder, Instance, SessionConfig, SessionConfigBuilder};
pub use credentials::{authorization_headers, AuthScheme, Credentials};
pub use error::{Error, ErrorKind, Result};
pub use mime::{detect_content_type, is_json_content_type, is_primitive, ContentTypeQuery};
pub use request::{ApiPath, Payload, QueryArgs, RequestMethod, RequestOptions, ResolvedRequest};
pub use response::{is_success_status, ApiResponse, ResponseData};
pub use session::Session;
pub use transport::{HttpTransport, RawResponse, Transport, TransportHandle};

/// Base URL of the main Fluidinfo instance.
pub const MAIN_INSTANCE_URL: &str = "https://fluiddb.fluidinfo.com/";

/// Base URL of the sandbox Fluidinfo instance.
pub const SANDBOX_INSTANCE_URL: &str = "https://sandbox.fluidinfo.com/";

/// MIME type of primitive tag values.
pub const VALUE_CONTENT_TYPE: &str = "application/vnd.fluiddb.value+json";

/// MIME type of the structured JSON protocol.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Header carrying an OAuth2 access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-FluidDB-Access-Token";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("fluidinfo-rs/", env!("CARGO_PKG_VERSION"));
