//! # fluidinfo
//!
//! A client library for the Fluidinfo tag-based data store.
//!
//! ## Security
//!
//! - Passwords and access tokens are redacted in Debug output
//! - Tracing records methods and paths, never credential headers
//! - About values embedded in object queries are escaped
//!
//! ## Crates
//!
//! - **fluidinfo-client** - Session, request construction, credentials,
//!   response normalization, callbacks and blocking mode
//! - **fluidinfo-values** - Query, update, tag, delete, objects and recent
//!   activity
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fluidinfo::{FluidinfoClient, QueryOptions, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fluidinfo::Error> {
//!     let client = FluidinfoClient::new(
//!         SessionConfig::builder()
//!             .instance_name("sandbox")?
//!             .basic_auth("ntoll", "secret")
//!             .build(),
//!     )?;
//!
//!     let reply = client
//!         .query(&QueryOptions::new("has ntoll/rating > 7").select(["fluiddb/about"]))?
//!         .await?;
//!
//!     for object in reply.data {
//!         println!("{} {:?}", object.id, object.get("fluiddb/about"));
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use fluidinfo_client as client;
#[cfg(feature = "values")]
pub use fluidinfo_values as values;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use fluidinfo_client::{
    block_on, ApiResponse, Callbacks, ClientConfig, Error, ErrorKind, Instance, RequestOptions,
    Result, Session, SessionConfig,
};
#[cfg(feature = "values")]
pub use fluidinfo_values::{
    CreateObjectOptions, DeleteOptions, FluidinfoClient, GetObjectOptions, QueryObject,
    QueryOptions, RecentOptions, TagOptions, TagValue, UpdateOptions,
};
