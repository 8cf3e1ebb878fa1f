//! # fi-values
//!
//! The Fluidinfo values protocol, built on the `fluidinfo-client` request
//! dispatcher.
//!
//! ## Features
//!
//! - **Query** - Read tag values from all objects matching a query, flattened
//!   to one record per object
//! - **Update / Tag** - Write tag values to objects matching a query, or to a
//!   single object by about value or id
//! - **Delete** - Remove tag values from matching objects
//! - **Objects** - Fetch a single object, create new objects
//! - **Recent** - Recent tagging activity on objects or by users
//!
//! ## Example
//!
//! ```rust,ignore
//! use fluidinfo_values::{Callbacks, FluidinfoClient, GetObjectOptions, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fluidinfo_values::Error> {
//!     let client = FluidinfoClient::new(SessionConfig::from_env()?)?;
//!
//!     // Await the result directly
//!     let reply = client
//!         .get_object(&GetObjectOptions::about("book:dune").select(["ntoll/rating"]))?
//!         .await?;
//!     if let Some(object) = reply.data {
//!         println!("{}: {:?}", object.id, object.get("ntoll/rating"));
//!     }
//!
//!     // Or hand it to callbacks
//!     let call = client.get_object(&GetObjectOptions::id("05eee31e-fbd1-43cc-9500-0469707a9bc3"))?;
//!     client
//!         .spawn(
//!             call,
//!             Callbacks::new()
//!                 .on_success(|reply| println!("{:?}", reply.data))
//!                 .on_error(|e| eprintln!("lookup failed: {e}")),
//!         )
//!         .await
//!         .ok();
//!
//!     Ok(())
//! }
//! ```

mod client;
mod options;
mod types;

pub use client::FluidinfoClient;

pub use options::{
    CreateObjectOptions, DeleteOptions, GetObjectOptions, QueryOptions, RecentOptions,
    TagOptions, UpdateOptions,
};

pub use types::{CreatedObject, OpaqueValue, QueryObject, RecentActivity, Reply, TagValue};

// Re-export commonly used types from fluidinfo-client
pub use fluidinfo_client::{
    block_on, ApiResponse, Callbacks, ClientConfig, Error, ErrorKind, Instance, Result,
    SessionConfig,
};
