//! Fluidinfo values client.
//!
//! This client wraps a [`Session`] from `fluidinfo-client` and implements
//! the query / update / tag / delete / object / recent-activity protocol on
//! top of its request dispatcher.

use std::future::Future;

use fluidinfo_client::{Callbacks, ClientConfig, HttpTransport, Result, Session, SessionConfig, Transport};
use tokio::task::JoinHandle;

mod objects;
mod query;
mod recent;
mod update;

/// Fluidinfo values client.
///
/// Each operation validates its options synchronously and returns a future
/// that performs exactly one request:
/// - `query` / `get_object` read tag values through `GET /values`
/// - `update` / `tag` write them through `PUT /values`
/// - `del` removes them through `DELETE /values`
/// - `create_object` and `recent` use the objects and recent-activity
///   endpoints
///
/// # Example
///
/// ```rust,ignore
/// use fluidinfo_values::{FluidinfoClient, QueryOptions, TagOptions};
///
/// let client = FluidinfoClient::new(SessionConfig::from_env()?)?;
///
/// let books = client
///     .query(&QueryOptions::new("has ntoll/rating > 7").select(["ntoll/rating", "fluiddb/about"]))?
///     .await?;
///
/// client
///     .tag(&TagOptions::about("book:dune").value("ntoll/rating", 10))?
///     .await?;
/// ```
pub struct FluidinfoClient<T = HttpTransport> {
    session: Session<T>,
}

impl<T> Clone for FluidinfoClient<T> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<T> std::fmt::Debug for FluidinfoClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluidinfoClient")
            .field("session", &self.session)
            .finish()
    }
}

impl FluidinfoClient<HttpTransport> {
    /// Create a client over a new session.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(Self::from_session(Session::new(config)?))
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(config: SessionConfig, client_config: ClientConfig) -> Result<Self> {
        Ok(Self::from_session(Session::with_client_config(
            config,
            client_config,
        )?))
    }
}

impl<T: Transport> FluidinfoClient<T> {
    /// Create a client from an existing session.
    pub fn from_session(session: Session<T>) -> Self {
        Self { session }
    }

    /// Get the underlying session.
    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    /// Run a prepared operation in the background, delivering its outcome
    /// to exactly one of the callbacks.
    pub fn spawn<F, R>(&self, call: F, callbacks: Callbacks<R>) -> JoinHandle<()>
    where
        F: Future<Output = Result<R>> + Send + 'static,
        R: Send + 'static,
    {
        self.session.spawn(call, callbacks)
    }
}
