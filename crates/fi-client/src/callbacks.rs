//! Callback delivery and blocking mode.

use std::future::Future;

use crate::error::{Error, ErrorKind, Result};

type SuccessFn<T> = Box<dyn FnOnce(T) + Send + 'static>;
type ErrorFn = Box<dyn FnOnce(Error) + Send + 'static>;

/// A success/error callback pair.
///
/// Each outcome is delivered to exactly one of the two callbacks. A missing
/// callback means the caller is not interested in that outcome; it is
/// dropped.
pub struct Callbacks<T> {
    on_success: Option<SuccessFn<T>>,
    on_error: Option<ErrorFn>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> std::fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl<T> Callbacks<T> {
    /// No callbacks; outcomes are discarded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the result of a successful call.
    pub fn on_success(mut self, f: impl FnOnce(T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Called with the error of a failed call. Status failures carry the
    /// normalized response, see [`Error::response`].
    pub fn on_error(mut self, f: impl FnOnce(Error) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Route an outcome to the matching callback.
    pub fn deliver(self, outcome: Result<T>) {
        match outcome {
            Ok(value) => {
                if let Some(f) = self.on_success {
                    f(value);
                }
            }
            Err(err) => {
                if let Some(f) = self.on_error {
                    f(err);
                }
            }
        }
    }
}

/// Drive a request future to completion on the calling thread.
///
/// This is the synchronous mode: the thread blocks until the transport
/// completes and the result is returned directly. It must not be called from
/// inside an async runtime; doing so returns a `Runtime` error instead of
/// blocking the executor.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(Error::new(ErrorKind::Runtime(
            "blocking call made from inside an async runtime".to_string(),
        )));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::with_source(ErrorKind::Runtime(e.to_string()), e))?;

    runtime.block_on(future)
}
