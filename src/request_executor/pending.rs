//! Prepared requests and their calling conventions
//!
//! A [`PendingRequest`] is what every client operation returns. It can be
//! awaited directly, or handed a completion callback that is invoked once the
//! request settles. Both paths run the same future.

use super::{ErrorKind, Operation, RequestDescriptor, RequestError, RequestExecutor};
use serde_json::Value;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use tracing::warn;

/// A request that has been assembled but not yet sent.
///
/// Nothing happens until the request is awaited, sent or given a callback.
#[derive(Debug)]
#[must_use = "requests do nothing unless awaited or given a completion callback"]
pub struct PendingRequest {
    operation: Operation,
    descriptor: RequestDescriptor,
    executor: RequestExecutor,
}

impl PendingRequest {
    pub(crate) fn new(
        operation: Operation,
        descriptor: RequestDescriptor,
        executor: RequestExecutor,
    ) -> Self {
        Self {
            operation,
            descriptor,
            executor,
        }
    }

    /// The operation this request performs
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The assembled request that will be sent
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Sends the request and waits for the decoded response body
    pub async fn send(self) -> Result<Value, RequestError> {
        self.executor
            .execute(self.operation, &self.descriptor)
            .await
    }

    /// Sends the request in the background and reports the outcome to `callback`.
    ///
    /// The request is spawned on the current tokio runtime and this method
    /// returns immediately. The callback is invoked exactly once. Without a
    /// runtime the callback receives an [`ErrorKind::NoRuntime`] error right
    /// away; if the runtime shuts down before the request settles it receives
    /// [`ErrorKind::Cancelled`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use giphy_client::{GiphyClient, MediaType, SearchParams};
    ///
    /// # async fn demo() {
    /// let client = GiphyClient::new("my-api-key");
    /// client
    ///     .search(MediaType::Gifs, &SearchParams::new("cats"))
    ///     .on_complete(|result| match result {
    ///         Ok(body) => println!("{}", body["data"]),
    ///         Err(e) => eprintln!("{}", e),
    ///     });
    /// # }
    /// ```
    pub fn on_complete<F>(self, callback: F)
    where
        F: FnOnce(Result<Value, RequestError>) + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let guard = CallbackGuard::new(self.operation, callback);
                handle.spawn(async move {
                    let result = self.send().await;
                    guard.complete(result);
                });
            }
            Err(_) => {
                warn!(operation = %self.operation, "no tokio runtime, request not sent");
                callback(Err(RequestError::new(self.operation, ErrorKind::NoRuntime)));
            }
        }
    }
}

/// Owns a completion callback until it has been invoked.
///
/// Dropping the guard with the callback still present (the spawned task was
/// torn down mid-flight) reports [`ErrorKind::Cancelled`] instead.
struct CallbackGuard<F>
where
    F: FnOnce(Result<Value, RequestError>),
{
    operation: Operation,
    callback: Option<F>,
}

impl<F> CallbackGuard<F>
where
    F: FnOnce(Result<Value, RequestError>),
{
    fn new(operation: Operation, callback: F) -> Self {
        Self {
            operation,
            callback: Some(callback),
        }
    }

    fn complete(mut self, result: Result<Value, RequestError>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<F> Drop for CallbackGuard<F>
where
    F: FnOnce(Result<Value, RequestError>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            warn!(operation = %self.operation, "request dropped before completion");
            callback(Err(RequestError::new(self.operation, ErrorKind::Cancelled)));
        }
    }
}

impl IntoFuture for PendingRequest {
    type Output = Result<Value, RequestError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}
