//! HTTP execution of request descriptors
//!
//! The executor is the only place that talks to the network. It sends a
//! descriptor, then converts whatever comes back into either the decoded JSON
//! body or a [`RequestError`].

use super::api_types::error_message;
use super::{ErrorKind, Operation, RequestDescriptor, RequestError};
use serde_json::Value;
use tracing::{Span, debug, instrument, warn};

/// Sends request descriptors and normalizes their outcome.
///
/// Cloning is cheap, clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor {
    client: reqwest::Client,
}

impl RequestExecutor {
    /// Creates an executor on top of the given HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Executes a request and returns the decoded JSON body.
    ///
    /// Every failure is reported as a [`RequestError`] tagged with `operation`:
    /// transport problems, non-success status codes (with the API's error
    /// message where available) and empty or malformed bodies. Nothing is
    /// retried.
    #[instrument(
        name = "giphy_request",
        skip(self, descriptor),
        fields(
            operation = %operation,
            http.url = %descriptor.url(),
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute(
        &self,
        operation: Operation,
        descriptor: &RequestDescriptor,
    ) -> Result<Value, RequestError> {
        let result = self.dispatch(operation, descriptor).await;

        match &result {
            Ok(_) => debug!("request succeeded"),
            Err(e) => warn!(error = %e, "request failed"),
        }

        result
    }

    async fn dispatch(
        &self,
        operation: Operation,
        descriptor: &RequestDescriptor,
    ) -> Result<Value, RequestError> {
        let fail = |kind| RequestError::new(operation, kind);

        let url = descriptor.to_url().map_err(|e| {
            fail(ErrorKind::InvalidUrl {
                url: descriptor.url().to_string(),
                reason: e.to_string(),
            })
        })?;

        debug!("dispatching request");

        // Strip the URL from transport errors, it carries the API key
        let response = self
            .client
            .request(descriptor.method().clone(), url)
            .send()
            .await
            .map_err(|e| {
                fail(ErrorKind::Transport {
                    reason: e.without_url().to_string(),
                })
            })?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.text().await.map_err(|e| {
            fail(ErrorKind::Transport {
                reason: e.without_url().to_string(),
            })
        })?;

        if !status.is_success() {
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string));
            return Err(fail(ErrorKind::Status {
                status: status.as_u16(),
                message,
            }));
        }

        if body.trim().is_empty() {
            return Err(fail(ErrorKind::Decode {
                reason: "empty response body".to_string(),
            }));
        }

        serde_json::from_str(&body).map_err(|e| {
            fail(ErrorKind::Decode {
                reason: e.to_string(),
            })
        })
    }
}
