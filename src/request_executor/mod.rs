/// Request construction and execution for the GIPHY API.
///
/// This module provides the request descriptor handed from the client to the
/// executor, the single normalized error type every failure is converted into,
/// and the executor itself together with its two calling conventions.
mod api_types;
mod executor;
mod pending;

pub use executor::RequestExecutor;
pub use pending::PendingRequest;

use reqwest::Method;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Logical operations offered by the client, used to tag requests and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    Trending,
    Translate,
    Random,
    GifById,
    GifsByIds,
    Categories,
    Subcategories,
    GifsByCategory,
    TermSuggestions,
}

impl Operation {
    /// Stable name of the operation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Trending => "trending",
            Operation::Translate => "translate",
            Operation::Random => "random",
            Operation::GifById => "gif_by_id",
            Operation::GifsByIds => "gifs_by_ids",
            Operation::Categories => "categories",
            Operation::Subcategories => "subcategories",
            Operation::GifsByCategory => "gifs_by_category",
            Operation::TermSuggestions => "term_suggestions",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reason a request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The request never produced a response (DNS, connection reset, ...)
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    /// The API answered with a non-success status code
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The response body was empty or not valid JSON
    #[error("Failed to decode response body: {reason}")]
    Decode { reason: String },

    /// The assembled URL could not be parsed
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A completion callback was registered outside of a tokio runtime
    #[error("No async runtime available to dispatch the request")]
    NoRuntime,

    /// The runtime shut down before the request settled
    #[error("Request was dropped before it completed")]
    Cancelled,
}

/// Normalized error returned by every operation.
///
/// Carries the operation that failed and the reason. Transport errors are
/// rendered into text, the underlying `reqwest` error is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} request failed: {kind}")]
pub struct RequestError {
    operation: Operation,
    kind: ErrorKind,
}

impl RequestError {
    pub(crate) fn new(operation: Operation, kind: ErrorKind) -> Self {
        Self { operation, kind }
    }

    /// The operation the failed request belonged to
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The reason for the failure
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// HTTP status code, if the API responded with one
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message text supplied by the API, if any
    pub fn message(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// A fully assembled outgoing request.
///
/// Built fresh for every call. The query always contains the API key that was
/// configured at the moment the descriptor was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Creates a GET request descriptor
    pub(crate) fn get(url: String, query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::GET,
            url,
            query,
        }
    }

    /// HTTP method of the request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL without the query string
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters in the order they are sent
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the value of the first query parameter with the given name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parses the target URL and appends the query string
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(&self.url, &self.query)
    }
}
