use thiserror::Error;

use crate::ids::SentinelId;

/// Failure of a single page request.
///
/// Every variant is recoverable by asking for the page again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListSourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("failed to decode page: {0}")]
    Decode(String),

    #[error("no endpoint configured for collection `{0}`")]
    UnknownCollection(String),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisibilityError {
    #[error("sentinel {0} is already observed")]
    AlreadyObserved(SentinelId),

    #[error("visibility source unavailable: {0}")]
    Unavailable(String),
}
