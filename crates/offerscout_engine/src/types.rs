use offerscout_core::{Offer, SearchFailure};
use thiserror::Error;

/// Events flowing from the engine back to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// One offer record completed parsing in the stream.
    OfferReceived { generation: u64, offer: Offer },
    /// The offer stream ended normally.
    SearchCompleted { generation: u64 },
    /// The offers request failed before or during streaming.
    SearchFailed { generation: u64, error: SearchError },
    /// The share persistence call finished.
    ShareCompleted {
        epoch: u64,
        result: Result<String, ShareError>,
    },
}

/// Failure of the offers query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("address not found")]
    AddressNotFound,
    #[error("offers backend error: {0}")]
    Upstream(String),
    #[error("offers request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

impl From<SearchError> for SearchFailure {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::AddressNotFound => SearchFailure::AddressNotFound,
            SearchError::Upstream(message) => SearchFailure::Upstream(Some(message)),
            SearchError::Timeout | SearchError::Network(_) => SearchFailure::Upstream(None),
        }
    }
}

/// Failure of the share persistence call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("share backend error: {0}")]
    Backend(String),
    #[error("network error: {0}")]
    Network(String),
}
