use thiserror::Error;

/// Crate-wide result type
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected before training starts, or when the candidate pool runs dry
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("index ({state}, {action}) out of range for a {states}x{actions} value table")]
    IndexOutOfRange {
        state: usize,
        action: usize,
        states: usize,
        actions: usize,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure at the route supply boundary
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read route source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse route document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed route document: {0}")]
    Malformed(String),
}

/// A reward could not be computed for a transition touching `route`
///
/// The trainer drops `route` from the candidate pool and keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("reward unavailable for route {route}: {reason}")]
pub struct RewardError {
    pub route: usize,
    pub reason: String,
}

impl RewardError {
    pub fn new(route: usize, reason: impl Into<String>) -> Self {
        Self {
            route,
            reason: reason.into(),
        }
    }
}
