use sportsdb_api::client::ApiError;
use thiserror::Error;

/// Result of every fallible repository and query operation.
pub type Outcome<T> = Result<T, SportsError>;

#[derive(Debug, Error)]
pub enum SportsError {
    /// Connectivity, HTTP status or decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] ApiError),

    /// Well-formed response without a team list.
    #[error("No data for this league: {league}")]
    NoDataForLeague { league: String },

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<tokio::task::JoinError> for SportsError {
    fn from(err: tokio::task::JoinError) -> Self {
        SportsError::Unknown(format!("fetch task aborted: {err}"))
    }
}
