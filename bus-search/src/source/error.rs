//! Data source error types.

/// Errors raised while talking to the trips table.
///
/// Both variants end the current render cycle. An empty result set is not an
/// error and never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached or opened
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    /// A query was rejected or failed while running
    #[error("query failed: {0}")]
    Query(String),
}

impl SourceError {
    /// Whether this error means no connection could be made at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceError::Unavailable(_))
    }
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => SourceError::Unavailable(err.to_string()),
            _ => SourceError::Query(err.to_string()),
        }
    }
}
