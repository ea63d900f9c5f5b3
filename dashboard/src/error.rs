use thiserror::Error;

/// Failures of a single dashboard submission.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A lookup returned zero items.
    #[error("Error {operation}: {what} not found")]
    NotFound {
        operation: &'static str,
        what: &'static str,
    },

    /// Transport, status or decoding failure of one API call.
    #[error("Error {operation}: {message}")]
    Fetch {
        operation: &'static str,
        message: String,
    },

    #[error("malformed ISO 8601 duration: {0:?}")]
    MalformedDuration(String),
}

impl DashboardError {
    pub fn not_found(operation: &'static str, what: &'static str) -> Self {
        DashboardError::NotFound { operation, what }
    }

    pub fn fetch(operation: &'static str, err: impl std::fmt::Display) -> Self {
        DashboardError::Fetch {
            operation,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
