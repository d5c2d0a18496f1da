//! Error types for the interpretation client.

use thiserror::Error;

/// Result type for interpretation requests.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while talking to the interpretation service.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API request failed: {code} {reason}. {detail}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Canonical reason phrase.
        reason: String,
        /// Message extracted from the error body.
        detail: String,
    },

    /// The success body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The HTTP client could not be built.
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl OracleError {
    /// HTTP status code, if the service responded.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
