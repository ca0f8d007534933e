//! Client error types.

use domain::{DomainError, OrderError};
use thiserror::Error;

/// Errors that can occur while talking to the shop backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Terminal input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storefront rejected the operation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The backend is unreachable (used by test doubles).
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl From<OrderError> for ClientError {
    fn from(e: OrderError) -> Self {
        ClientError::Domain(DomainError::Order(e))
    }
}

/// Convenience type alias for client results.
pub type Result<T> = std::result::Result<T, ClientError>;
