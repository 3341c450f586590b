//! Error types for the service boundary.

use thiserror::Error;

use vibe_ledger::LedgerError;

/// Errors a client can see. Ledger errors pass through verbatim: they
/// are terminal for the call, never retried by the boundary, and the
/// caller decides what to do next.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The ledger rejected the call; state is untouched.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// The dispatch task is gone or its queue is closed.
    #[error("service unavailable: {0}")]
    Channel(String),

    /// A response variant that does not match the request method.
    #[error("unexpected response variant")]
    UnexpectedResponse,

    /// Wire encoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<postcard::Error> for ServiceError {
    fn from(e: postcard::Error) -> Self {
        ServiceError::Serialization(e.to_string())
    }
}

/// Result type alias for boundary operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
