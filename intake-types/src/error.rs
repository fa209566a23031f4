use crate::Field;

/// Error type for writing answers.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' cannot change while the survey is being submitted")]
    Locked(Field),

    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: Field,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Error type for remote store operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The backend answered and refused the request.
    #[error("Remote rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer (DNS, connection, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Anything else that went wrong while talking to the backend.
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl RemoteError {
    /// Create an unexpected error from any error type.
    pub fn unexpected(err: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(err.into())
    }

    /// Create a rejection with the given status and message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is something other than a clean refusal or network failure.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Unexpected(_))
    }
}
