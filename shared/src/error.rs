//! Error type for the pure supply-chain computations

use thiserror::Error;

/// Errors raised by the shared computations.
///
/// Every variant is recoverable: the caller fixes the input and retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl CoreError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Field name for input errors
    pub fn field(&self) -> Option<&str> {
        match self {
            CoreError::InvalidInput { field, .. } => Some(field),
            CoreError::InvalidTransition { .. } => None,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
