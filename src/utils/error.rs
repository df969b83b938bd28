use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error")]
    StorageError(#[from] std::io::Error),

    #[error("Serialization error")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::SerializationError(_) => "SERIALIZATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    #[cfg(test)]
    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    pub fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::InternalError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::StorageError(e) => {
                error!(error = ?e, "Storage error");
            }
            AppError::SerializationError(e) => {
                error!(error = ?e, "Serialization error");
            }
        }
    }

    /// Message safe to show to the user; storage internals stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::InternalError(msg) => msg.clone(),
            AppError::StorageError(_) => "A storage error occurred".to_string(),
            AppError::SerializationError(_) => "Stored data could not be written".to_string(),
        }
    }
}
