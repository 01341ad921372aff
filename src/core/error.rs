use thiserror::Error;

use crate::storage::BackendError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrudError {
    #[error("'{0}' is not a valid operation name")]
    InvalidOperationName(String),
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Database error [{code}]: {message}")]
    Database { code: i32, message: String },
}

impl From<BackendError> for CrudError {
    fn from(err: BackendError) -> Self {
        Self::Database {
            code: err.code,
            message: err.message,
        }
    }
}
