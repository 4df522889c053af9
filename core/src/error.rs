use thiserror::Error;

use crate::outline::OutlineError;
use crate::store::StoreError;

/// One kind per pipeline stage. Any of these aborts the current request;
/// nothing is retried.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("please enter a lesson topic")]
    EmptyInput,

    #[error("model invocation failed: {0}")]
    Model(String),

    #[error(transparent)]
    Parse(#[from] OutlineError),

    #[error("deck rendering failed: {0}")]
    Render(String),

    #[error("storage credentials missing or rejected: {0}")]
    StorageAuth(String),

    #[error("upload failed: {0}")]
    StorageTransfer(String),
}

impl From<StoreError> for GenerateError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Auth(message) => GenerateError::StorageAuth(message),
            StoreError::Transfer(message) => GenerateError::StorageTransfer(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
