use thiserror::Error;

use super::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed input (invalid URL, token outside the alphabet)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token generation could not find a free token within the retry
    /// budget, even at the maximum configured token length
    #[error("Keyspace exhausted: no free token found up to length {0}")]
    KeyspaceExhausted(usize),

    /// Failure in the underlying mapping store
    #[error(transparent)]
    Store(#[from] StoreError),
}
