use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be mapped back to a model
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<SqlxError> for StoreError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::ColumnDecode { .. } | SqlxError::Decode(_) | SqlxError::TypeNotFound { .. } => {
                Self::InvalidData(err.to_string())
            }
            _ => Self::Unavailable(err.to_string()),
        }
    }
}
