use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error kinds the HTTP layer maps onto status codes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No usable identity accompanies the request.
    #[error("authentication required")]
    Unauthorized,
    /// The requester is known but does not own the resource.
    #[error("requester does not own this resource")]
    Forbidden,
    #[error("resource not found")]
    NotFound,
    /// Input passed shape checks but violated a field constraint.
    #[error("{0}")]
    Form(String),
    #[error("resource already exists")]
    Conflict,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(_) => ServiceError::Conflict,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
