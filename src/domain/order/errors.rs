use crate::domain::kernel::{ErrorKind, ValidationError};

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot assign already assigned order")]
    AlreadyAssigned,

    #[error("Cannot complete not assigned order")]
    NotAssigned,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(e) => e.kind(),
            OrderError::AlreadyAssigned | OrderError::NotAssigned => ErrorKind::DomainRule,
        }
    }
}
