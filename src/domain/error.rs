//! Core Error Taxonomy
//!
//! Four outcomes cross the boundary: INVALID, NOT_FOUND, CONFLICT and
//! INTERNAL. Public errors surface their message verbatim; internal
//! errors surface only the status text.

use thiserror::Error;

use super::model::batch::BatchError;
use super::ports::StoreError;

/// Errors produced by the dispatch core
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request shape or semantic violation
    #[error("{0}")]
    Invalid(String),

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The order already belongs to a different delivery group
    #[error("courier already assigned to order")]
    AlreadyAssigned,

    /// Unexpected failure; message is not surfaced to clients
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CoreError::Invalid(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CoreError::Internal(message.into())
    }

    /// Whether the message may be shown to the caller verbatim
    pub fn is_public(&self) -> bool {
        !matches!(self, CoreError::Internal(_))
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

impl From<BatchError> for CoreError {
    fn from(err: BatchError) -> Self {
        CoreError::Internal(err.to_string())
    }
}
