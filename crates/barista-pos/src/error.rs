//! # Session Errors
//!
//! What a screen actually surfaces when an action fails. Nothing here is
//! fatal to the process; every failure is scoped to the single action that
//! triggered it, the operation is abandoned and there is no automatic retry.

use thiserror::Error;

use barista_core::CoreError;
use barista_db::{DbError, SaveBillError};

/// Errors surfaced by the session layer.
#[derive(Debug, Error)]
pub enum PosError {
    /// Business rule violation (empty cart, double pay, bad payment form).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Store failure on a fetch, list or payment update. Shown to the user
    /// as a dismissable alert with the store's message.
    #[error(transparent)]
    Store(#[from] DbError),

    /// Bill save failure, with which half of the write failed.
    #[error(transparent)]
    Save(#[from] SaveBillError),
}

impl PosError {
    /// Whether this is the receipt page's "bill not found" case, which
    /// renders as its own state rather than an error dialog.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PosError::Core(CoreError::BillNotFound(_)) | PosError::Store(DbError::NotFound { .. })
        )
    }
}

/// Result type for session operations.
pub type PosResult<T> = Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = PosError::Core(CoreError::BillNotFound("BRST000001".into()));
        assert!(err.is_not_found());

        let err = PosError::Core(CoreError::EmptyCart);
        assert!(!err.is_not_found());
    }
}
