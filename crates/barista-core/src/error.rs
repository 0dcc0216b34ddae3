//! # Error Types
//!
//! Domain-specific error types for barista-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  barista-core errors (this file)                                        │
//! │  └── CoreError   - domain rule violations                               │
//! │                                                                         │
//! │  barista-db errors (separate crate)                                     │
//! │  ├── DbError        - store operation failures                          │
//! │  └── SaveBillError  - which half of a bill save failed                  │
//! │                                                                         │
//! │  barista-pos errors (session layer)                                     │
//! │  └── PosError    - what a screen surfaces to the user                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bill id does not exist in the store.
    ///
    /// The receipt page renders this as a distinct "not found" state, not an
    /// error dialog.
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// A checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The bill is not in a state that allows the requested transition.
    ///
    /// The only legal payment transition is unpaid → paid; paying a paid
    /// bill lands here.
    #[error("Bill {bill_id} is already {current_status}")]
    InvalidPaymentTransition {
        bill_id: String,
        current_status: String,
    },

    /// Payment form input failed validation (UPI id, card fields).
    #[error("Invalid payment details: {0}")]
    InvalidPaymentDetails(String),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
