//! # Error Types
//!
//! Rejections and error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core (this file)                                             │
//! │  ├── Rejection        - Action not valid in the current state (soft)   │
//! │  ├── ValidationError  - Payload failed validation                      │
//! │  └── CheckoutError    - Either of the above, for `?` propagation       │
//! │                                                                         │
//! │  checkout-session (separate crate)                                     │
//! │  └── SessionError     - Config loading, serialization                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejections Are Not Failures
//! A [`Rejection`] is a normal outcome of a context operation. The context
//! reports it inside an [`Outcome`](crate::Outcome) and keeps its state.
//! It only becomes an error when a caller opts in through
//! [`Outcome::into_result`](crate::Outcome::into_result).

use thiserror::Error;

use crate::types::CheckoutAction;

// =============================================================================
// Rejection
// =============================================================================

/// Why an action was refused in the current checkout state.
///
/// One variant per invalid (state, action) pair. The `Display` text is the
/// message shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    // -------------------------------------------------------------------------
    // Empty
    // -------------------------------------------------------------------------
    #[error("Cannot review an empty cart.")]
    ReviewEmptyCart,

    #[error("Cannot enter shipping info with an empty cart.")]
    ShippingWithEmptyCart,

    #[error("Cannot process payment with an empty cart.")]
    PaymentWithEmptyCart,

    // -------------------------------------------------------------------------
    // ItemsAdded
    // -------------------------------------------------------------------------
    #[error("Cannot enter shipping info without reviewing the cart.")]
    ShippingBeforeReview,

    /// Also returned from `Reviewed`, where shipping info is still missing.
    #[error("Cannot process payment without entering shipping info.")]
    PaymentBeforeShipping,

    /// The cart already holds the maximum number of items.
    #[error("Cart cannot have more than {max} items.")]
    CartFull { max: usize },

    // -------------------------------------------------------------------------
    // Reviewed
    // -------------------------------------------------------------------------
    #[error("Cannot add items after reviewing the cart.")]
    AddAfterReview,

    #[error("Cart already reviewed.")]
    AlreadyReviewed,

    // -------------------------------------------------------------------------
    // ShippingEntered
    // -------------------------------------------------------------------------
    #[error("Cannot add items after entering shipping info.")]
    AddAfterShipping,

    #[error("Cannot review cart after entering shipping info.")]
    ReviewAfterShipping,

    #[error("Shipping information already entered.")]
    ShippingAlreadyEntered,
}

impl Rejection {
    /// The action that was refused.
    pub fn action(&self) -> CheckoutAction {
        match self {
            Rejection::CartFull { .. }
            | Rejection::AddAfterReview
            | Rejection::AddAfterShipping => CheckoutAction::AddItem,
            Rejection::ReviewEmptyCart
            | Rejection::AlreadyReviewed
            | Rejection::ReviewAfterShipping => CheckoutAction::ReviewCart,
            Rejection::ShippingWithEmptyCart
            | Rejection::ShippingBeforeReview
            | Rejection::ShippingAlreadyEntered => CheckoutAction::EnterShippingInfo,
            Rejection::PaymentWithEmptyCart | Rejection::PaymentBeforeShipping => {
                CheckoutAction::ProcessPayment
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Payload validation errors.
///
/// Raised when building an [`ItemId`](crate::ItemId) or
/// [`ShippingInfo`](crate::ShippingInfo), before anything reaches the
/// state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., control characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors surfaced by callers that treat rejections as failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The action was refused in the current state.
    #[error("Checkout action rejected: {0}")]
    Rejected(#[from] Rejection),

    /// A payload failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
