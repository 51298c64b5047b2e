//! # checkout-core: Checkout State Machine
//!
//! This crate models the lifecycle of a shopping-cart checkout as a closed
//! set of states driven by a context object.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-session (runtime layer)                │   │
//! │  │     SharedCheckout ──► CheckoutSession ──► journal / snapshot   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  context  │  │   state   │  │   types   │  │ validation│  │   │
//! │  │   │ Checkout  │  │ CartState │  │  ItemId   │  │   rules   │  │   │
//! │  │   │ Context   │  │ Step      │  │ Shipping  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONFIG FILES • NO SUBSCRIBERS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`] - The four cart states and their transition table
//! - [`context`] - The context that owns the current state
//! - [`types`] - Validated payloads and stage/action tags
//! - [`error`] - Rejections and validation errors
//! - [`validation`] - Payload validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{CheckoutContext, CheckoutStage, ItemId, ShippingInfo};
//!
//! let mut checkout = CheckoutContext::new();
//!
//! // Reviewing an empty cart is rejected, the state does not move
//! assert!(checkout.review_cart().is_rejected());
//! assert_eq!(checkout.stage(), CheckoutStage::Empty);
//!
//! checkout.add_item(ItemId::parse("Product 1").unwrap());
//! checkout.review_cart();
//! checkout.enter_shipping_info(ShippingInfo::parse("123 Main St").unwrap());
//!
//! let outcome = checkout.process_payment();
//! assert!(!outcome.is_rejected());
//! assert_eq!(checkout.stage(), CheckoutStage::ShippingEntered);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod context;
pub mod error;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use context::{CheckoutContext, Outcome};
pub use error::{CheckoutError, CheckoutResult, Rejection, ValidationError};
pub use state::{Capacity, CartState, Command, Step};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single cart.
///
/// Used as the default per-context limit; a session may lower it.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum length of an item identifier, in characters.
pub const MAX_ITEM_ID_LEN: usize = 64;

/// Maximum length of shipping info, in characters.
pub const MAX_SHIPPING_INFO_LEN: usize = 500;
