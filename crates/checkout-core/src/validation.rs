//! # Validation Module
//!
//! Payload validation for checkout operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Payload construction (THIS MODULE)                           │
//! │  ├── ItemId::parse / ShippingInfo::parse                               │
//! │  └── Hard errors: the payload never exists if invalid                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: State machine (state.rs)                                     │
//! │  ├── Is the action allowed in the current state?                       │
//! │  └── Soft rejections: reported, never raised                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_item_id, validate_shipping_info};
//!
//! assert_eq!(validate_item_id("  Product 1 ").unwrap(), "Product 1");
//! assert!(validate_shipping_info("").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_ID_LEN, MAX_SHIPPING_INFO_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item identifier.
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Must not be empty
/// - At most `MAX_ITEM_ID_LEN` (64) characters
/// - No control characters
///
/// ## Returns
/// The trimmed identifier.
pub fn validate_item_id(raw: &str) -> ValidationResult<String> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "item".to_string(),
        });
    }

    if id.chars().count() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if id.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "item".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(id.to_string())
}

/// Validates free-form shipping info (address, delivery notes).
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Must not be empty
/// - At most `MAX_SHIPPING_INFO_LEN` (500) characters
/// - Newlines are allowed (multi-line addresses), other control characters are not
pub fn validate_shipping_info(raw: &str) -> ValidationResult<String> {
    let info = raw.trim();

    if info.is_empty() {
        return Err(ValidationError::Required {
            field: "shipping info".to_string(),
        });
    }

    if info.chars().count() > MAX_SHIPPING_INFO_LEN {
        return Err(ValidationError::TooLong {
            field: "shipping info".to_string(),
            max: MAX_SHIPPING_INFO_LEN,
        });
    }

    if info.chars().any(|c| c.is_control() && c != '\n') {
        return Err(ValidationError::InvalidFormat {
            field: "shipping info".to_string(),
            reason: "must not contain control characters other than newlines".to_string(),
        });
    }

    Ok(info.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
