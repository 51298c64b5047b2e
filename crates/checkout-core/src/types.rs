//! # Domain Types
//!
//! Payloads and tags used throughout the checkout state machine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │     ItemId      │   │  ShippingInfo   │   Validated payloads        │
//! │  │  ─────────────  │   │  ─────────────  │   (opaque to the states)    │
//! │  │  "Product 1"    │   │  "123 Main St"  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐                         │
//! │  │ CheckoutStage   │   │  CheckoutAction     │   Payload-free tags     │
//! │  │  ─────────────  │   │  ─────────────────  │                         │
//! │  │  Empty          │   │  AddItem            │                         │
//! │  │  ItemsAdded     │   │  ReviewCart         │                         │
//! │  │  Reviewed       │   │  EnterShippingInfo  │                         │
//! │  │  ShippingEntered│   │  ProcessPayment     │                         │
//! │  └─────────────────┘   └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_item_id, validate_shipping_info};

// =============================================================================
// Item Id
// =============================================================================

/// Opaque identifier of an item placed in the cart.
///
/// Always trimmed and non-empty. Deserialization goes through the same
/// validation as [`ItemId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Validates and wraps an item identifier.
    ///
    /// ```rust
    /// use checkout_core::ItemId;
    ///
    /// assert_eq!(ItemId::parse(" Product 1 ").unwrap().as_str(), "Product 1");
    /// assert!(ItemId::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        validate_item_id(raw).map(ItemId)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemId::parse(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ItemId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Shipping Info
// =============================================================================

/// Shipping details entered during checkout.
///
/// The state machine treats this as opaque text; it is carried by
/// [`CartState::ShippingEntered`](crate::CartState::ShippingEntered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ShippingInfo(String);

impl ShippingInfo {
    /// Validates and wraps shipping info.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        validate_shipping_info(raw).map(ShippingInfo)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShippingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShippingInfo {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShippingInfo::parse(s)
    }
}

impl AsRef<str> for ShippingInfo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ShippingInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ShippingInfo::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Checkout Stage
// =============================================================================

/// Where a checkout is in its lifecycle, without the state's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Nothing in the cart yet.
    #[default]
    Empty,
    /// At least one item in the cart.
    ItemsAdded,
    /// Cart contents reviewed, items are frozen.
    Reviewed,
    /// Shipping info entered, ready for payment.
    ShippingEntered,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStage::Empty => write!(f, "empty"),
            CheckoutStage::ItemsAdded => write!(f, "items_added"),
            CheckoutStage::Reviewed => write!(f, "reviewed"),
            CheckoutStage::ShippingEntered => write!(f, "shipping_entered"),
        }
    }
}

// =============================================================================
// Checkout Action
// =============================================================================

/// The four client-facing checkout operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutAction {
    AddItem,
    ReviewCart,
    EnterShippingInfo,
    ProcessPayment,
}

impl CheckoutAction {
    /// Status text reported when the action is accepted.
    pub fn success_message(&self) -> &'static str {
        match self {
            CheckoutAction::AddItem => "Item added to the cart.",
            CheckoutAction::ReviewCart => "Reviewing cart contents.",
            CheckoutAction::EnterShippingInfo => "Entering shipping information.",
            CheckoutAction::ProcessPayment => "Processing payment with the entered shipping info.",
        }
    }
}

impl fmt::Display for CheckoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutAction::AddItem => write!(f, "add_item"),
            CheckoutAction::ReviewCart => write!(f, "review_cart"),
            CheckoutAction::EnterShippingInfo => write!(f, "enter_shipping_info"),
            CheckoutAction::ProcessPayment => write!(f, "process_payment"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
