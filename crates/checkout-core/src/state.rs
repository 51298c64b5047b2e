//! # Cart States
//!
//! The closed set of checkout states and the transition table between them.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Lifecycle                               │
//! │                                                                         │
//! │  ┌──────────┐  add_item  ┌────────────┐ review_cart ┌──────────┐       │
//! │  │  Empty   │───────────►│ ItemsAdded │────────────►│ Reviewed │       │
//! │  └──────────┘            └────────────┘             └────┬─────┘       │
//! │                            │   ▲                         │             │
//! │                            └───┘ add_item (stays)        │             │
//! │                                                          │             │
//! │                                         enter_shipping_info            │
//! │                                                          │             │
//! │                                                          ▼             │
//! │                                              ┌─────────────────────┐   │
//! │                          process_payment ───►│ ShippingEntered     │   │
//! │                          (stays, terminal)   │   { info }          │   │
//! │                                              └─────────────────────┘   │
//! │                                                                         │
//! │  Every other (state, action) pair is a soft Rejection: no transition.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never mutate the state they are called on. They return a
//! [`Step`], and only [`Step::Transition`] replaces the context's state.

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::error::Rejection;
use crate::types::{CheckoutAction, CheckoutStage, ItemId, ShippingInfo};

// =============================================================================
// Cart State
// =============================================================================

/// The current stage of a checkout, with any data the stage carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum CartState {
    #[default]
    Empty,
    ItemsAdded,
    Reviewed,
    ShippingEntered { info: ShippingInfo },
}

/// Result of running a state handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace the current state with this one.
    Transition(CartState),
    /// Action accepted, current state retained.
    Stay,
    /// Action refused, current state retained.
    Reject(Rejection),
}

/// How full the cart is when an item is being added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub used: usize,
    pub max: usize,
}

impl Capacity {
    #[inline]
    pub fn is_full(&self) -> bool {
        self.used >= self.max
    }
}

impl CartState {
    /// The payload-free tag for this state.
    pub fn stage(&self) -> CheckoutStage {
        match self {
            CartState::Empty => CheckoutStage::Empty,
            CartState::ItemsAdded => CheckoutStage::ItemsAdded,
            CartState::Reviewed => CheckoutStage::Reviewed,
            CartState::ShippingEntered { .. } => CheckoutStage::ShippingEntered,
        }
    }

    /// Shipping info, once it has been entered.
    pub fn shipping_info(&self) -> Option<&ShippingInfo> {
        match self {
            CartState::ShippingEntered { info } => Some(info),
            _ => None,
        }
    }

    /// Adds an item to the cart.
    ///
    /// The first item moves `Empty` to `ItemsAdded`. Further items are
    /// accepted in `ItemsAdded` until the cart is full.
    pub fn add_item(&self, item: &ItemId, capacity: Capacity) -> Step {
        trace!(stage = %self.stage(), item = %item, used = capacity.used, "add_item");
        match self {
            CartState::Empty => Step::Transition(CartState::ItemsAdded),
            CartState::ItemsAdded if capacity.is_full() => {
                Step::Reject(Rejection::CartFull { max: capacity.max })
            }
            CartState::ItemsAdded => Step::Stay,
            CartState::Reviewed => Step::Reject(Rejection::AddAfterReview),
            CartState::ShippingEntered { .. } => Step::Reject(Rejection::AddAfterShipping),
        }
    }

    /// Reviews the cart contents. Only valid with items in the cart.
    pub fn review_cart(&self) -> Step {
        match self {
            CartState::Empty => Step::Reject(Rejection::ReviewEmptyCart),
            CartState::ItemsAdded => Step::Transition(CartState::Reviewed),
            CartState::Reviewed => Step::Reject(Rejection::AlreadyReviewed),
            CartState::ShippingEntered { .. } => Step::Reject(Rejection::ReviewAfterShipping),
        }
    }

    /// Enters shipping info. Only valid once the cart has been reviewed.
    pub fn enter_shipping_info(&self, info: &ShippingInfo) -> Step {
        match self {
            CartState::Empty => Step::Reject(Rejection::ShippingWithEmptyCart),
            CartState::ItemsAdded => Step::Reject(Rejection::ShippingBeforeReview),
            CartState::Reviewed => Step::Transition(CartState::ShippingEntered {
                info: info.clone(),
            }),
            CartState::ShippingEntered { .. } => Step::Reject(Rejection::ShippingAlreadyEntered),
        }
    }

    /// Processes payment. Terminal: accepted without leaving `ShippingEntered`.
    pub fn process_payment(&self) -> Step {
        match self {
            CartState::Empty => Step::Reject(Rejection::PaymentWithEmptyCart),
            CartState::ItemsAdded | CartState::Reviewed => {
                Step::Reject(Rejection::PaymentBeforeShipping)
            }
            CartState::ShippingEntered { .. } => Step::Stay,
        }
    }

    /// Runs the handler matching `command`.
    pub fn handle(&self, command: &Command, capacity: Capacity) -> Step {
        match command {
            Command::AddItem(item) => self.add_item(item, capacity),
            Command::ReviewCart => self.review_cart(),
            Command::EnterShippingInfo(info) => self.enter_shipping_info(info),
            Command::ProcessPayment => self.process_payment(),
        }
    }
}

// =============================================================================
// Command
// =============================================================================

/// A checkout operation together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddItem(ItemId),
    ReviewCart,
    EnterShippingInfo(ShippingInfo),
    ProcessPayment,
}

impl Command {
    pub fn action(&self) -> CheckoutAction {
        match self {
            Command::AddItem(_) => CheckoutAction::AddItem,
            Command::ReviewCart => CheckoutAction::ReviewCart,
            Command::EnterShippingInfo(_) => CheckoutAction::EnterShippingInfo,
            Command::ProcessPayment => CheckoutAction::ProcessPayment,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
