//! # Checkout Context
//!
//! Owns the current [`CartState`] and forwards every client call to it.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  client ──► context.review_cart()                                      │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │             state.review_cart() ──► Step                               │
//! │                  │                                                      │
//! │                  ├── Transition(new) ──► state = new ──► Transitioned  │
//! │                  ├── Stay            ──► (unchanged) ──► Accepted      │
//! │                  └── Reject(reason)  ──► (unchanged) ──► Rejected      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Not synchronized. Share it across threads through an external lock
//! (`checkout_session::SharedCheckout` wraps it in a mutex).

use tracing::{debug, info};

use crate::error::{CheckoutResult, Rejection};
use crate::state::{Capacity, CartState, Command, Step};
use crate::types::{CheckoutAction, CheckoutStage, ItemId, ShippingInfo};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Outcome
// =============================================================================

/// What a context operation did.
///
/// Every operation succeeds at the call level; the outcome says whether the
/// state moved, stayed, or the action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action was valid and moved the checkout to a new stage.
    Transitioned {
        action: CheckoutAction,
        from: CheckoutStage,
        to: CheckoutStage,
    },
    /// The action was valid and the stage did not change.
    Accepted {
        action: CheckoutAction,
        stage: CheckoutStage,
    },
    /// The action is not valid in the current stage.
    Rejected {
        stage: CheckoutStage,
        reason: Rejection,
    },
}

impl Outcome {
    pub fn action(&self) -> CheckoutAction {
        match self {
            Outcome::Transitioned { action, .. } | Outcome::Accepted { action, .. } => *action,
            Outcome::Rejected { reason, .. } => reason.action(),
        }
    }

    /// Stage of the checkout after the operation.
    pub fn stage_after(&self) -> CheckoutStage {
        match self {
            Outcome::Transitioned { to, .. } => *to,
            Outcome::Accepted { stage, .. } | Outcome::Rejected { stage, .. } => *stage,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Rejected { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Human-readable status text for this outcome.
    pub fn message(&self) -> String {
        match self {
            Outcome::Transitioned { action, .. } | Outcome::Accepted { action, .. } => {
                action.success_message().to_string()
            }
            Outcome::Rejected { reason, .. } => reason.to_string(),
        }
    }

    /// Turns a rejection into an error for callers that treat it as one.
    ///
    /// ```rust
    /// use checkout_core::{CheckoutContext, CheckoutError};
    ///
    /// let mut checkout = CheckoutContext::new();
    /// let result = checkout.review_cart().into_result();
    /// assert!(matches!(result, Err(CheckoutError::Rejected(_))));
    /// ```
    pub fn into_result(self) -> CheckoutResult<Outcome> {
        match self {
            Outcome::Rejected { reason, .. } => Err(reason.into()),
            other => Ok(other),
        }
    }
}

// =============================================================================
// Checkout Context
// =============================================================================

/// Drives one checkout through its lifecycle.
///
/// ## Invariants
/// - Holds exactly one [`CartState`]; it is replaced wholesale, never edited
/// - Rejected actions leave both the state and the items untouched
/// - `items` is non-empty in every stage after `Empty`
#[derive(Debug, Clone)]
pub struct CheckoutContext {
    state: CartState,
    items: Vec<ItemId>,
    max_items: usize,
}

impl CheckoutContext {
    /// Creates a checkout in the `Empty` state with the default item limit.
    pub fn new() -> Self {
        Self::with_max_items(MAX_CART_ITEMS)
    }

    /// Creates a checkout that accepts at most `max_items` items.
    ///
    /// The limit is clamped to `1..=MAX_CART_ITEMS`.
    pub fn with_max_items(max_items: usize) -> Self {
        CheckoutContext {
            state: CartState::Empty,
            items: Vec::new(),
            max_items: max_items.clamp(1, MAX_CART_ITEMS),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn stage(&self) -> CheckoutStage {
        self.state.stage()
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn shipping_info(&self) -> Option<&ShippingInfo> {
        self.state.shipping_info()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    pub fn add_item(&mut self, item: ItemId) -> Outcome {
        self.dispatch(Command::AddItem(item))
    }

    pub fn review_cart(&mut self) -> Outcome {
        self.dispatch(Command::ReviewCart)
    }

    pub fn enter_shipping_info(&mut self, info: ShippingInfo) -> Outcome {
        self.dispatch(Command::EnterShippingInfo(info))
    }

    pub fn process_payment(&mut self) -> Outcome {
        self.dispatch(Command::ProcessPayment)
    }

    /// Forwards `command` to the current state and applies the resulting step.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let action = command.action();
        let from = self.stage();
        let capacity = Capacity {
            used: self.items.len(),
            max: self.max_items,
        };

        let outcome = match self.state.handle(&command, capacity) {
            Step::Transition(next) => {
                self.state = next;
                Outcome::Transitioned {
                    action,
                    from,
                    to: self.stage(),
                }
            }
            Step::Stay => Outcome::Accepted {
                action,
                stage: from,
            },
            Step::Reject(reason) => Outcome::Rejected {
                stage: from,
                reason,
            },
        };

        if !outcome.is_rejected() {
            if let Command::AddItem(item) = command {
                self.items.push(item);
            }
        }

        self.report(&outcome);
        outcome
    }

    fn report(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Transitioned { action, from, to } => {
                debug!(%action, %from, %to, message = %outcome.message(), "Checkout transition");
            }
            Outcome::Accepted {
                action: CheckoutAction::ProcessPayment,
                stage,
            } => {
                info!(
                    %stage,
                    items = self.items.len(),
                    message = %outcome.message(),
                    "Payment processed"
                );
            }
            Outcome::Accepted { action, stage } => {
                debug!(%action, %stage, message = %outcome.message(), "Checkout action accepted");
            }
            Outcome::Rejected { stage, reason } => {
                info!(action = %reason.action(), %stage, reason = %reason, "Checkout action rejected");
            }
        }
    }
}

impl Default for CheckoutContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckoutError;

    fn item(name: &str) -> ItemId {
        ItemId::parse(name).unwrap()
    }

    fn address() -> ShippingInfo {
        ShippingInfo::parse("123 Main St").unwrap()
    }

    /// Builds a context in each of the four stages.
    fn context_in(stage: CheckoutStage) -> CheckoutContext {
        let mut checkout = CheckoutContext::new();
        if stage == CheckoutStage::Empty {
            return checkout;
        }
        checkout.add_item(item("Product 1"));
        if stage == CheckoutStage::ItemsAdded {
            return checkout;
        }
        checkout.review_cart();
        if stage == CheckoutStage::Reviewed {
            return checkout;
        }
        checkout.enter_shipping_info(address());
        checkout
    }

    fn all_commands() -> Vec<Command> {
        vec![
            Command::AddItem(item("Product 2")),
            Command::ReviewCart,
            Command::EnterShippingInfo(ShippingInfo::parse("9 Elm Rd").unwrap()),
            Command::ProcessPayment,
        ]
    }

    #[test]
    fn test_new_context_is_empty() {
        let checkout = CheckoutContext::new();
        assert_eq!(checkout.state(), &CartState::Empty);
        assert_eq!(checkout.item_count(), 0);
        assert_eq!(checkout.max_items(), MAX_CART_ITEMS);
        assert!(checkout.shipping_info().is_none());
    }

    #[test]
    fn test_full_checkout_scenario() {
        let mut checkout = CheckoutContext::new();

        let outcome = checkout.add_item(item("Product 1"));
        assert_eq!(
            outcome,
            Outcome::Transitioned {
                action: CheckoutAction::AddItem,
                from: CheckoutStage::Empty,
                to: CheckoutStage::ItemsAdded,
            }
        );
        assert_eq!(outcome.message(), "Item added to the cart.");

        checkout.review_cart();
        assert_eq!(checkout.state(), &CartState::Reviewed);

        checkout.enter_shipping_info(address());
        assert_eq!(
            checkout.state(),
            &CartState::ShippingEntered { info: address() }
        );

        let outcome = checkout.process_payment();
        assert_eq!(
            outcome,
            Outcome::Accepted {
                action: CheckoutAction::ProcessPayment,
                stage: CheckoutStage::ShippingEntered,
            }
        );
        assert_eq!(
            outcome.message(),
            "Processing payment with the entered shipping info."
        );
        assert_eq!(checkout.stage(), CheckoutStage::ShippingEntered);
        assert_eq!(checkout.shipping_info(), Some(&address()));
    }

    #[test]
    fn test_review_empty_cart_is_rejected() {
        let mut checkout = CheckoutContext::new();

        let outcome = checkout.review_cart();

        assert_eq!(outcome.rejection(), Some(Rejection::ReviewEmptyCart));
        assert_eq!(outcome.message(), "Cannot review an empty cart.");
        assert_eq!(checkout.state(), &CartState::Empty);
    }

    const ALL_STAGES: [CheckoutStage; 4] = [
        CheckoutStage::Empty,
        CheckoutStage::ItemsAdded,
        CheckoutStage::Reviewed,
        CheckoutStage::ShippingEntered,
    ];

    /// The (stage, action) pairs that are not rejected.
    fn is_allowed(stage: CheckoutStage, action: CheckoutAction) -> bool {
        matches!(
            (stage, action),
            (CheckoutStage::Empty, CheckoutAction::AddItem)
                | (CheckoutStage::ItemsAdded, CheckoutAction::AddItem)
                | (CheckoutStage::ItemsAdded, CheckoutAction::ReviewCart)
                | (CheckoutStage::Reviewed, CheckoutAction::EnterShippingInfo)
                | (CheckoutStage::ShippingEntered, CheckoutAction::ProcessPayment)
        )
    }

    #[test]
    fn test_invalid_actions_are_rejected_and_leave_state_unchanged() {
        for stage in ALL_STAGES {
            for command in all_commands() {
                let action = command.action();
                let mut checkout = context_in(stage);
                let before_state = checkout.state().clone();
                let before_items = checkout.items().to_vec();

                let outcome = checkout.dispatch(command);

                assert_eq!(
                    outcome.is_rejected(),
                    !is_allowed(stage, action),
                    "{} in {}",
                    action,
                    stage
                );
                if outcome.is_rejected() {
                    assert_eq!(checkout.state(), &before_state);
                    assert_eq!(checkout.items(), before_items.as_slice());
                    assert_eq!(outcome.stage_after(), stage);
                }
            }
        }
    }

    #[test]
    fn test_only_one_path_reaches_shipping_entered() {
        // Each stage has at most one action that moves it, so the path is unique
        let mut forward = Vec::new();
        for stage in ALL_STAGES {
            let moves: Vec<_> = all_commands()
                .into_iter()
                .filter_map(|command| match context_in(stage).dispatch(command) {
                    Outcome::Transitioned { action, to, .. } => Some((action, to)),
                    _ => None,
                })
                .collect();

            if stage == CheckoutStage::ShippingEntered {
                assert!(moves.is_empty(), "shipping_entered must be terminal");
            } else {
                assert_eq!(moves.len(), 1, "{} must have exactly one transition", stage);
                forward.push((stage, moves[0]));
            }
        }

        assert_eq!(
            forward,
            vec![
                (
                    CheckoutStage::Empty,
                    (CheckoutAction::AddItem, CheckoutStage::ItemsAdded)
                ),
                (
                    CheckoutStage::ItemsAdded,
                    (CheckoutAction::ReviewCart, CheckoutStage::Reviewed)
                ),
                (
                    CheckoutStage::Reviewed,
                    (CheckoutAction::EnterShippingInfo, CheckoutStage::ShippingEntered)
                ),
            ]
        );
    }

    #[test]
    fn test_items_frozen_after_review() {
        for stage in [CheckoutStage::Reviewed, CheckoutStage::ShippingEntered] {
            let mut checkout = context_in(stage);

            assert!(checkout.add_item(item("Late item")).is_rejected());
            assert_eq!(checkout.items(), &[item("Product 1")]);
        }
    }

    #[test]
    fn test_repeated_payment_is_idempotent() {
        let mut checkout = context_in(CheckoutStage::ShippingEntered);

        let first = checkout.process_payment();
        let state_after_first = checkout.state().clone();
        let second = checkout.process_payment();

        assert_eq!(first, second);
        assert_eq!(checkout.state(), &state_after_first);
    }

    #[test]
    fn test_add_item_in_items_added_stays_and_records_item() {
        let mut checkout = context_in(CheckoutStage::ItemsAdded);

        let outcome = checkout.add_item(item("Product 2"));

        assert_eq!(
            outcome,
            Outcome::Accepted {
                action: CheckoutAction::AddItem,
                stage: CheckoutStage::ItemsAdded,
            }
        );
        assert_eq!(checkout.stage(), CheckoutStage::ItemsAdded);
        assert_eq!(checkout.items(), &[item("Product 1"), item("Product 2")]);
    }

    #[test]
    fn test_max_items_limit() {
        let mut checkout = CheckoutContext::with_max_items(2);
        checkout.add_item(item("A"));
        checkout.add_item(item("B"));

        let outcome = checkout.add_item(item("C"));

        assert_eq!(outcome.rejection(), Some(Rejection::CartFull { max: 2 }));
        assert_eq!(checkout.item_count(), 2);
        assert_eq!(checkout.stage(), CheckoutStage::ItemsAdded);
    }

    #[test]
    fn test_max_items_is_clamped() {
        assert_eq!(CheckoutContext::with_max_items(0).max_items(), 1);
        assert_eq!(
            CheckoutContext::with_max_items(MAX_CART_ITEMS + 1).max_items(),
            MAX_CART_ITEMS
        );
    }

    #[test]
    fn test_into_result() {
        let mut checkout = CheckoutContext::new();

        assert!(checkout.add_item(item("Product 1")).into_result().is_ok());
        assert!(matches!(
            checkout.enter_shipping_info(address()).into_result(),
            Err(CheckoutError::Rejected(Rejection::ShippingBeforeReview))
        ));
    }
}
