//! # Checkout Session
//!
//! A [`CheckoutContext`] with identity, timestamps and a journal of what
//! happened to it.
//!
//! ## Journal
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  at        action               result         stage_after    message  │
//! │  ───────── ──────────────────── ────────────── ────────────── ──────── │
//! │  10:02:11  review_cart          rejected       empty          Cannot…  │
//! │  10:02:15  add_item             transitioned   items_added    Item…    │
//! │  10:02:20  review_cart          transitioned   reviewed       Review…  │
//! │                                                                         │
//! │  Bounded by `journal_capacity`: the oldest entry is dropped first.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;

use checkout_core::{
    CartState, CheckoutAction, CheckoutContext, CheckoutStage, Command, ItemId, Outcome,
    ShippingInfo, MAX_CART_ITEMS,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

// =============================================================================
// Journal
// =============================================================================

/// Coarse result of one operation, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntryResult {
    Transitioned,
    Accepted,
    Rejected,
}

impl From<&Outcome> for EntryResult {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Transitioned { .. } => EntryResult::Transitioned,
            Outcome::Accepted { .. } => EntryResult::Accepted,
            Outcome::Rejected { .. } => EntryResult::Rejected,
        }
    }
}

/// One operation recorded against a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
    pub action: CheckoutAction,
    pub result: EntryResult,
    pub stage_after: CheckoutStage,
    pub message: String,
}

impl JournalEntry {
    fn record(outcome: &Outcome) -> Self {
        JournalEntry {
            at: Utc::now(),
            action: outcome.action(),
            result: EntryResult::from(outcome),
            stage_after: outcome.stage_after(),
            message: outcome.message(),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// One shopper's checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    context: CheckoutContext,
    journal: VecDeque<JournalEntry>,
    journal_capacity: usize,
}

impl CheckoutSession {
    pub fn new(config: &SessionConfig) -> Self {
        let session = CheckoutSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            paid_at: None,
            context: CheckoutContext::with_max_items(config.max_items),
            journal: VecDeque::new(),
            journal_capacity: config.journal_capacity.max(1),
        };
        info!(session_id = %session.id, max_items = session.context.max_items(), "Checkout session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When payment was first processed. Repeated payments do not move it.
    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn context(&self) -> &CheckoutContext {
        &self.context
    }

    pub fn stage(&self) -> CheckoutStage {
        self.context.stage()
    }

    /// Journal entries, oldest first.
    pub fn journal(&self) -> impl Iterator<Item = &JournalEntry> {
        self.journal.iter()
    }

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

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let outcome = self.context.dispatch(command);

        if let Outcome::Accepted {
            action: CheckoutAction::ProcessPayment,
            ..
        } = outcome
        {
            self.paid_at.get_or_insert_with(Utc::now);
        }

        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(JournalEntry::record(&outcome));

        outcome
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.to_string(),
            state: self.context.state().clone(),
            items: self.context.items().to_vec(),
            created_at: self.created_at,
            paid_at: self.paid_at,
            journal: self.journal.iter().cloned().collect(),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Serializable view of a session for a checkout UI.
///
/// A snapshot is a read-only view: nothing rebuilds a session from one.
/// Plain `Deserialize` does not cross-check fields; use
/// [`SessionSnapshot::from_json`] for input that did not come from
/// [`CheckoutSession::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: String,
    /// Current state, including shipping info once entered.
    pub state: CartState,
    pub items: Vec<ItemId>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub paid_at: Option<DateTime<Utc>>,
    pub journal: Vec<JournalEntry>,
}

impl SessionSnapshot {
    pub fn stage(&self) -> CheckoutStage {
        self.state.stage()
    }

    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot and checks it with [`SessionSnapshot::validate`].
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks that the fields describe a state a session can reach.
    ///
    /// ## Rules
    /// - `Empty` has no items; every later stage has at least one
    /// - At most `MAX_CART_ITEMS` items
    /// - `paid_at` is only set in `ShippingEntered`
    pub fn validate(&self) -> SessionResult<()> {
        let stage = self.stage();

        if (stage == CheckoutStage::Empty) != self.items.is_empty() {
            return Err(SessionError::InvalidSnapshot(format!(
                "stage {} does not match {} item(s)",
                stage,
                self.items.len()
            )));
        }

        if self.items.len() > MAX_CART_ITEMS {
            return Err(SessionError::InvalidSnapshot(format!(
                "{} items exceeds the maximum of {}",
                self.items.len(),
                MAX_CART_ITEMS
            )));
        }

        if self.paid_at.is_some() && stage != CheckoutStage::ShippingEntered {
            return Err(SessionError::InvalidSnapshot(format!(
                "paid_at is set in stage {}",
                stage
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CheckoutSession {
        CheckoutSession::new(&SessionConfig::default())
    }

    fn item(name: &str) -> ItemId {
        ItemId::parse(name).unwrap()
    }

    fn address() -> ShippingInfo {
        ShippingInfo::parse("123 Main St, City").unwrap()
    }

    #[test]
    fn test_session_records_journal() {
        let mut session = session();

        session.review_cart();
        session.add_item(item("Product 1"));

        let entries: Vec<_> = session.journal().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, CheckoutAction::ReviewCart);
        assert_eq!(entries[0].result, EntryResult::Rejected);
        assert_eq!(entries[0].stage_after, CheckoutStage::Empty);
        assert_eq!(entries[0].message, "Cannot review an empty cart.");
        assert_eq!(entries[1].result, EntryResult::Transitioned);
        assert_eq!(entries[1].stage_after, CheckoutStage::ItemsAdded);
    }

    #[test]
    fn test_journal_is_bounded() {
        let config = SessionConfig {
            journal_capacity: 2,
            ..SessionConfig::default()
        };
        let mut session = CheckoutSession::new(&config);

        session.add_item(item("A"));
        session.add_item(item("B"));
        session.review_cart();

        let actions: Vec<_> = session.journal().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![CheckoutAction::AddItem, CheckoutAction::ReviewCart]
        );
    }

    #[test]
    fn test_paid_at_set_once() {
        let mut session = session();
        assert!(session.paid_at().is_none());

        session.add_item(item("Product 1"));
        session.review_cart();
        session.process_payment();
        assert!(session.paid_at().is_none());

        session.enter_shipping_info(address());
        session.process_payment();
        let first = session.paid_at().unwrap();

        session.process_payment();
        assert_eq!(session.paid_at(), Some(first));
        assert_eq!(session.stage(), CheckoutStage::ShippingEntered);
    }

    #[test]
    fn test_session_uses_config_limit() {
        let config = SessionConfig {
            max_items: 1,
            ..SessionConfig::default()
        };
        let mut session = CheckoutSession::new(&config);

        session.add_item(item("A"));
        assert!(session.add_item(item("B")).is_rejected());
        assert_eq!(session.context().item_count(), 1);
    }

    #[test]
    fn test_snapshot_json() {
        let mut session = session();
        session.add_item(item("Product 1"));
        session.review_cart();
        session.enter_shipping_info(address());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.stage(), CheckoutStage::ShippingEntered);
        assert_eq!(snapshot.id, session.id().to_string());

        let json = snapshot.to_json().unwrap();
        assert!(json.contains(r#""state":{"stage":"shipping_entered","info":"123 Main St, City"}"#));
        assert!(json.contains(r#""items":["Product 1"]"#));
        assert!(json.contains(r#""paidAt":null"#));

        let parsed = SessionSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_snapshot_with_contradicting_fields_is_rejected() {
        let mut snapshot = session().snapshot();
        snapshot.state = CartState::Reviewed;

        // Reviewed with no items: plain serde accepts it, from_json does not
        let json = snapshot.to_json().unwrap();
        assert!(serde_json::from_str::<SessionSnapshot>(&json).is_ok());
        assert!(matches!(
            SessionSnapshot::from_json(&json),
            Err(SessionError::InvalidSnapshot(_))
        ));

        let mut snapshot = session().snapshot();
        snapshot.items = vec![item("Product 1")];
        assert!(snapshot.validate().is_err());

        let mut checkout = session();
        checkout.add_item(item("Product 1"));
        let mut snapshot = checkout.snapshot();
        assert!(snapshot.validate().is_ok());
        snapshot.paid_at = Some(Utc::now());
        assert!(snapshot.validate().is_err());
    }
}
