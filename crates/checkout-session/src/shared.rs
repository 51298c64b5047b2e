//! # Shared Checkout
//!
//! A cloneable, thread-safe handle to one [`CheckoutSession`].
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several callers (UI events, background tasks) may drive the same checkout
//! 2. Only one of them may run an operation at a time
//! 3. The state machine itself is not synchronized
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shared Checkout Operations                           │
//! │                                                                         │
//! │  Caller Input            SharedCheckout              Session            │
//! │  ────────────            ──────────────              ───────            │
//! │                                                                         │
//! │  "Product 1" ──parse──► add_item() ───lock──► session.add_item()       │
//! │                                                                         │
//! │  (none) ──────────────► review_cart() ─lock──► session.review_cart()   │
//! │                                                                         │
//! │  "123 Main" ──parse───► enter_shipping_info() ──► session.enter_...()  │
//! │                                                                         │
//! │  NOTE: Payloads are validated BEFORE the lock is taken.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use checkout_core::{ItemId, Outcome, ShippingInfo};

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::session::{CheckoutSession, SessionSnapshot};

/// Cloneable handle; clones drive the same session.
#[derive(Debug, Clone)]
pub struct SharedCheckout {
    session: Arc<Mutex<CheckoutSession>>,
}

impl SharedCheckout {
    pub fn new(config: &SessionConfig) -> Self {
        Self::from_session(CheckoutSession::new(config))
    }

    pub fn from_session(session: CheckoutSession) -> Self {
        SharedCheckout {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use checkout_session::{SessionConfig, SharedCheckout};
    ///
    /// let checkout = SharedCheckout::new(&SessionConfig::default());
    /// let stage = checkout.with_session(|s| s.stage());
    /// assert_eq!(stage.to_string(), "empty");
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutSession) -> R,
    {
        let session = self.lock();
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutSession) -> R,
    {
        let mut session = self.lock();
        f(&mut session)
    }

    /// Validates `item` and adds it to the cart.
    ///
    /// Unlike the context operations, this can fail: raw input is narrowed
    /// to an [`ItemId`] first (trimmed, non-empty, at most 64 characters),
    /// and input that does not fit is returned as a validation error before
    /// the session is touched. A rejected add is not an error; it is
    /// reported in the returned [`Outcome`].
    pub fn add_item(&self, item: &str) -> SessionResult<Outcome> {
        let item = ItemId::parse(item)?;
        Ok(self.with_session_mut(|s| s.add_item(item)))
    }

    pub fn review_cart(&self) -> Outcome {
        self.with_session_mut(CheckoutSession::review_cart)
    }

    /// Validates `info` and enters it as shipping info.
    ///
    /// Fails only when `info` is not a valid [`ShippingInfo`] (trimmed,
    /// non-empty, at most 500 characters); rejections come back in the
    /// [`Outcome`].
    pub fn enter_shipping_info(&self, info: &str) -> SessionResult<Outcome> {
        let info = ShippingInfo::parse(info)?;
        Ok(self.with_session_mut(|s| s.enter_shipping_info(info)))
    }

    pub fn process_payment(&self) -> Outcome {
        self.with_session_mut(CheckoutSession::process_payment)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.with_session(CheckoutSession::snapshot)
    }

    /// A panic while holding the lock cannot leave the session half-updated:
    /// states are replaced wholesale. The poisoned guard is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, CheckoutSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::thread;

    use checkout_core::{CheckoutError, CheckoutStage, Rejection};

    use super::*;
    use crate::error::SessionError;

    fn shared() -> SharedCheckout {
        SharedCheckout::new(&SessionConfig::default())
    }

    #[test]
    fn test_full_checkout_through_handle() {
        let checkout = shared();

        checkout.add_item("Product 1").unwrap();
        checkout.review_cart();
        checkout.enter_shipping_info("123 Main St").unwrap();
        let outcome = checkout.process_payment();

        assert!(!outcome.is_rejected());
        let snapshot = checkout.snapshot();
        assert_eq!(snapshot.stage(), CheckoutStage::ShippingEntered);
        assert!(snapshot.paid_at.is_some());
    }

    #[test]
    fn test_invalid_payload_is_an_error() {
        let checkout = shared();

        let err = checkout.add_item("   ").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Checkout(CheckoutError::Validation(_))
        ));
        // Nothing reached the session
        assert_eq!(checkout.with_session(|s| s.journal().count()), 0);
    }

    #[test]
    fn test_payloads_are_trimmed_and_bounded() {
        let checkout = shared();

        checkout.add_item("  Product 1  ").unwrap();
        assert!(checkout.add_item(&"A".repeat(65)).is_err());
        checkout.review_cart();
        assert!(checkout.enter_shipping_info("").is_err());
        checkout.enter_shipping_info(" 123 Main St ").unwrap();

        let snapshot = checkout.snapshot();
        assert_eq!(snapshot.items[0].as_str(), "Product 1");
        assert_eq!(
            snapshot.state.shipping_info().map(|i| i.as_str()),
            Some("123 Main St")
        );
        // Calls with invalid payloads never reach the journal
        assert_eq!(snapshot.journal.len(), 3);
    }

    #[test]
    fn test_rejection_is_not_an_error() {
        let checkout = shared();

        let outcome = checkout.enter_shipping_info("123 Main St").unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::ShippingWithEmptyCart));
    }

    #[test]
    fn test_clones_share_one_session() {
        let checkout = shared();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let checkout = checkout.clone();
                thread::spawn(move || checkout.add_item(&format!("Item {}", i)).unwrap())
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        checkout.with_session(|s| {
            assert_eq!(s.context().item_count(), 8);
            assert_eq!(s.stage(), CheckoutStage::ItemsAdded);
        });
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let checkout = shared();
        checkout.add_item("Product 1").unwrap();

        let poisoner = checkout.clone();
        let _ = thread::spawn(move || {
            poisoner.with_session_mut(|_| panic!("boom"));
        })
        .join();

        assert_eq!(
            checkout.with_session(|s| s.stage()),
            CheckoutStage::ItemsAdded
        );
        assert!(!checkout.review_cart().is_rejected());
    }
}
