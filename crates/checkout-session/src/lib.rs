//! # checkout-session
//!
//! Runtime layer around the checkout state machine.
//!
//! ## Module Organization
//! ```text
//! checkout_session/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── session.rs      ◄─── CheckoutSession: id, journal, snapshot
//! ├── shared.rs       ◄─── SharedCheckout: Arc<Mutex<CheckoutSession>>
//! ├── config.rs       ◄─── SessionConfig: TOML file + env overrides
//! ├── logging.rs      ◄─── tracing subscriber setup
//! └── error.rs        ◄─── SessionError
//! ```
//!
//! ## Example Usage
//! ```rust
//! use checkout_session::{SessionConfig, SharedCheckout};
//!
//! # fn main() -> Result<(), checkout_session::SessionError> {
//! let config = SessionConfig::load_or_default(None);
//! let checkout = SharedCheckout::new(&config);
//!
//! checkout.add_item("Product 1")?;
//! checkout.review_cart();
//! checkout.enter_shipping_info("123 Main St, City")?;
//! checkout.process_payment().into_result()?;
//!
//! let json = checkout.snapshot().to_json()?;
//! assert!(json.contains("shipping_entered"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod shared;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use logging::{init_tracing, DEFAULT_LOG_FILTER};
pub use session::{CheckoutSession, EntryResult, JournalEntry, SessionSnapshot};
pub use shared::SharedCheckout;
