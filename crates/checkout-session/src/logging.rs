//! # Logging
//!
//! Installs the global `tracing` subscriber for an application embedding
//! the checkout.
//!
//! Status text from the state machine (transitions, acceptances, soft
//! rejections) is emitted as structured events by `checkout-core`; this
//! module only decides where they go.

use tracing_subscriber::EnvFilter;

use crate::error::{SessionError, SessionResult};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,checkout_core=debug,checkout_session=debug";

/// Initializes the fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> SessionResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| SessionError::LoggingInit(e.to_string()))
}
