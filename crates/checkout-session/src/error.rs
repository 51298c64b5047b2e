//! # Session Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Serialization  │  │     Checkout            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Serialization  │  │  Checkout (rejection or │ │
//! │  │  ConfigLoad...  │  │  Io             │  │  invalid payload)       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_core::{CheckoutError, ValidationError};
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config values out of range.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Serialization / I/O
    // =========================================================================
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot fields contradict each other.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    // =========================================================================
    // Checkout
    // =========================================================================
    /// Invalid payload, or a rejection the caller chose to treat as an error.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    // =========================================================================
    // Logging
    // =========================================================================
    /// A global tracing subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Checkout(CheckoutError::Validation(err))
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}
