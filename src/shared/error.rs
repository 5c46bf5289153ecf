//! Shared Error Types
//!
//! This module defines the error taxonomy of the support-chat core. All
//! failures are contained locally and mapped to UI-visible state; none of
//! them is fatal to the process.
//!
//! # Error Categories
//!
//! - `Connection` - channel failed to establish or dropped; recoverable by
//!   manual reconnect
//! - `SendRejected` - the server explicitly declined a message
//! - `ProfileLoad` - the admin identity could not be resolved, which blocks
//!   connecting entirely
//! - `Serialization` - JSON encode/decode failures at the channel boundary
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

/// Errors surfaced by the support-chat core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Channel connection failure
    #[error("connection error: {message}")]
    Connection {
        /// Human-readable error message
        message: String,
    },

    /// The server explicitly rejected a send
    #[error("send rejected: {message}")]
    SendRejected {
        /// Human-readable rejection reason
        message: String,
    },

    /// Admin identity could not be loaded
    #[error("profile load failed: {message}")]
    ProfileLoad {
        /// Human-readable error message
        message: String,
    },

    /// JSON serialization or deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },
}

impl ChatError {
    /// Create a new connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection { message: message.into() }
    }

    /// Create a new send-rejection error
    pub fn send_rejected(message: impl Into<String>) -> Self {
        Self::SendRejected { message: message.into() }
    }

    /// Create a new profile-load error
    pub fn profile_load(message: impl Into<String>) -> Self {
        Self::ProfileLoad { message: message.into() }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into() }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
