//! Shared Module
//!
//! This module contains the types and data structures exchanged over the
//! support-chat channel. All types are designed for serialization and match
//! the channel's JSON payload shape (camelCase field names).

/// Chat message and conversation types
pub mod chat;

/// Channel protocol events and acknowledgements
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use chat::{ChatMessage, Conversation, DeliveryState, SenderRole};
pub use error::ChatError;
pub use event::{ChannelEvent, JoinPayload, OutboundMessage, SendAck};
