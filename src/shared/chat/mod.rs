//! Chat Types Module
//!
//! Data structures for the support-chat subsystem:
//!
//! - `ChatMessage` - A single utterance in a conversation thread
//! - `Conversation` - The per-learner thread with unread accounting
//!
//! # Usage
//!
//! ```rust
//! use supportdesk::shared::chat::{ChatMessage, Conversation, SenderRole};
//! ```

pub mod conversation;
pub mod message;

// Re-export all types
pub use conversation::Conversation;
pub use message::{ChatMessage, DeliveryState, SenderRole};
