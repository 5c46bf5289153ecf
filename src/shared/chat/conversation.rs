//! Conversation Data Structure
//!
//! Represents the thread between one learner and the admin console.

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// Unread counts are capped for display
pub const MAX_UNREAD: u32 = 999;

/// Represents one learner's conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Learner identity; one conversation per learner
    pub user_id: String,
    /// Best-known display name of the learner
    pub user_name: Option<String>,
    /// Messages in arrival order. Reconciliation replaces entries in place,
    /// never reorders.
    pub messages: Vec<ChatMessage>,
    /// Timestamp of the most recent message touching this thread (RFC3339)
    pub last_message_at: Option<String>,
    /// Learner messages not yet viewed by the admin
    pub unread_count: u32,
}

impl Conversation {
    /// Create an empty conversation for a learner
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: None,
            messages: Vec::new(),
            last_message_at: None,
            unread_count: 0,
        }
    }

    /// The most recent message in the thread, if any
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Bump the unread counter, saturating at [`MAX_UNREAD`]
    pub fn increment_unread(&mut self) {
        self.unread_count = (self.unread_count + 1).min(MAX_UNREAD);
    }

    /// Case-insensitive match against the learner's name, id, and the
    /// content of the last message. `needle` must already be lowercased.
    pub fn matches_filter(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.user_name
            .as_ref()
            .map(|name| name.to_lowercase().contains(needle))
            .unwrap_or(false)
            || self.user_id.to_lowercase().contains(needle)
            || self
                .last_message()
                .map(|msg| msg.content.to_lowercase().contains(needle))
                .unwrap_or(false)
    }

    /// Recency key for sorting: unix milliseconds of `last_message_at`, or
    /// the epoch for a thread with no messages yet.
    pub fn sort_key(&self) -> i64 {
        self.last_message_at
            .as_deref()
            .and_then(|value| chrono::DateTime::parse_from_rfc3339(value).ok())
            .map(|ts| ts.timestamp_millis())
            .unwrap_or(0)
    }
}
