//! Chat Message Data Structure
//!
//! Represents a single message in a support conversation.

use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    /// A learner on the platform
    User,
    /// An administrator in the console
    Admin,
    /// Server-generated notice
    System,
}

/// Delivery state of a message, derived from its flags.
///
/// A message is in exactly one of these states; `pending` and `error` are
/// never both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// Sent locally, not yet confirmed by the server
    Pending,
    /// Confirmed by the server (or inbound from another party)
    Delivered,
    /// Explicitly rejected by the server
    Failed,
}

/// Represents a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message ID. Stable once the server has acknowledged the
    /// message; for an optimistic message it temporarily holds the value of
    /// `client_message_id`.
    pub id: String,
    /// Sender-generated correlation token. Set on admin-originated messages
    /// and on their server echoes; never reused across sends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
    /// Learner identity owning the conversation thread
    pub user_id: String,
    /// Author role
    pub sender_role: SenderRole,
    /// Author identity, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    /// Author display name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Message text (non-empty after trimming)
    pub content: String,
    /// When the message was created (RFC3339 string). Client-assigned for
    /// optimistic messages, server-assigned once acknowledged.
    pub created_at: String,
    /// True from creation until the server confirms or rejects delivery
    #[serde(default)]
    pub pending: bool,
    /// True if the server explicitly rejected delivery
    #[serde(default)]
    pub error: bool,
}

impl ChatMessage {
    /// Create an optimistic admin-authored message awaiting confirmation.
    ///
    /// `id` starts out equal to the correlation token; reconciliation
    /// replaces the whole entry with the server's authoritative copy.
    pub fn new_optimistic(
        user_id: impl Into<String>,
        content: impl Into<String>,
        sender_id: impl Into<String>,
        sender_name: impl Into<String>,
        client_message_id: impl Into<String>,
    ) -> Self {
        let client_message_id = client_message_id.into();
        Self {
            id: client_message_id.clone(),
            client_message_id: Some(client_message_id),
            user_id: user_id.into(),
            sender_role: SenderRole::Admin,
            sender_id: Some(sender_id.into()),
            sender_name: Some(sender_name.into()),
            content: content.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            pending: true,
            error: false,
        }
    }

    /// Derive the delivery state from the pending/error flags
    pub fn delivery_state(&self) -> DeliveryState {
        if self.pending {
            DeliveryState::Pending
        } else if self.error {
            DeliveryState::Failed
        } else {
            DeliveryState::Delivered
        }
    }

    /// Whether this message was authored by a learner
    pub fn is_from_user(&self) -> bool {
        self.sender_role == SenderRole::User
    }
}
