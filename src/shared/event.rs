//! Channel Protocol Events
//!
//! This module defines the logical contract of the support-chat channel:
//! the outbound join and send payloads, the transport acknowledgement, and
//! the inbound event stream consumed by the connection manager. The channel
//! transport itself (a socket service) is an external collaborator; these
//! types are what flows across that seam.

use serde::{Deserialize, Serialize};

use crate::shared::chat::{ChatMessage, SenderRole};

/// Outbound event announcing the admin session to the server
pub const EVENT_JOIN_ADMIN: &str = "support-chat:join-admin";
/// Outbound event carrying an admin message
pub const EVENT_SEND_MESSAGE: &str = "support-chat:send-message";
/// Inbound event carrying a chat message (including echoes of our own sends)
pub const EVENT_MESSAGE: &str = "support-chat:message";

/// Payload of the join announcement, sent once per successful connection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    /// The admin identity the server should route learner messages to
    pub admin_id: String,
}

/// Payload of an admin-originated send
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    /// Learner thread the message belongs to
    pub user_id: String,
    /// Trimmed, non-empty message text
    pub content: String,
    /// Sending admin's id
    pub sender_id: String,
    /// Sending admin's display name
    pub sender_name: String,
    /// Always [`SenderRole::Admin`] for console sends
    pub sender_role: SenderRole,
    /// Correlation token matched against the eventual echo
    pub client_message_id: String,
}

/// Transport acknowledgement for a send.
///
/// The transport invokes this at most once per send. Absence of an
/// acknowledgement is a distinct, expected state: the message simply stays
/// pending until its echo arrives (or forever, on a silent partition).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendAck {
    /// Explicit success/failure; `Some(false)` is the only rejection signal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Human-readable rejection reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server-assigned id, when the server reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Correlation token of the send being acknowledged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
}

impl SendAck {
    /// Whether this acknowledgement explicitly rejects the send
    pub fn is_rejection(&self) -> bool {
        self.success == Some(false)
    }
}

/// Events delivered by the channel transport, drained via a non-blocking
/// poll on the UI event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The channel connection was established
    Connected,
    /// The channel failed to establish
    ConnectError {
        /// Human-readable error
        message: String,
    },
    /// The channel dropped (server-initiated or network loss)
    Disconnected,
    /// An inbound chat message (learner-authored, or the echo of our own)
    Message(ChatMessage),
    /// Acknowledgement of a previously emitted send
    Ack(SendAck),
}
