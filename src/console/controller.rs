//! Chat Controller
//!
//! Composition root of the support-chat core. One controller exists per
//! admin session: it owns the conversation store and the connection
//! manager, drains channel events on the UI event loop, and exposes the
//! operations the presentation layer calls (select, send, search, drafts,
//! reconnect). The presentation layer only reads derived projections; it
//! never mutates state directly.
//!
//! Delivery reconciliation is a protocol convention implemented here
//! together with the store: an admin send inserts an optimistic entry,
//! transmits with a correlation token, and resolves through exactly one of
//! three terminal paths - a rejection acknowledgement (entry marked
//! failed), the server's echo (entry replaced in place), or neither (entry
//! stays pending indefinitely; an accepted limitation).

use std::collections::HashMap;

use crate::shared::chat::{ChatMessage, Conversation, SenderRole};
use crate::shared::event::{ChannelEvent, OutboundMessage, SendAck};

use super::connection::{ConnectionManager, ConnectionState};
use super::profile::AdminProfile;
use super::store::ConversationStore;
use super::transport::ChatTransport;

/// The support-chat composition root for one admin session
pub struct ChatController<T: ChatTransport> {
    connection: ConnectionManager<T>,
    store: ConversationStore,
    admin: Option<AdminProfile>,
    selected_user_id: Option<String>,
    /// In-progress reply per learner, preserved across selection changes
    drafts: HashMap<String, String>,
    /// Correlation token -> learner id, for in-flight sends
    in_flight: HashMap<String, String>,
    connection_error: Option<String>,
}

impl<T: ChatTransport> ChatController<T> {
    /// Create a controller around an unopened transport. The channel is not
    /// connected until an admin identity is provided via
    /// [`ChatController::set_admin`].
    pub fn new(transport: T) -> Self {
        Self {
            connection: ConnectionManager::new(transport),
            store: ConversationStore::new(),
            admin: None,
            selected_user_id: None,
            drafts: HashMap::new(),
            in_flight: HashMap::new(),
            connection_error: None,
        }
    }

    /// Provide the resolved admin identity and begin connecting
    pub fn set_admin(&mut self, profile: AdminProfile) {
        let admin_id = profile.id.clone();
        self.admin = Some(profile);
        self.connection_error = None;
        self.connection.connect(admin_id);
    }

    /// Drain channel events and apply them to the conversation store.
    ///
    /// Call once per UI frame. All state mutation happens here or in the
    /// user-initiated operations, never concurrently.
    pub fn pump(&mut self) {
        for event in self.connection.pump() {
            match event {
                ChannelEvent::Message(message) => self.handle_incoming(message),
                ChannelEvent::Ack(ack) => self.handle_ack(ack),
                // Connection-level events are consumed by the manager
                _ => {}
            }
        }
        if let ConnectionState::Error(message) = self.connection.state() {
            self.connection_error = Some(message.clone());
        }
    }

    fn handle_incoming(&mut self, incoming: ChatMessage) {
        if incoming.user_id.is_empty() {
            tracing::warn!("dropping inbound message without a learner id");
            return;
        }
        tracing::debug!(
            user_id = %incoming.user_id,
            message_id = %incoming.id,
            "inbound channel message"
        );
        if let Some(token) = incoming.client_message_id.as_deref() {
            // The echo is authoritative; stop tracking the correlation
            self.in_flight.remove(token);
        }
        self.store
            .upsert_from_inbound(incoming, self.selected_user_id.as_deref());
    }

    fn handle_ack(&mut self, ack: SendAck) {
        let Some(token) = ack.client_message_id.clone() else {
            return;
        };
        if ack.is_rejection() {
            if let Some(user_id) = self.in_flight.remove(&token) {
                let reason = ack
                    .error
                    .unwrap_or_else(|| "Unable to send message. Please try again.".to_string());
                tracing::warn!(user_id = %user_id, token = %token, reason = %reason, "send rejected");
                self.store.mark_failed(&user_id, &token);
                self.connection_error = Some(reason);
            }
        } else {
            // Success ack: delivery is confirmed by the echo, which still
            // carries the token. Nothing to resolve yet.
            tracing::debug!(token = %token, "send acknowledged");
        }
    }

    /// Make a conversation active, clearing its unread counter
    pub fn select_conversation(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        self.store.clear_unread(&user_id);
        self.selected_user_id = Some(user_id);
    }

    /// Send a draft to a learner.
    ///
    /// No-ops when the channel is not online, no admin identity is
    /// resolved, or the draft trims to empty. Otherwise inserts an
    /// optimistic entry, clears the learner's draft buffer, and transmits
    /// with a fresh correlation token. Returns immediately; reconciliation
    /// happens via [`ChatController::pump`].
    pub fn send_message(&mut self, user_id: &str, draft: &str) {
        if !self.connection.is_online() {
            return;
        }
        let Some(admin) = self.admin.as_ref() else {
            return;
        };
        let content = draft.trim();
        if content.is_empty() {
            return;
        }

        let token = next_client_message_id();
        let message = ChatMessage::new_optimistic(
            user_id,
            content,
            admin.id.clone(),
            admin.display_name(),
            token.clone(),
        );
        let payload = OutboundMessage {
            user_id: user_id.to_string(),
            content: content.to_string(),
            sender_id: admin.id.clone(),
            sender_name: admin.display_name().to_string(),
            sender_role: SenderRole::Admin,
            client_message_id: token.clone(),
        };

        tracing::info!(user_id = %user_id, token = %token, "sending admin message");
        self.store.insert_optimistic(message);
        self.drafts.remove(user_id);
        self.connection_error = None;
        self.in_flight.insert(token.clone(), user_id.to_string());

        if let Err(err) = self.connection.emit_message(&payload) {
            // Synchronous transport refusal behaves like a rejection
            tracing::warn!(user_id = %user_id, error = %err, "transport refused send");
            self.in_flight.remove(&token);
            self.store.mark_failed(user_id, &token);
            self.connection_error = Some(err.to_string());
        }
    }

    /// Filtered conversation list, most recent first. Pure read.
    pub fn search(&self, term: &str) -> Vec<&Conversation> {
        self.store.list(term)
    }

    /// Tear down the current connection and start a fresh one
    pub fn reconnect(&mut self) {
        self.connection_error = None;
        self.connection.reconnect();
    }

    /// Close the channel on component teardown
    pub fn shutdown(&mut self) {
        self.connection.disconnect();
    }

    /// Current draft for a learner, empty if none
    pub fn draft(&self, user_id: &str) -> &str {
        self.drafts.get(user_id).map(String::as_str).unwrap_or("")
    }

    /// Update the draft buffer for a learner
    pub fn set_draft(&mut self, user_id: impl Into<String>, text: impl Into<String>) {
        self.drafts.insert(user_id.into(), text.into());
    }

    /// The active conversation id, if any
    pub fn selected_user_id(&self) -> Option<&str> {
        self.selected_user_id.as_deref()
    }

    /// The active conversation, if any
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.selected_user_id
            .as_deref()
            .and_then(|id| self.store.get(id))
    }

    /// Look up any conversation by learner id
    pub fn conversation(&self, user_id: &str) -> Option<&Conversation> {
        self.store.get(user_id)
    }

    /// Unread badge total across all conversations
    pub fn total_unread(&self) -> u32 {
        self.store.total_unread()
    }

    /// Connection status for the UI badge
    pub fn connection_state(&self) -> &ConnectionState {
        self.connection.state()
    }

    /// Banner text for the most recent connection or send failure
    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    /// Dismiss the error banner
    pub fn clear_connection_error(&mut self) {
        self.connection_error = None;
    }

    /// When the channel last connected, RFC3339
    pub fn connected_at(&self) -> Option<&str> {
        self.connection.connected_at()
    }

    /// The resolved admin identity, if any
    pub fn admin(&self) -> Option<&AdminProfile> {
        self.admin.as_ref()
    }
}

/// Correlation token for an admin send: time plus a random suffix, unique
/// for the sending session and never reused.
fn next_client_message_id() -> String {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string()[..6].to_string();
    format!("admin-{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}
