//! Conversation Store
//!
//! In-memory mapping from learner identity to conversation thread. The
//! store owns unread accounting and recency ordering; it is mutated only by
//! the chat controller, synchronously on the UI event loop, and lives for
//! the duration of the admin session. Conversations are never deleted while
//! the session is open.

use std::collections::HashMap;

use crate::shared::chat::{ChatMessage, Conversation};

/// In-memory conversation state, keyed by learner id
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: HashMap<String, Conversation>,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an inbound channel message.
    ///
    /// Creates the conversation lazily on first contact. When the message
    /// carries a correlation token matching an existing entry, that entry is
    /// replaced in place (the reconciliation path for echoes of admin
    /// sends); otherwise the message is appended. Learner-authored messages
    /// bump the unread counter unless the conversation is the active one.
    pub fn upsert_from_inbound(&mut self, incoming: ChatMessage, active_user_id: Option<&str>) {
        let conversation = self
            .conversations
            .entry(incoming.user_id.clone())
            .or_insert_with(|| Conversation::new(incoming.user_id.clone()));

        // Learner display name: fill once, never clobber with echo metadata
        if conversation.user_name.is_none() && incoming.is_from_user() {
            conversation.user_name = incoming.sender_name.clone();
        }

        let from_user = incoming.is_from_user();
        let created_at = incoming.created_at.clone();

        let mut delivered = incoming;
        delivered.pending = false;
        delivered.error = false;

        let matched = delivered.client_message_id.as_ref().and_then(|token| {
            conversation
                .messages
                .iter()
                .position(|msg| msg.client_message_id.as_ref() == Some(token))
        });
        match matched {
            Some(index) => {
                tracing::debug!(
                    user_id = %conversation.user_id,
                    index,
                    "reconciling echoed message in place"
                );
                conversation.messages[index] = delivered;
            }
            None => conversation.messages.push(delivered),
        }

        // Arrivals are processed in receipt order, so the newest wins
        conversation.last_message_at = Some(created_at);

        if from_user && active_user_id != Some(conversation.user_id.as_str()) {
            conversation.increment_unread();
        }
    }

    /// Insert an admin-originated optimistic message before acknowledgement
    pub fn insert_optimistic(&mut self, message: ChatMessage) {
        let conversation = self
            .conversations
            .entry(message.user_id.clone())
            .or_insert_with(|| Conversation::new(message.user_id.clone()));
        conversation.last_message_at = Some(message.created_at.clone());
        conversation.messages.push(message);
    }

    /// Mark a message as explicitly rejected by the server.
    ///
    /// Locates the entry by correlation token; no-op if the conversation or
    /// the message is unknown. Idempotent.
    pub fn mark_failed(&mut self, user_id: &str, client_message_id: &str) {
        let Some(conversation) = self.conversations.get_mut(user_id) else {
            return;
        };
        for message in conversation.messages.iter_mut() {
            if message.client_message_id.as_deref() == Some(client_message_id) {
                message.pending = false;
                message.error = true;
            }
        }
    }

    /// Reset a conversation's unread counter; no-op if unknown
    pub fn clear_unread(&mut self, user_id: &str) {
        if let Some(conversation) = self.conversations.get_mut(user_id) {
            conversation.unread_count = 0;
        }
    }

    /// Look up a conversation by learner id
    pub fn get(&self, user_id: &str) -> Option<&Conversation> {
        self.conversations.get(user_id)
    }

    /// Conversations filtered by `filter` (matched case-insensitively
    /// against learner name, id, and last message content), sorted
    /// descending by last activity. Threads with no messages sort last.
    pub fn list(&self, filter: &str) -> Vec<&Conversation> {
        let needle = filter.trim().to_lowercase();
        let mut result: Vec<&Conversation> = self
            .conversations
            .values()
            .filter(|conversation| conversation.matches_filter(&needle))
            .collect();
        result.sort_by_key(|conversation| std::cmp::Reverse(conversation.sort_key()));
        result
    }

    /// Sum of unread counters across all conversations
    pub fn total_unread(&self) -> u32 {
        self.conversations.values().map(|c| c.unread_count).sum()
    }

    /// Number of conversations in the store
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Whether the store holds no conversations
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::chat::{conversation::MAX_UNREAD, SenderRole};

    fn user_message(user_id: &str, content: &str, created_at: &str) -> ChatMessage {
        ChatMessage {
            id: format!("m-{user_id}-{content}"),
            client_message_id: None,
            user_id: user_id.to_string(),
            sender_role: SenderRole::User,
            sender_id: Some(user_id.to_string()),
            sender_name: Some(format!("Learner {user_id}")),
            content: content.to_string(),
            created_at: created_at.to_string(),
            pending: false,
            error: false,
        }
    }

    fn echo(user_id: &str, token: &str, server_id: &str, created_at: &str) -> ChatMessage {
        ChatMessage {
            id: server_id.to_string(),
            client_message_id: Some(token.to_string()),
            user_id: user_id.to_string(),
            sender_role: SenderRole::Admin,
            sender_id: Some("admin-1".to_string()),
            sender_name: Some("Admin".to_string()),
            content: "Hello".to_string(),
            created_at: created_at.to_string(),
            pending: false,
            error: false,
        }
    }

    #[test]
    fn test_inbound_creates_conversation() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-1", "Hi", "2026-01-01T10:00:00Z"), None);

        let conversation = store.get("u-1").unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.user_name.as_deref(), Some("Learner u-1"));
        assert_eq!(conversation.last_message_at.as_deref(), Some("2026-01-01T10:00:00Z"));
        assert_eq!(conversation.unread_count, 1);
    }

    #[test]
    fn test_inbound_appends_in_arrival_order() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-1", "one", "2026-01-01T10:00:00Z"), None);
        store.upsert_from_inbound(user_message("u-1", "two", "2026-01-01T10:01:00Z"), None);
        store.upsert_from_inbound(user_message("u-1", "three", "2026-01-01T10:02:00Z"), None);

        let contents: Vec<&str> = store
            .get("u-1")
            .unwrap()
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_echo_replaces_optimistic_in_place() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-1", "Hi", "2026-01-01T10:00:00Z"), Some("u-1"));

        let optimistic =
            ChatMessage::new_optimistic("u-1", "Hello", "admin-1", "Admin", "c1");
        store.insert_optimistic(optimistic);
        assert_eq!(store.get("u-1").unwrap().messages.len(), 2);

        store.upsert_from_inbound(echo("u-1", "c1", "srv-42", "2026-01-01T10:00:05Z"), Some("u-1"));

        let conversation = store.get("u-1").unwrap();
        assert_eq!(conversation.messages.len(), 2, "echo must not grow the thread");
        let reconciled = &conversation.messages[1];
        assert_eq!(reconciled.id, "srv-42");
        assert!(!reconciled.pending);
        assert!(!reconciled.error);
    }

    #[test]
    fn test_unread_only_for_inactive_learner_messages() {
        let mut store = ConversationStore::new();

        // Active conversation: no unread bump
        store.upsert_from_inbound(user_message("u-1", "Hi", "2026-01-01T10:00:00Z"), Some("u-1"));
        assert_eq!(store.get("u-1").unwrap().unread_count, 0);

        // Inactive conversation: bump by exactly one
        store.upsert_from_inbound(user_message("u-2", "Hi", "2026-01-01T10:01:00Z"), Some("u-1"));
        assert_eq!(store.get("u-2").unwrap().unread_count, 1);

        // Admin echoes never count as unread
        store.upsert_from_inbound(echo("u-2", "c9", "srv-1", "2026-01-01T10:02:00Z"), Some("u-1"));
        assert_eq!(store.get("u-2").unwrap().unread_count, 1);
    }

    #[test]
    fn test_unread_caps_at_display_limit() {
        let mut store = ConversationStore::new();
        for i in 0..(MAX_UNREAD + 50) {
            store.upsert_from_inbound(
                user_message("u-1", &format!("msg {i}"), "2026-01-01T10:00:00Z"),
                None,
            );
        }
        assert_eq!(store.get("u-1").unwrap().unread_count, MAX_UNREAD);
    }

    #[test]
    fn test_clear_unread() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-1", "Hi", "2026-01-01T10:00:00Z"), None);
        assert_eq!(store.get("u-1").unwrap().unread_count, 1);

        store.clear_unread("u-1");
        assert_eq!(store.get("u-1").unwrap().unread_count, 0);

        // Unknown conversation is a no-op
        store.clear_unread("u-404");
    }

    #[test]
    fn test_mark_failed_is_idempotent() {
        let mut store = ConversationStore::new();
        store.insert_optimistic(ChatMessage::new_optimistic(
            "u-1", "Hello", "admin-1", "Admin", "c1",
        ));

        store.mark_failed("u-1", "c1");
        store.mark_failed("u-1", "c1");

        let message = &store.get("u-1").unwrap().messages[0];
        assert!(!message.pending);
        assert!(message.error);

        // Unknown token and unknown conversation are no-ops
        store.mark_failed("u-1", "c404");
        store.mark_failed("u-404", "c1");
    }

    #[test]
    fn test_user_name_not_overwritten_by_echo() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-1", "Hi", "2026-01-01T10:00:00Z"), None);
        store.upsert_from_inbound(echo("u-1", "c1", "srv-1", "2026-01-01T10:01:00Z"), None);
        assert_eq!(store.get("u-1").unwrap().user_name.as_deref(), Some("Learner u-1"));
    }

    #[test]
    fn test_list_sorted_by_recency() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-old", "Hi", "2026-01-01T09:00:00Z"), None);
        store.upsert_from_inbound(user_message("u-new", "Hi", "2026-01-01T11:00:00Z"), None);
        store.upsert_from_inbound(user_message("u-mid", "Hi", "2026-01-01T10:00:00Z"), None);

        let order: Vec<&str> = store.list("").iter().map(|c| c.user_id.as_str()).collect();
        assert_eq!(order, vec!["u-new", "u-mid", "u-old"]);
    }

    #[test]
    fn test_list_filters_case_insensitively() {
        let mut store = ConversationStore::new();
        let mut alice = user_message("u-1", "need help with quiz", "2026-01-01T10:00:00Z");
        alice.sender_name = Some("Alice".to_string());
        store.upsert_from_inbound(alice, None);

        let mut bob = user_message("u-2", "thanks", "2026-01-01T11:00:00Z");
        bob.sender_name = Some("Bob".to_string());
        store.upsert_from_inbound(bob, None);

        let hits = store.list("QUIZ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].user_id, "u-1");

        assert_eq!(store.list("").len(), 2);
        assert!(store.list("nobody").is_empty());
    }

    #[test]
    fn test_total_unread() {
        let mut store = ConversationStore::new();
        store.upsert_from_inbound(user_message("u-1", "a", "2026-01-01T10:00:00Z"), None);
        store.upsert_from_inbound(user_message("u-1", "b", "2026-01-01T10:01:00Z"), None);
        store.upsert_from_inbound(user_message("u-2", "c", "2026-01-01T10:02:00Z"), None);
        assert_eq!(store.total_unread(), 3);
    }
}
