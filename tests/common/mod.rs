//! Shared test helpers
//!
//! A scripted channel transport for driving the controller without a real
//! socket service, plus message constructors used across test files.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use supportdesk::console::ChatTransport;
use supportdesk::shared::chat::{ChatMessage, SenderRole};
use supportdesk::shared::error::ChatError;
use supportdesk::shared::event::{ChannelEvent, JoinPayload, OutboundMessage, SendAck};

#[derive(Default)]
pub struct MockState {
    pub queued: VecDeque<ChannelEvent>,
    pub joins: Vec<JoinPayload>,
    pub sent: Vec<OutboundMessage>,
    pub opens: u32,
    pub closes: u32,
    /// When set, `emit_message` fails synchronously
    pub refuse_sends: bool,
}

/// In-memory transport double. Clones share state, so a test can keep a
/// handle while the controller owns the other: queue inbound events through
/// the handle, inspect what the core emitted afterwards.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the connect event, as the transport would on establishment
    pub fn script_connected(&self) {
        self.state.borrow_mut().queued.push_back(ChannelEvent::Connected);
    }

    pub fn script_connect_error(&self, message: &str) {
        self.state.borrow_mut().queued.push_back(ChannelEvent::ConnectError {
            message: message.to_string(),
        });
    }

    pub fn script_disconnected(&self) {
        self.state.borrow_mut().queued.push_back(ChannelEvent::Disconnected);
    }

    pub fn script_message(&self, message: ChatMessage) {
        self.state.borrow_mut().queued.push_back(ChannelEvent::Message(message));
    }

    pub fn script_ack(&self, ack: SendAck) {
        self.state.borrow_mut().queued.push_back(ChannelEvent::Ack(ack));
    }

    pub fn set_refuse_sends(&self, refuse: bool) {
        self.state.borrow_mut().refuse_sends = refuse;
    }

    pub fn joins(&self) -> Vec<JoinPayload> {
        self.state.borrow().joins.clone()
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.state.borrow().sent.clone()
    }

    pub fn opens(&self) -> u32 {
        self.state.borrow().opens
    }

    pub fn closes(&self) -> u32 {
        self.state.borrow().closes
    }
}

impl ChatTransport for MockTransport {
    fn open(&mut self) -> Result<(), ChatError> {
        self.state.borrow_mut().opens += 1;
        Ok(())
    }

    fn emit_join(&mut self, payload: &JoinPayload) -> Result<(), ChatError> {
        self.state.borrow_mut().joins.push(payload.clone());
        Ok(())
    }

    fn emit_message(&mut self, payload: &OutboundMessage) -> Result<(), ChatError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_sends {
            return Err(ChatError::connection("transport refused"));
        }
        state.sent.push(payload.clone());
        Ok(())
    }

    fn poll_event(&mut self) -> Option<ChannelEvent> {
        self.state.borrow_mut().queued.pop_front()
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.closes += 1;
        state.queued.clear();
    }
}

/// A learner-authored inbound message
pub fn learner_message(user_id: &str, name: &str, content: &str, created_at: &str) -> ChatMessage {
    ChatMessage {
        id: format!("m-{user_id}-{created_at}"),
        client_message_id: None,
        user_id: user_id.to_string(),
        sender_role: SenderRole::User,
        sender_id: Some(user_id.to_string()),
        sender_name: Some(name.to_string()),
        content: content.to_string(),
        created_at: created_at.to_string(),
        pending: false,
        error: false,
    }
}

/// The server's echo of an admin send, carrying the correlation token
pub fn admin_echo(user_id: &str, token: &str, server_id: &str, content: &str) -> ChatMessage {
    ChatMessage {
        id: server_id.to_string(),
        client_message_id: Some(token.to_string()),
        user_id: user_id.to_string(),
        sender_role: SenderRole::Admin,
        sender_id: Some("admin-1".to_string()),
        sender_name: Some("Admin".to_string()),
        content: content.to_string(),
        created_at: "2026-02-01T12:00:05Z".to_string(),
        pending: false,
        error: false,
    }
}

/// A resolved admin identity
pub fn admin_profile() -> supportdesk::console::AdminProfile {
    supportdesk::console::AdminProfile {
        id: "admin-1".to_string(),
        email: "admin@lms.local".to_string(),
        full_name: Some("Dana Admin".to_string()),
        role: "admin".to_string(),
        is_active: true,
        is_blocked: false,
    }
}
