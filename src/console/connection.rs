//! Connection Lifecycle Manager
//!
//! Owns the single channel connection of an admin session: connect, join,
//! receive, reconnect-on-demand, disconnect-on-teardown. The manager is the
//! only component that writes to the transport's connection; everything
//! else emits through it.

use crate::shared::error::ChatError;
use crate::shared::event::{ChannelEvent, JoinPayload, OutboundMessage};

use super::transport::ChatTransport;

/// Connection status reported to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection, none in progress
    Idle,
    /// Connection establishment in flight
    Connecting,
    /// Channel established and the admin session announced
    Online,
    /// Establishment failed or the channel dropped with an error
    Error(String),
}

/// Lifecycle manager for the channel connection
pub struct ConnectionManager<T: ChatTransport> {
    transport: T,
    state: ConnectionState,
    admin_id: Option<String>,
    connected_at: Option<String>,
    attempt: u32,
}

impl<T: ChatTransport> ConnectionManager<T> {
    /// Create a manager around an unopened transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ConnectionState::Idle,
            admin_id: None,
            connected_at: None,
            attempt: 0,
        }
    }

    /// Begin connecting on behalf of an admin identity.
    ///
    /// The outcome arrives asynchronously through [`ConnectionManager::pump`].
    pub fn connect(&mut self, admin_id: impl Into<String>) {
        let admin_id = admin_id.into();
        tracing::info!(admin_id = %admin_id, attempt = self.attempt, "opening support channel");
        self.admin_id = Some(admin_id);
        self.state = ConnectionState::Connecting;
        if let Err(err) = self.transport.open() {
            tracing::warn!(error = %err, "channel open failed");
            self.state = ConnectionState::Error(err.to_string());
        }
    }

    /// Tear down the current connection and re-run the connect sequence.
    ///
    /// Events still queued on the old connection are dropped; messages that
    /// were pending stay pending unless a matching echo later arrives on
    /// the new connection.
    pub fn reconnect(&mut self) {
        self.transport.close();
        self.attempt += 1;
        match self.admin_id.clone() {
            Some(admin_id) => self.connect(admin_id),
            None => self.state = ConnectionState::Idle,
        }
    }

    /// Close the channel and return to idle (component teardown)
    pub fn disconnect(&mut self) {
        self.transport.close();
        self.state = ConnectionState::Idle;
    }

    /// Drain transport events, applying connection-level ones and returning
    /// the rest (messages and acknowledgements) for the controller.
    pub fn pump(&mut self) -> Vec<ChannelEvent> {
        let mut passthrough = Vec::new();
        while let Some(event) = self.transport.poll_event() {
            match event {
                ChannelEvent::Connected => {
                    self.state = ConnectionState::Online;
                    self.connected_at = Some(chrono::Utc::now().to_rfc3339());
                    if let Some(admin_id) = self.admin_id.clone() {
                        tracing::info!(admin_id = %admin_id, "channel online, joining as admin");
                        if let Err(err) = self.transport.emit_join(&JoinPayload { admin_id }) {
                            tracing::warn!(error = %err, "join announcement failed");
                            self.state = ConnectionState::Error(err.to_string());
                        }
                    }
                }
                ChannelEvent::ConnectError { message } => {
                    tracing::warn!(error = %message, "channel connect error");
                    self.state = ConnectionState::Error(message);
                }
                ChannelEvent::Disconnected => {
                    tracing::info!("channel disconnected");
                    self.state = ConnectionState::Idle;
                }
                other => passthrough.push(other),
            }
        }
        passthrough
    }

    /// Emit an admin message; fails unless the channel is online
    pub fn emit_message(&mut self, payload: &OutboundMessage) -> Result<(), ChatError> {
        if self.state != ConnectionState::Online {
            return Err(ChatError::connection("channel is not online"));
        }
        self.transport.emit_message(payload)
    }

    /// Current lifecycle state
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Whether the channel is established and joined
    pub fn is_online(&self) -> bool {
        self.state == ConnectionState::Online
    }

    /// When the current (or last) connection was established, RFC3339
    pub fn connected_at(&self) -> Option<&str> {
        self.connected_at.as_deref()
    }

    /// How many manual reconnects have been requested
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}
