//! Channel Transport Seam
//!
//! The support-chat channel rides on an external real-time messaging
//! service. This module defines the trait the core programs against; the
//! concrete transport (socket client, test double) lives outside the core.
//!
//! Events are delivered through a non-blocking poll rather than callbacks,
//! so every state mutation stays on the caller's event loop: the connection
//! manager drains [`ChatTransport::poll_event`] once per frame and applies
//! the results synchronously.

use crate::shared::error::ChatError;
use crate::shared::event::{ChannelEvent, JoinPayload, OutboundMessage};

/// A bidirectional event channel to the support-chat server.
///
/// One transport instance backs one admin session. `open` begins connection
/// establishment; the outcome arrives later as a
/// [`ChannelEvent::Connected`] or [`ChannelEvent::ConnectError`] from
/// `poll_event`. Acknowledgements for emitted messages arrive as
/// [`ChannelEvent::Ack`], at most once per send, or never.
pub trait ChatTransport {
    /// Begin establishing the channel connection
    fn open(&mut self) -> Result<(), ChatError>;

    /// Announce the admin session so the server routes learner messages here
    fn emit_join(&mut self, payload: &JoinPayload) -> Result<(), ChatError>;

    /// Emit an admin message over the channel
    fn emit_message(&mut self, payload: &OutboundMessage) -> Result<(), ChatError>;

    /// Drain the next pending event, if any (non-blocking)
    fn poll_event(&mut self) -> Option<ChannelEvent>;

    /// Tear down the connection and drop any undelivered events
    fn close(&mut self);
}
