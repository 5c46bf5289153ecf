//! # Admin Console Core
//!
//! The support-chat core wired together for one admin session.
//!
//! ## Architecture
//!
//! - **Conversation Store**: per-learner threads, unread counts, recency
//!   ordering
//! - **Connection Manager**: channel lifecycle (idle, connecting, online,
//!   error) and the join announcement
//! - **Chat Controller**: composition root driven by the UI event loop;
//!   implements the optimistic-send and echo-reconciliation protocol
//! - **Profile Client**: resolves the admin identity before connecting
//!
//! ## Key Components
//!
//! - `store.rs`: conversation state management
//! - `transport.rs`: the seam to the external channel transport
//! - `connection.rs`: connection lifecycle state machine
//! - `controller.rs`: operations exposed to the presentation layer
//! - `profile.rs`: admin identity provider
//! - `config.rs`: console configuration

pub mod config;
pub mod connection;
pub mod controller;
pub mod profile;
pub mod store;
pub mod transport;

// Re-export main types
pub use config::{ConsoleConfig, ConsoleConfigBuilder, ConfigError};
pub use connection::{ConnectionManager, ConnectionState};
pub use controller::ChatController;
pub use profile::{AdminProfile, ProfileClient};
pub use store::ConversationStore;
pub use transport::ChatTransport;
