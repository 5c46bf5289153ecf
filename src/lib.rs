//! Supportdesk - Admin Support Chat Core
//!
//! Supportdesk is the real-time core of an admin support-chat console for a
//! learning-management platform. It implements the bidirectional messaging
//! protocol between an admin session and learner clients: conversation state
//! management, optimistic message delivery with echo-based reconciliation,
//! unread-count tracking, and channel-connection lifecycle handling.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Wire types and data structures
//!   - Message and conversation shapes
//!   - Channel protocol events and acknowledgements
//!   - Error types
//!
//! - **`console`** - The admin-console core
//!   - Conversation store (threads, unread counts, recency ordering)
//!   - Channel connection lifecycle manager
//!   - Chat controller (composition root exposed to the presentation layer)
//!   - Admin profile client and configuration
//!
//! # Usage
//!
//! ```rust,no_run
//! use supportdesk::console::{ChatController, ChatTransport};
//!
//! # fn example<T: ChatTransport>(transport: T, profile: supportdesk::console::AdminProfile) {
//! let mut controller = ChatController::new(transport);
//! controller.set_admin(profile);
//!
//! // Drive from the UI event loop: drain channel events, then read state.
//! controller.pump();
//! let conversations = controller.search("");
//! # }
//! ```
//!
//! # Concurrency Model
//!
//! The core is single-threaded and event-driven: all state mutation happens
//! inside [`console::ChatController::pump`] and the user-initiated operations,
//! invoked from the hosting UI's event loop. The transport delivers events
//! through a non-blocking poll, so no internal locking is needed.
//!
//! # Error Handling
//!
//! Failures are contained locally and mapped to UI-visible state (connection
//! status, banner text, per-message delivery flags); nothing in this core is
//! fatal to the process. Custom error types live in `shared::error`.

/// Shared types and data structures
pub mod shared;

/// Admin-console core: store, connection lifecycle, controller
pub mod console;
