//! Channel abstraction for turnsync.
//!
//! The channel is the injected transport seam: the core emits protocol
//! messages through it and subscribes to inbound events on it, never
//! constructing a transport itself. A real implementation wraps a network
//! connection; [`MockChannel`] is the deterministic test double.
//!
//! # Design
//!
//! - `emit()` is fire-and-forget: no acknowledgement is awaited, and the
//!   core treats failures as invisible (logged, never raised).
//! - `on()` registers a handler for one kind of inbound event; handlers are
//!   invoked in delivery order (FIFO per channel, not guaranteed across
//!   reconnects).

mod mock;

pub use mock::MockChannel;

use std::sync::Arc;
use thiserror::Error;

use turnsync_types::{ClientMessage, ServerMessage};

/// Channel errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Not connected.
    #[error("not connected")]
    NotConnected,

    /// Emit failed.
    #[error("emit failed: {0}")]
    EmitFailed(String),

    /// Channel closed.
    #[error("channel closed")]
    Closed,
}

/// Inbound event kinds a handler can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Transport-level connection established.
    Connect,
    /// Transport-level connection lost.
    Disconnect,
    /// An authoritative state push arrived from the peer.
    Sync,
}

/// An inbound event delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Connection established (no payload).
    Connected,
    /// Connection lost (no payload).
    Disconnected,
    /// A protocol message from the peer.
    Message(ServerMessage),
}

impl ChannelEvent {
    /// The kind handlers subscribe to for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Connected => EventKind::Connect,
            Self::Disconnected => EventKind::Disconnect,
            Self::Message(ServerMessage::Sync(_)) => EventKind::Sync,
        }
    }
}

/// Handler for inbound channel events.
pub type EventHandler = Arc<dyn Fn(&ChannelEvent) + Send + Sync>;

/// Bidirectional event channel to the remote peer.
///
/// Implementations own reconnection; this core does not retry emissions or
/// re-register handlers across connection loss.
pub trait Channel: Send + Sync {
    /// Send a message to the peer, fire-and-forget.
    fn emit(&self, message: ClientMessage) -> Result<(), ChannelError>;

    /// Register a handler for one kind of inbound event.
    fn on(&self, kind: EventKind, handler: EventHandler);
}
