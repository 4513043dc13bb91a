//! Mock channel for testing.
//!
//! Captures emitted messages and lets tests deliver inbound events to
//! registered handlers, without a real transport.

use std::sync::{Arc, Mutex};

use turnsync_types::ClientMessage;

use super::{Channel, ChannelError, ChannelEvent, EventHandler, EventKind};

/// Mock channel for testing.
///
/// Clones share state, so a test can keep a handle for verification while
/// the client stack owns another.
#[derive(Default)]
pub struct MockChannel {
    inner: Arc<Mutex<MockChannelInner>>,
}

#[derive(Default)]
struct MockChannelInner {
    emitted: Vec<ClientMessage>,
    handlers: Vec<(EventKind, EventHandler)>,
    fail_next_emit: Option<String>,
}

impl MockChannel {
    /// Create a new mock channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages emitted so far, in order.
    pub fn emitted(&self) -> Vec<ClientMessage> {
        let inner = self.inner.lock().unwrap();
        inner.emitted.clone()
    }

    /// The most recently emitted message.
    pub fn last_emitted(&self) -> Option<ClientMessage> {
        let inner = self.inner.lock().unwrap();
        inner.emitted.last().cloned()
    }

    /// Cause the next `emit()` to fail with the given error.
    pub fn fail_next_emit(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_emit = Some(error.to_string());
    }

    /// Deliver an inbound event to every handler registered for its kind.
    ///
    /// Handlers run outside the internal lock, so they are free to emit back
    /// into the channel.
    pub fn deliver(&self, event: ChannelEvent) {
        let handlers: Vec<EventHandler> = {
            let inner = self.inner.lock().unwrap();
            inner
                .handlers
                .iter()
                .filter(|(kind, _)| *kind == event.kind())
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };
        for handler in handlers {
            handler(&event);
        }
    }

    /// Clear all state (messages, handlers, pending failures).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockChannelInner::default();
    }
}

impl Clone for MockChannel {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Channel for MockChannel {
    fn emit(&self, message: ClientMessage) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_emit.take() {
            return Err(ChannelError::EmitFailed(error));
        }

        inner.emitted.push(message);
        Ok(())
    }

    fn on(&self, kind: EventKind, handler: EventHandler) {
        let mut inner = self.inner.lock().unwrap();
        inner.handlers.push((kind, handler));
    }
}
