//! # sync-types
//!
//! Wire format types for the turnsync state-synchronization protocol.
//!
//! This crate provides the foundational types used across all turnsync crates:
//! - [`SessionId`], [`PlayerId`], [`StateId`] - Identity and sequence types
//! - [`ActionEnvelope`] - A dispatched intent with its origin tag
//! - [`ClientMessage`], [`ServerMessage`] - Protocol messages (sync, action)
//! - [`Snapshot`] - The contract authoritative game state must satisfy
//! - [`SyncError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod envelope;
mod error;
mod ids;
mod messages;
mod state;

pub use envelope::{ActionEnvelope, ActionKind, Origin};
pub use error::SyncError;
pub use ids::{PlayerId, SessionId, StateId};
pub use messages::{ActionRelay, ClientMessage, MessageKind, ServerMessage, StatePush, SyncRequest};
pub use state::Snapshot;
