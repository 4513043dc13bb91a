//! # sync-core
//!
//! Pure logic for turnsync (no I/O, instant tests).
//!
//! This crate holds the decisions of the synchronization protocol without
//! any channel or container access: which dispatched intents travel
//! upstream, which inbound pushes are accepted, and the sync lifecycle of a
//! store instance. All functions are pure - same input, same output - so
//! they test without mocks.
//!
//! The actual I/O (emitting on the channel, mutating the local container) is
//! performed by `sync-client`, which consults these decisions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod phase;

pub use filter::{accepts_push, relayable, should_relay};
pub use phase::SyncPhase;
