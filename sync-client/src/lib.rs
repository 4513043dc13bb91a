//! # sync-client
//!
//! Client library for the turnsync state-synchronization protocol.
//!
//! Keeps a local copy of authoritative game state consistent with a remote
//! source of truth over an unreliable, possibly-reconnecting connection,
//! while forwarding local optimistic actions upstream.
//!
//! ## Architecture
//!
//! ```text
//! local intent → SyncStore → [relay filter] → ConnectionManager → Channel → peer
//! peer → Channel → SyncStore → local state container
//! ```
//!
//! The channel is an injected collaborator: a real implementation wraps a
//! network connection, [`MockChannel`] is the deterministic test double. The
//! reducer computing game logic is likewise supplied by the caller.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use serde::{Deserialize, Serialize};
//! use turnsync_client::{ConnectionManager, MockChannel, SyncConfig, SyncStore};
//! use turnsync_types::{ActionEnvelope, ActionKind, Snapshot, StateId};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Board {
//!     board: Vec<String>,
//!     #[serde(rename = "_id")]
//!     id: u64,
//! }
//!
//! impl Snapshot for Board {
//!     fn state_id(&self) -> StateId {
//!         StateId::new(self.id)
//!     }
//! }
//!
//! let channel = Arc::new(MockChannel::new());
//! let connection = ConnectionManager::new(
//!     SyncConfig::new("tic-tac-toe", "abc"),
//!     channel,
//!     None,
//! );
//! let store = SyncStore::new(
//!     connection,
//!     Board { board: vec![], id: 0 },
//!     |state: &Board, action: &ActionEnvelope| match action.kind {
//!         ActionKind::Restore => serde_json::from_value(action.payload.clone())
//!             .unwrap_or_else(|_| state.clone()),
//!         _ => state.clone(),
//!     },
//! );
//!
//! store.dispatch(ActionEnvelope::local(
//!     ActionKind::MakeMove,
//!     serde_json::json!({ "cell": 4 }),
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod connection;
pub mod store;

pub use channel::{Channel, ChannelError, ChannelEvent, EventHandler, EventKind, MockChannel};
pub use connection::{ConnectionCallback, ConnectionManager, SyncConfig};
pub use store::SyncStore;
