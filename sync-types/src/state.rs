//! The contract authoritative game state must satisfy.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::StateId;

/// Authoritative game state as held locally and pushed by the remote peer.
///
/// Implementations expose the snapshot's sequence id (`_id` on the wire),
/// which the relay attaches to outbound actions for observability. It plays
/// no part in conflict resolution: restores always win.
pub trait Snapshot: Clone + Serialize + DeserializeOwned {
    /// The state's sequence id.
    fn state_id(&self) -> StateId;
}
