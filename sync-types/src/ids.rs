//! Identity and sequence types for turnsync.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key uniquely naming one shared game session.
///
/// Always composed as `application_name + ":" + raw_session_id`. The raw
/// session id is never stored or sent on its own; every message addressed
/// to the peer carries the composed form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Compose a session identity from an application name and a raw session id.
    pub fn compose(app_name: &str, raw: &str) -> Self {
        Self(format!("{app_name}:{raw}"))
    }

    /// The composed key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

/// Identifier for the seat a client occupies within a session.
///
/// Opaque to the protocol; it does not affect routing, but it is sent on
/// every sync request so the peer can scope state visibility per seat.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player identity from an opaque string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

/// Sequence id carried by a state snapshot (`_id` on the wire).
///
/// Observability only. Restores are applied last-write-wins regardless of
/// this value; it is never consulted for conflict resolution.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct StateId(u64);

impl StateId {
    /// Create a StateId with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The numeric value of this StateId.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.0)
    }
}
