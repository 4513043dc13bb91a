//! The action envelope - a dispatched intent with a first-class origin tag.

use serde::{Deserialize, Serialize};

/// Where an intent originated.
///
/// `RemoteRestore` marks intents rebuilt from a remote state push: they are
/// dispatched into the local container like any other intent, but must never
/// be relayed back upstream. Carrying the tag as a field of the envelope
/// keeps the "do not re-relay" decision out of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origin {
    /// Originated from a local user/game action.
    #[default]
    Local,
    /// Rebuilt from an authoritative remote restore.
    RemoteRestore,
}

/// The closed vocabulary of intent kinds this protocol knows about.
///
/// Closed on purpose: the relay whitelist is an exhaustive match over this
/// enum, so adding a kind forces an explicit relay decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// A move made by a player.
    MakeMove,
    /// A game-level event (end turn, end phase, ...).
    GameEvent,
    /// Wholesale replacement of local state from a remote snapshot.
    Restore,
    /// Reset the game to its initial state.
    Reset,
}

/// A dispatched intent: a kind from the closed vocabulary, an arbitrary
/// payload, and the origin tag.
///
/// Envelopes are ephemeral - they exist for the duration of one dispatch
/// cycle and are relayed verbatim when eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    /// Intent kind, drawn from the closed vocabulary.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Arbitrary intent payload, opaque to the protocol.
    pub payload: serde_json::Value,
    /// Origin tag; `Local` unless rebuilt from a remote restore.
    #[serde(default)]
    pub origin: Origin,
}

impl ActionEnvelope {
    /// A locally originated intent.
    pub fn local(kind: ActionKind, payload: serde_json::Value) -> Self {
        Self {
            kind,
            payload,
            origin: Origin::Local,
        }
    }

    /// A restore intent rebuilt from a remote state push.
    pub fn restore(snapshot: serde_json::Value) -> Self {
        Self {
            kind: ActionKind::Restore,
            payload: snapshot,
            origin: Origin::RemoteRestore,
        }
    }
}
