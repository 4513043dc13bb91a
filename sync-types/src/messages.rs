//! Protocol messages for turnsync.
//!
//! Two message names travel the channel: `sync` (an announce request going
//! out, a state push coming in) and `action` (outbound only). Transport-level
//! connect/disconnect notifications are channel events, not wire messages.

use serde::{Deserialize, Serialize};

use crate::{ActionEnvelope, PlayerId, SessionId, StateId, SyncError};

/// Message name discriminator, mirroring the wire-level message names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageKind {
    /// Sync announce (outbound) or authoritative state push (inbound)
    Sync = 1,
    /// Relayed local intent (outbound only)
    Action = 2,
}

impl TryFrom<u8> for MessageKind {
    type Error = SyncError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageKind::Sync),
            2 => Ok(MessageKind::Action),
            _ => Err(SyncError::InvalidMessageKind(value)),
        }
    }
}

/// Messages sent from this client to the remote peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Announce this client and request the authoritative snapshot
    Sync(SyncRequest),
    /// Relay a locally originated intent
    Action(ActionRelay),
}

impl ClientMessage {
    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SyncError> {
        rmp_serde::to_vec(self).map_err(SyncError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SyncError> {
        rmp_serde::from_slice(bytes).map_err(SyncError::Deserialization)
    }

    /// The wire-level message kind.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Sync(_) => MessageKind::Sync,
            Self::Action(_) => MessageKind::Action,
        }
    }
}

/// Messages pushed from the remote peer to this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Authoritative state push
    Sync(StatePush),
}

impl ServerMessage {
    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SyncError> {
        rmp_serde::to_vec(self).map_err(SyncError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SyncError> {
        rmp_serde::from_slice(bytes).map_err(SyncError::Deserialization)
    }

    /// The wire-level message kind.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Sync(_) => MessageKind::Sync,
        }
    }
}

/// Announce this client to the peer and request the current snapshot.
///
/// Sent once when the client stack is constructed and again after every
/// identity update, so the peer can (re)provision or re-scope the session
/// for this participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Composed session identity
    pub session: SessionId,
    /// Seat this client occupies, if any
    pub player_id: Option<PlayerId>,
    /// Session capacity, for provisioning on the remote side
    pub num_players: u16,
}

/// A locally originated intent forwarded to the peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRelay {
    /// The dispatched envelope, verbatim
    pub action: ActionEnvelope,
    /// Sequence id of the local state before the intent was applied
    pub prev_state_id: StateId,
    /// Composed session identity
    pub session: SessionId,
    /// Seat this client occupies, if any
    pub player_id: Option<PlayerId>,
}

/// Authoritative state pushed by the remote peer.
///
/// Applied by wholesale replacement, but only when `session` matches the
/// client's current session identity; anything else is stale traffic from a
/// previously active session and is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePush {
    /// Session the snapshot belongs to
    pub session: SessionId,
    /// The snapshot, opaque to the protocol
    pub state: serde_json::Value,
}
