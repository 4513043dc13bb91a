//! Relay filtering - which dispatched intents are forwarded upstream, and
//! which inbound pushes are accepted.

use turnsync_types::{ActionEnvelope, ActionKind, Origin, SessionId};

/// Whether an intent kind is eligible for forwarding to the remote peer.
///
/// The whitelist is a closed, exhaustive match: moves and game events travel
/// upstream; restores and resets never do. Extending [`ActionKind`] forces a
/// relay decision here.
pub fn relayable(kind: ActionKind) -> bool {
    match kind {
        ActionKind::MakeMove | ActionKind::GameEvent => true,
        ActionKind::Restore | ActionKind::Reset => false,
    }
}

/// Whether a dispatched envelope should be relayed.
///
/// The kind check runs on the envelope's declared kind, unmodified; the
/// origin check keeps re-dispatched remote restores from looping back
/// upstream.
pub fn should_relay(action: &ActionEnvelope) -> bool {
    relayable(action.kind) && action.origin == Origin::Local
}

/// Whether an inbound state push belongs to this client's current session.
///
/// A mismatch is stale traffic from a previously active session (the client
/// changed identity after the peer queued the push) and is dropped silently.
pub fn accepts_push(current: &SessionId, pushed: &SessionId) -> bool {
    current == pushed
}
