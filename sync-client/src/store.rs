//! Synchronizing store - the interception layer around the local state
//! container.
//!
//! Wraps a caller-supplied reducer and initial state with a dispatch stage
//! that relays whitelisted local intents upstream and applies authoritative
//! remote pushes locally, tagged so they are never re-relayed.

use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use turnsync_core::{accepts_push, should_relay, SyncPhase};
use turnsync_types::{
    ActionEnvelope, ActionRelay, ClientMessage, PlayerId, ServerMessage, Snapshot, StatePush,
};

use crate::channel::{ChannelEvent, EventKind};
use crate::connection::ConnectionManager;

type Reducer<S> = dyn Fn(&S, &ActionEnvelope) -> S + Send + Sync;

struct StoreInner<S> {
    state: S,
    reducer: Box<Reducer<S>>,
    phase: SyncPhase,
}

/// A local state container with relay and restore interception.
///
/// One store per [`ConnectionManager`]; the pairing is not designed for
/// multiple concurrent containers sharing one connection. All mutation of
/// local state flows through the single [`dispatch`](Self::dispatch) entry
/// point, so intents are never processed concurrently.
pub struct SyncStore<S: Snapshot> {
    inner: Arc<Mutex<StoreInner<S>>>,
    connection: Arc<ConnectionManager>,
}

impl<S: Snapshot + Send + 'static> SyncStore<S> {
    /// Build the store around a reducer and its initial state.
    ///
    /// Subscribes to inbound state pushes, then issues one sync request via
    /// the connection manager so the authoritative snapshot is fetched
    /// before any local intent is processed. The reducer must handle
    /// [`ActionKind::Restore`](turnsync_types::ActionKind) by replacing
    /// state wholesale from the envelope payload.
    pub fn new<R>(connection: Arc<ConnectionManager>, initial: S, reducer: R) -> Self
    where
        R: Fn(&S, &ActionEnvelope) -> S + Send + Sync + 'static,
    {
        let inner = Arc::new(Mutex::new(StoreInner {
            state: initial,
            reducer: Box::new(reducer),
            phase: SyncPhase::new(),
        }));

        let handler_inner = Arc::clone(&inner);
        let handler_connection = Arc::clone(&connection);
        connection.channel().on(
            EventKind::Sync,
            Arc::new(move |event| {
                if let ChannelEvent::Message(ServerMessage::Sync(push)) = event {
                    Self::apply_push(&handler_inner, &handler_connection, push);
                }
            }),
        );

        connection.request_sync();

        Self { inner, connection }
    }

    /// Dispatch a local intent through the interception stage.
    ///
    /// In order: capture the pre-intent state id, delegate to the reducer,
    /// then relay the envelope verbatim when it is whitelisted and locally
    /// originated. Non-relayable intents are a silent no-op on the wire.
    pub fn dispatch(&self, action: ActionEnvelope) {
        Self::run_dispatch(&self.inner, &self.connection, action);
    }

    /// A copy of the current local state.
    pub fn state(&self) -> S {
        self.inner.lock().unwrap().state.clone()
    }

    /// Whether the first authoritative restore has been applied.
    pub fn is_synced(&self) -> bool {
        self.inner.lock().unwrap().phase.is_synced()
    }

    /// Replace the session identity wholesale and re-announce.
    pub fn update_session_id(&self, new_raw: &str) {
        self.connection.update_session_id(new_raw);
    }

    /// Replace the player identity and re-announce.
    pub fn update_player_id(&self, new_player: Option<PlayerId>) {
        self.connection.update_player_id(new_player);
    }

    fn apply_push(
        inner: &Arc<Mutex<StoreInner<S>>>,
        connection: &Arc<ConnectionManager>,
        push: &StatePush,
    ) {
        let current = connection.session_id();
        if !accepts_push(&current, &push.session) {
            trace!(pushed = %push.session, current = %current, "ignoring push for another session");
            return;
        }

        debug!(session = %current, "applying authoritative restore");
        Self::run_dispatch(
            inner,
            connection,
            ActionEnvelope::restore(push.state.clone()),
        );

        let mut guard = inner.lock().unwrap();
        guard.phase = guard.phase.on_restore();
    }

    fn run_dispatch(
        inner: &Arc<Mutex<StoreInner<S>>>,
        connection: &Arc<ConnectionManager>,
        action: ActionEnvelope,
    ) {
        let prev_state_id = {
            let mut guard = inner.lock().unwrap();
            let prev_id = guard.state.state_id();
            let next = (guard.reducer)(&guard.state, &action);
            guard.state = next;
            prev_id
        };

        // Emission happens after the lock is released; the relay decision
        // runs on the envelope's declared kind, unmodified.
        if should_relay(&action) {
            debug!(kind = ?action.kind, prev = %prev_state_id, "relaying action");
            connection.send(ClientMessage::Action(ActionRelay {
                action,
                prev_state_id,
                session: connection.session_id(),
                player_id: connection.player_id(),
            }));
        } else {
            trace!(kind = ?action.kind, origin = ?action.origin, "intent not relayed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MockChannel;
    use crate::connection::SyncConfig;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use turnsync_types::{ActionKind, Origin, SessionId, StateId};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Board {
        board: Vec<String>,
        #[serde(rename = "_id")]
        id: u64,
    }

    impl Snapshot for Board {
        fn state_id(&self) -> StateId {
            StateId::new(self.id)
        }
    }

    fn empty_board() -> Board {
        Board {
            board: vec![],
            id: 0,
        }
    }

    // State unchanged except for restores, which replace it wholesale.
    fn reducer(state: &Board, action: &ActionEnvelope) -> Board {
        match action.kind {
            ActionKind::Restore => serde_json::from_value(action.payload.clone())
                .unwrap_or_else(|_| state.clone()),
            _ => state.clone(),
        }
    }

    fn stack(config: SyncConfig) -> (MockChannel, SyncStore<Board>) {
        let channel = MockChannel::new();
        let connection = ConnectionManager::new(config, Arc::new(channel.clone()), None);
        let store = SyncStore::new(connection, empty_board(), reducer);
        (channel, store)
    }

    fn push_for(session: SessionId, state: serde_json::Value) -> ChannelEvent {
        ChannelEvent::Message(ServerMessage::Sync(StatePush { session, state }))
    }

    fn sync_count(channel: &MockChannel) -> usize {
        channel
            .emitted()
            .iter()
            .filter(|m| matches!(m, ClientMessage::Sync(_)))
            .count()
    }

    fn action_count(channel: &MockChannel) -> usize {
        channel
            .emitted()
            .iter()
            .filter(|m| matches!(m, ClientMessage::Action(_)))
            .count()
    }

    #[test]
    fn construction_requests_sync_exactly_once() {
        let (channel, store) = stack(SyncConfig::default());

        let emitted = channel.emitted();
        assert_eq!(emitted.len(), 1);
        match &emitted[0] {
            ClientMessage::Sync(req) => {
                assert_eq!(req.session.as_str(), "default:default");
                assert_eq!(req.num_players, 2);
            }
            other => panic!("expected sync request, got {other:?}"),
        }
        assert!(!store.is_synced());
    }

    #[test]
    fn whitelisted_local_intent_relays_verbatim() {
        let config = SyncConfig::new("chess", "room42").with_player(PlayerId::new("0"));
        let (channel, store) = stack(config);
        let env = ActionEnvelope::local(ActionKind::MakeMove, json!({ "cell": 4 }));

        store.dispatch(env.clone());

        assert_eq!(action_count(&channel), 1);
        match channel.last_emitted() {
            Some(ClientMessage::Action(relay)) => {
                assert_eq!(relay.action, env);
                assert_eq!(relay.prev_state_id, StateId::new(0));
                assert_eq!(relay.session.as_str(), "chess:room42");
                assert_eq!(relay.player_id, Some(PlayerId::new("0")));
            }
            other => panic!("expected action relay, got {other:?}"),
        }
    }

    #[test]
    fn game_event_relays() {
        let (channel, store) = stack(SyncConfig::default());

        store.dispatch(ActionEnvelope::local(
            ActionKind::GameEvent,
            json!({ "event": "endTurn" }),
        ));

        assert_eq!(action_count(&channel), 1);
    }

    #[test]
    fn remote_origin_intent_is_not_relayed() {
        let (channel, store) = stack(SyncConfig::default());

        store.dispatch(ActionEnvelope {
            kind: ActionKind::MakeMove,
            payload: json!({ "cell": 4 }),
            origin: Origin::RemoteRestore,
        });

        assert_eq!(action_count(&channel), 0);
    }

    #[test]
    fn reset_is_not_relayed() {
        let (channel, store) = stack(SyncConfig::default());

        store.dispatch(ActionEnvelope::local(ActionKind::Reset, json!(null)));

        assert_eq!(action_count(&channel), 0);
    }

    #[test]
    fn mismatched_push_leaves_state_unchanged() {
        let (channel, store) = stack(SyncConfig::new("chess", "room42"));

        channel.deliver(push_for(
            SessionId::compose("chess", "room99"),
            json!({ "board": ["x"], "_id": 5 }),
        ));

        assert_eq!(store.state(), empty_board());
        assert!(!store.is_synced());
    }

    #[test]
    fn matching_push_overwrites_wholesale_without_relay() {
        let (channel, store) = stack(SyncConfig::new("chess", "room42"));

        channel.deliver(push_for(
            SessionId::compose("chess", "room42"),
            json!({ "board": ["x", "o"], "_id": 5 }),
        ));

        assert_eq!(
            store.state(),
            Board {
                board: vec!["x".into(), "o".into()],
                id: 5,
            }
        );
        assert!(store.is_synced());
        // The restore dispatch never loops back upstream
        assert_eq!(action_count(&channel), 0);
    }

    #[test]
    fn repeated_push_is_idempotent() {
        let (channel, store) = stack(SyncConfig::new("chess", "room42"));
        let snapshot = json!({ "board": ["x"], "_id": 3 });

        channel.deliver(push_for(SessionId::compose("chess", "room42"), snapshot.clone()));
        let once = store.state();
        channel.deliver(push_for(SessionId::compose("chess", "room42"), snapshot));

        assert_eq!(store.state(), once);
        assert!(store.is_synced());
    }

    #[test]
    fn update_session_id_reannounces_and_rescopes_pushes() {
        let (channel, store) = stack(SyncConfig::new("chess", "room1"));
        assert_eq!(sync_count(&channel), 1);

        store.update_session_id("room42");

        // Exactly one new announce, carrying the recomposed identity
        assert_eq!(sync_count(&channel), 2);
        match channel.last_emitted() {
            Some(ClientMessage::Sync(req)) => {
                assert_eq!(req.session.as_str(), "chess:room42")
            }
            other => panic!("expected sync request, got {other:?}"),
        }

        // A push for the old session is now stale
        channel.deliver(push_for(
            SessionId::compose("chess", "room1"),
            json!({ "board": ["x"], "_id": 1 }),
        ));
        assert_eq!(store.state(), empty_board());

        // A push for the new session applies
        channel.deliver(push_for(
            SessionId::compose("chess", "room42"),
            json!({ "board": ["o"], "_id": 2 }),
        ));
        assert_eq!(store.state().id, 2);
    }

    #[test]
    fn update_player_id_reannounces() {
        let (channel, store) = stack(SyncConfig::default());

        store.update_player_id(Some(PlayerId::new("1")));

        assert_eq!(sync_count(&channel), 2);
    }

    #[test]
    fn emit_failure_does_not_lose_local_state() {
        let (channel, store) = stack(SyncConfig::default());
        channel.fail_next_emit("peer unreachable");

        store.dispatch(ActionEnvelope::local(ActionKind::MakeMove, json!({ "cell": 0 })));

        // The relay vanished, the local dispatch did not
        assert_eq!(action_count(&channel), 0);
        assert_eq!(store.state(), empty_board());
    }

    #[test]
    fn undecodable_snapshot_keeps_previous_state() {
        let (channel, store) = stack(SyncConfig::new("chess", "room42"));

        channel.deliver(push_for(SessionId::compose("chess", "room42"), json!(42)));

        assert_eq!(store.state(), empty_board());
    }

    #[test]
    fn end_to_end_tic_tac_toe() {
        let config = SyncConfig::new("tic-tac-toe", "abc")
            .with_player(PlayerId::new("0"))
            .with_num_players(2);
        let (channel, store) = stack(config);

        // One announce with the composed identity, seat, and capacity
        let emitted = channel.emitted();
        assert_eq!(emitted.len(), 1);
        match &emitted[0] {
            ClientMessage::Sync(req) => {
                assert_eq!(req.session.as_str(), "tic-tac-toe:abc");
                assert_eq!(req.player_id, Some(PlayerId::new("0")));
                assert_eq!(req.num_players, 2);
            }
            other => panic!("expected sync request, got {other:?}"),
        }

        // Authoritative snapshot arrives
        channel.deliver(push_for(
            SessionId::compose("tic-tac-toe", "abc"),
            json!({ "board": ["x", "", "", "", "", "", "", "", ""], "_id": 5 }),
        ));
        assert_eq!(store.state().id, 5);
        assert_eq!(store.state().board[0], "x");
        assert!(store.is_synced());

        // A local move relays with the pre-intent state id
        let env = ActionEnvelope::local(ActionKind::MakeMove, json!({ "cell": 4 }));
        store.dispatch(env.clone());

        match channel.last_emitted() {
            Some(ClientMessage::Action(relay)) => {
                assert_eq!(relay.action, env);
                assert_eq!(relay.prev_state_id, StateId::new(5));
                assert_eq!(relay.session.as_str(), "tic-tac-toe:abc");
                assert_eq!(relay.player_id, Some(PlayerId::new("0")));
            }
            other => panic!("expected action relay, got {other:?}"),
        }
    }
}
