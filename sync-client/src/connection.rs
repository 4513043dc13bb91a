//! Connection manager - owns the channel to the remote peer for one
//! (application, session) pair.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, warn};

use turnsync_types::{ClientMessage, PlayerId, SessionId, SyncRequest};

use crate::channel::{Channel, EventKind};

/// Callback invoked on every connectivity transition, with the new status.
pub type ConnectionCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Configuration for a sync client.
///
/// Every field defaults rather than validates: missing or empty parameters
/// never raise errors at this layer.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Application name, namespacing sessions and the channel address.
    pub app_name: String,
    /// Raw session id; only ever sent in composed form.
    pub session: String,
    /// Seat this client occupies, if any.
    pub player_id: Option<PlayerId>,
    /// Session capacity, sent with sync requests for provisioning.
    pub num_players: u16,
    /// Remote server address; `None` means same-origin.
    pub server_addr: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            app_name: "default".into(),
            session: "default".into(),
            player_id: None,
            num_players: 2,
            server_addr: None,
        }
    }
}

impl SyncConfig {
    /// Create a configuration for an application and raw session id.
    pub fn new(app_name: &str, session: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            session: session.to_string(),
            ..Self::default()
        }
    }

    /// Set the seat this client occupies.
    pub fn with_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Set the session capacity.
    pub fn with_num_players(mut self, num_players: u16) -> Self {
        self.num_players = num_players;
        self
    }

    /// Set the remote server address.
    pub fn with_server_addr(mut self, addr: &str) -> Self {
        self.server_addr = Some(addr.to_string());
        self
    }

    /// Dial target for the caller's transport: the server address (or the
    /// same origin) namespaced by application name.
    pub fn channel_addr(&self) -> String {
        match &self.server_addr {
            Some(addr) => format!("{}/{}", addr.trim_end_matches('/'), self.app_name),
            None => format!("/{}", self.app_name),
        }
    }
}

struct Identity {
    session: SessionId,
    player: Option<PlayerId>,
}

/// Owns the bidirectional channel to the remote peer.
///
/// Holds the composed session identity and the participant identity, emits
/// sync announces, and surfaces transport connectivity through a callback.
/// Identity fields are only ever replaced wholesale by the update
/// operations, each a single assignment followed by one emission.
pub struct ConnectionManager {
    app_name: String,
    num_players: u16,
    identity: Mutex<Identity>,
    channel: Arc<dyn Channel>,
    connected: AtomicBool,
}

impl ConnectionManager {
    /// Create a manager over an injected channel.
    ///
    /// Composes the session identity immediately and registers
    /// connect/disconnect handlers that drive `on_connection_change`
    /// (defaulting to a no-op). No sync request is emitted here; the store
    /// issues the initial one when it attaches, so constructing the full
    /// client stack produces exactly one announce.
    pub fn new(
        config: SyncConfig,
        channel: Arc<dyn Channel>,
        on_connection_change: Option<ConnectionCallback>,
    ) -> Arc<Self> {
        let callback = on_connection_change.unwrap_or_else(|| Arc::new(|_| {}));

        let manager = Arc::new(Self {
            identity: Mutex::new(Identity {
                session: SessionId::compose(&config.app_name, &config.session),
                player: config.player_id,
            }),
            app_name: config.app_name,
            num_players: config.num_players,
            channel: Arc::clone(&channel),
            connected: AtomicBool::new(false),
        });

        let weak: Weak<Self> = Arc::downgrade(&manager);
        let on_connect = Arc::clone(&callback);
        channel.on(
            EventKind::Connect,
            Arc::new(move |_| {
                if let Some(manager) = weak.upgrade() {
                    manager.connected.store(true, Ordering::SeqCst);
                }
                debug!("transport connected");
                on_connect(true);
            }),
        );

        let weak: Weak<Self> = Arc::downgrade(&manager);
        let on_disconnect = callback;
        channel.on(
            EventKind::Disconnect,
            Arc::new(move |_| {
                if let Some(manager) = weak.upgrade() {
                    manager.connected.store(false, Ordering::SeqCst);
                }
                debug!("transport disconnected");
                on_disconnect(false);
            }),
        );

        manager
    }

    /// Whether the transport currently reports a live connection.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// The current composed session identity.
    pub fn session_id(&self) -> SessionId {
        self.identity.lock().unwrap().session.clone()
    }

    /// The current player identity.
    pub fn player_id(&self) -> Option<PlayerId> {
        self.identity.lock().unwrap().player.clone()
    }

    /// Emit a sync announce so the peer can (re)provision the session for
    /// this participant.
    ///
    /// Issued once when the store attaches and again after every identity
    /// update. Side effect only; the snapshot arrives later as an inbound
    /// push, if at all.
    pub fn request_sync(&self) {
        let (session, player_id) = {
            let identity = self.identity.lock().unwrap();
            (identity.session.clone(), identity.player.clone())
        };
        debug!(session = %session, "requesting sync");
        self.send(ClientMessage::Sync(SyncRequest {
            session,
            player_id,
            num_players: self.num_players,
        }));
    }

    /// Replace the session identity wholesale and re-announce.
    ///
    /// The assignment and the emission run back to back; no state where the
    /// identity and the last-sent announce disagree is observable.
    pub fn update_session_id(&self, new_raw: &str) {
        {
            let mut identity = self.identity.lock().unwrap();
            identity.session = SessionId::compose(&self.app_name, new_raw);
        }
        self.request_sync();
    }

    /// Replace the player identity and re-announce.
    pub fn update_player_id(&self, new_player: Option<PlayerId>) {
        {
            let mut identity = self.identity.lock().unwrap();
            identity.player = new_player;
        }
        self.request_sync();
    }

    /// Fire-and-forget emission; failures are logged, never raised.
    pub(crate) fn send(&self, message: ClientMessage) {
        if let Err(error) = self.channel.emit(message) {
            warn!(%error, "emit failed");
        }
    }

    pub(crate) fn channel(&self) -> &Arc<dyn Channel> {
        &self.channel
    }
}
