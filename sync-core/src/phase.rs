//! Sync lifecycle of one store instance - no I/O, just the transition.

/// Whether a store has received its first authoritative snapshot.
///
/// A store is constructed `Unsynced` with a sync request in flight. The
/// first matching restore moves it to `Synced`, which is absorbing: every
/// further restore is an idempotent full-state overwrite, not a transition.
/// A store may stay `Unsynced` indefinitely if no restore ever arrives;
/// there is no timeout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// Constructed, sync requested, no snapshot applied yet.
    #[default]
    Unsynced,
    /// At least one authoritative restore has been applied.
    Synced,
}

impl SyncPhase {
    /// Create the phase a freshly built store starts in.
    pub fn new() -> Self {
        Self::Unsynced
    }

    /// A matching restore was applied.
    pub fn on_restore(self) -> Self {
        Self::Synced
    }

    /// Whether the first restore has been applied.
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}
