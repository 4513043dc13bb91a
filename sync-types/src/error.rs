//! Error types for turnsync.

use thiserror::Error;

/// Errors that can occur encoding or decoding protocol messages.
#[derive(Debug, Error)]
pub enum SyncError {
    /// MessagePack serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] rmp_serde::encode::Error),

    /// MessagePack deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] rmp_serde::decode::Error),

    /// Invalid message kind discriminator
    #[error("invalid message kind: {0}")]
    InvalidMessageKind(u8),
}
