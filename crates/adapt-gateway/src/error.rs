//! Gateway error taxonomy
//!
//! Two tiers: [`GatewayError::AttemptReconnect`] is the only retriable
//! condition, recovered at the top of the `start` loop by a fresh connect.
//! Everything else propagates to the caller after guaranteed cleanup.

use adapt_cache::CacheError;

use crate::protocol::ProtocolError;

/// Everything that can go wrong on a gateway connection
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The underlying stream reported an error; fatal
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Retriable signal: the connection dropped or the heartbeat went
    /// unacknowledged, and a reconnect should be attempted
    #[error("connection interrupted, reconnect required")]
    AttemptReconnect,

    /// A frame violated the envelope contract; fatal, since reconnecting
    /// cannot fix a format mismatch
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The cache rejected an event payload; fatal schema mismatch
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// An operation needed an open transport and there was none
    #[error("gateway is not connected")]
    NotConnected,

    /// The client asked the connection to shut down
    #[error("gateway closed by client")]
    Closed,
}

impl GatewayError {
    /// Whether the `start` loop may recover by reconnecting
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::AttemptReconnect)
    }
}
