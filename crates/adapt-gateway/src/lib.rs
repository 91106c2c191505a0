//! # adapt-gateway
//!
//! The websocket gateway client: connect/identify handshake, heartbeat
//! liveness, automatic reconnection, and event decode into the connection
//! state cache. One [`Gateway`] owns the transport for the life of the
//! client; `connect` replaces the transport on every reconnect while the
//! cache, heartbeat manager, and event pipeline keep their identity.

mod error;
mod gateway;
mod heartbeat;
pub mod protocol;

pub use error::GatewayError;
pub use gateway::{Gateway, GatewayHandle, GatewayOptions};
pub use heartbeat::HeartbeatManager;
pub use protocol::{ClientFrame, Envelope, ProtocolError, WireFormat};
