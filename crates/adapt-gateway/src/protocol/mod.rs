//! Gateway wire protocol
//!
//! Frames cross the wire as UTF-8 JSON (text frames) or MessagePack (binary
//! frames); the format is fixed once per session via the connection URL's
//! `format` query parameter. Inbound frames are `{event, data?}` envelopes,
//! outbound frames are `op`-tagged control frames.

mod codec;
mod frames;

pub use codec::WireFormat;
pub use frames::{ClientFrame, Envelope, ProtocolError};
