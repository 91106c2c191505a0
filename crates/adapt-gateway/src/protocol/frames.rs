//! Envelope and control frame shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use adapt_core::{Device, Status};

/// Errors from frame encoding/decoding
///
/// All of these are fatal: they indicate a protocol version or format
/// mismatch that a reconnect cannot repair.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame decoded to something other than a mapping
    #[error("envelope is not a mapping")]
    NotAMapping,

    /// The envelope mapping carries no `event` string
    #[error("envelope is missing the `event` tag")]
    MissingEventTag,

    /// The frame was not valid JSON
    #[error("invalid JSON frame: {0}")]
    Json(#[from] serde_json::Error),

    /// The frame was not valid MessagePack
    #[error("invalid MessagePack frame: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// An outbound frame failed to encode as MessagePack
    #[error("MessagePack encode failed: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
}

/// The tagged wrapper around every inbound gateway frame
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Event tag, e.g. `hello` or `message_create`
    pub event: String,
    /// Tag-specific payload, absent for bare control events
    pub data: Option<Value>,
}

impl Envelope {
    /// Validate a decoded frame value into an envelope
    ///
    /// The value must be a mapping with an `event` string; everything else
    /// about the payload is left for later interpretation so unknown tags
    /// stay forwardable.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut map) = value else {
            return Err(ProtocolError::NotAMapping);
        };
        let Some(Value::String(event)) = map.remove("event") else {
            return Err(ProtocolError::MissingEventTag);
        };
        Ok(Self {
            event,
            data: map.remove("data"),
        })
    }

    /// Decode a text (JSON) frame
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Decode a binary (MessagePack) frame
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Self::from_value(rmp_serde::from_slice(bytes)?)
    }
}

/// Control frames this client sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Authenticate the session after the server's greeting
    Identify {
        token: String,
        status: Status,
        device: Device,
    },
    /// Heartbeat probe; the server answers with a `pong` event
    Ping,
    /// Change the desired presence; an absent status leaves it unchanged
    UpdatePresence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<Status>,
    },
}

impl ClientFrame {
    /// The identify frame for this device class
    #[must_use]
    pub fn identify(token: impl Into<String>, status: Status) -> Self {
        Self::Identify {
            token: token.into(),
            status,
            device: Device::default(),
        }
    }
}
