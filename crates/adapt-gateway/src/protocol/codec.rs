//! Per-session wire format selection and frame encoding

use tokio_tungstenite::tungstenite::Message;

use super::frames::{ClientFrame, Envelope, ProtocolError};

/// Which encoding this session speaks, fixed at connect time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// UTF-8 JSON over text frames
    Json,
    /// MessagePack over binary frames
    #[default]
    MessagePack,
}

impl WireFormat {
    /// Map the construction-time preference to a format
    #[must_use]
    pub fn from_preference(prefer_msgpack: bool) -> Self {
        if prefer_msgpack {
            Self::MessagePack
        } else {
            Self::Json
        }
    }

    /// The value of the connection URL's `format` query parameter
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }

    /// Encode an outbound control frame as a websocket message
    pub fn encode(self, frame: &ClientFrame) -> Result<Message, ProtocolError> {
        match self {
            Self::Json => Ok(Message::Text(serde_json::to_string(frame)?.into())),
            Self::MessagePack => Ok(Message::Binary(rmp_serde::to_vec_named(frame)?.into())),
        }
    }

    /// Decode an inbound data frame into an envelope
    ///
    /// The frame kind picks the decoder: text is JSON, binary is
    /// MessagePack, matching what the server emits for this session's
    /// format. Non-data frames are not this codec's concern.
    pub fn decode(self, message: &Message) -> Result<Option<Envelope>, ProtocolError> {
        match message {
            Message::Text(text) => Envelope::from_json(text).map(Some),
            Message::Binary(bytes) => Envelope::from_msgpack(bytes).map(Some),
            _ => Ok(None),
        }
    }
}
