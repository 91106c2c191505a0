//! Message entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{MessageFlags, Snowflake};
use crate::wire::RawMessage;

/// What kind of message this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Default,
    Join,
    Leave,
    Pin,
}

impl MessageType {
    /// Wire name of the message type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Pin => "pin",
        }
    }
}

/// A message in a text-based channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub revision_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub author_id: Option<Snowflake>,
    pub kind: MessageType,
    pub content: Option<String>,
    pub flags: MessageFlags,
    pub stars: u32,
}

impl Message {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawMessage) -> Self {
        Self {
            id: raw.id,
            revision_id: raw.revision_id,
            channel_id: raw.channel_id,
            author_id: raw.author_id,
            kind: raw.kind,
            content: raw.content.clone(),
            flags: raw.flags,
            stars: raw.stars,
        }
    }

    /// When the message was sent, from the id's embedded timestamp
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }

    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.flags.contains(MessageFlags::PINNED)
    }

    /// System messages (joins, pins, ...) have no human author
    #[inline]
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.flags.contains(MessageFlags::SYSTEM)
    }
}
