//! Raw message payloads

use serde::{Deserialize, Serialize};

use super::guild::RawMember;
use super::user::RawUser;
use crate::entities::MessageType;
use crate::value_objects::{MessageFlags, Snowflake};

/// The author object embedded in a message: a member when sent in a guild,
/// a bare user in DMs, absent for system messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMessageAuthor {
    Member(RawMember),
    User(RawUser),
}

impl RawMessageAuthor {
    /// The authoring user regardless of shape
    #[must_use]
    pub fn user(&self) -> &RawUser {
        match self {
            Self::Member(member) => &member.user,
            Self::User(user) => user,
        }
    }
}

/// A message as the server sends it
///
/// Embeds and attachments are carried opaquely; nothing in the cache or
/// event layer interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<RawMessageAuthor>,
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub stars: u32,
}
