//! Raw channel payloads

use serde::{Deserialize, Serialize};

use crate::entities::ChannelType;
use crate::value_objects::Snowflake;

/// A per-target permission override on a guild channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPermissionOverwrite {
    /// Target user or role id
    pub id: Snowflake,
    pub allow: i64,
    pub deny: i64,
}

/// A channel that lives inside a guild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGuildChannel {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub name: String,
    #[serde(default)]
    pub position: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overwrites: Vec<RawPermissionOverwrite>,
    // Text-based channel info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub slowmode: u32,
    // Voice channel info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u16>,
}

/// A direct-message channel (1:1 or group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDmChannel {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(default)]
    pub recipient_ids: Vec<Snowflake>,
    // Group DM fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
}
