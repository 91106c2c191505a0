//! Raw guild, member, and role payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::RawGuildChannel;
use super::user::RawUser;
use crate::entities::PermissionPair;
use crate::value_objects::{GuildFlags, RoleFlags, Snowflake};

/// A guild member: user fields inline plus guild-scoped fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMember {
    #[serde(flatten)]
    pub user: RawUser,
    pub guild_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Snowflake>>,
    pub joined_at: DateTime<Utc>,
}

/// Member count breakdown attached to a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGuildMemberCount {
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<u32>,
}

/// A role as the server sends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRole {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    pub permissions: PermissionPair,
    pub position: u16,
    #[serde(default)]
    pub flags: RoleFlags,
}

/// A guild, possibly carrying nested members/roles/channels
///
/// Partial guilds (e.g. the `before`/`after` pair of a guild update) omit
/// the nested collections; snapshot guilds in `ready` include them. The
/// server has historically used both `channels` and `channel` as the key
/// for the channel list, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGuild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub owner_id: Snowflake,
    #[serde(default)]
    pub flags: GuildFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<RawGuildMemberCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanity_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<RawMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RawRole>>,
    #[serde(default, alias = "channel", skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<RawGuildChannel>>,
}
