//! Raw gateway event payloads - the `data` field of inbound envelopes

use serde::{Deserialize, Serialize};

use super::channel::RawDmChannel;
use super::guild::RawGuild;
use super::message::RawMessage;
use super::presence::RawPresence;
use super::user::{RawClientUser, RawRelationship, RawUser};
use crate::value_objects::Snowflake;

/// Payload of the `ready` event: the full session snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReady {
    pub session_id: String,
    pub user: RawClientUser,
    #[serde(default)]
    pub guilds: Vec<RawGuild>,
    #[serde(default)]
    pub dm_channels: Vec<RawDmChannel>,
    #[serde(default)]
    pub presences: Vec<RawPresence>,
    #[serde(default)]
    pub relationships: Vec<RawRelationship>,
}

/// Payload of the `user_update` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUserUpdate {
    pub before: RawUser,
    pub after: RawUser,
}

/// Payload of the `user_delete` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUserDelete {
    pub user_id: Snowflake,
}

/// Payload of the `guild_create` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGuildCreate {
    pub guild: RawGuild,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// Payload of the `guild_update` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGuildUpdate {
    pub before: RawGuild,
    pub after: RawGuild,
}

/// Payload of the `message_create` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessageCreate {
    pub message: RawMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}
