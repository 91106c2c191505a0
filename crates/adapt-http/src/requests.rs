//! Request and response payloads for the REST API.
//!
//! Entity-shaped responses reuse the raw wire types from `adapt-core`; the
//! types here are endpoint-specific envelopes and edit payloads. Optional
//! edit fields are skipped when unset so the server treats them as
//! "unchanged" rather than "cleared".

use adapt_core::{ChannelType, Snowflake};
use serde::{Deserialize, Serialize};

/// Response to a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user_id: Snowflake,
    pub token: String,
}

/// Response to account registration. Unlike login, the id field is `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserResponse {
    pub id: Snowflake,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Partial update of the authenticated user's profile.
#[derive(Debug, Default, Serialize)]
pub struct EditUserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Payload for sending a friend request by tag.
#[derive(Debug, Serialize)]
pub struct FriendRequestPayload {
    pub username: String,
    pub discriminator: u16,
}

/// Payload for creating a guild.
#[derive(Debug, Default, Serialize)]
pub struct CreateGuildPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// Query flags controlling which guild sub-resources are inlined in a
/// guild fetch.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GuildQuery {
    pub channels: bool,
    pub members: bool,
    pub roles: bool,
}

impl GuildQuery {
    /// Everything inlined; what the cache wants when hydrating a guild.
    pub fn full() -> Self {
        Self {
            channels: true,
            members: true,
            roles: true,
        }
    }
}

/// Payload for creating a channel inside a guild.
#[derive(Debug, Serialize)]
pub struct CreateGuildChannelPayload {
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDmPayload {
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub recipient_id: Snowflake,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateGroupDmPayload {
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub name: String,
    pub recipient_ids: Vec<Snowflake>,
}

/// Payload for sending a message.
#[derive(Debug, Default, Serialize)]
pub struct CreateMessagePayload {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl CreateMessagePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            nonce: None,
        }
    }
}

/// Partial update of an existing message.
#[derive(Debug, Default, Serialize)]
pub struct EditMessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Pagination window for message history. `before`/`after` are message ids.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MessageHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u16>,
    #[serde(default)]
    pub oldest_first: bool,
}
