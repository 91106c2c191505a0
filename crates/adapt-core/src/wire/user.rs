//! Raw user and relationship payloads

use serde::{Deserialize, Serialize};

use crate::entities::RelationshipKind;
use crate::value_objects::{Snowflake, UserFlags};

/// A user as the server sends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub flags: UserFlags,
}

/// The authenticated user; a plain user plus private fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClientUser {
    #[serde(flatten)]
    pub user: RawUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A relationship entry: the peer user plus the relationship kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelationship {
    pub user: RawUser,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}
