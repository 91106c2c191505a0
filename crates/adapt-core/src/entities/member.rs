//! Member entity - a user's membership in one guild

use chrono::{DateTime, Utc};

use super::shared::Shared;
use super::user::User;
use crate::value_objects::Snowflake;
use crate::wire::RawMember;

/// A guild member: a shared handle to the user plus guild-scoped fields
///
/// Identity is the (guild_id, user_id) pair. The user data is the same
/// shared handle the top-level user cache holds, so a user rename is
/// visible through every membership at once.
#[derive(Debug, Clone)]
pub struct Member {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    user: Shared<User>,
    pub nick: Option<String>,
    pub roles: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Construct from a raw payload and the cache's user handle
    #[must_use]
    pub fn from_raw(user: Shared<User>, raw: &RawMember) -> Self {
        Self {
            guild_id: raw.guild_id,
            user_id: raw.user.id,
            user,
            nick: raw.nick.clone(),
            roles: raw.roles.clone().unwrap_or_default(),
            joined_at: raw.joined_at,
        }
    }

    /// Overwrite the guild-scoped fields from a raw payload, in place
    ///
    /// User fields are not touched here; the user upsert owns those.
    pub fn apply(&mut self, raw: &RawMember) {
        self.nick.clone_from(&raw.nick);
        if let Some(roles) = &raw.roles {
            self.roles.clone_from(roles);
        }
        self.joined_at = raw.joined_at;
    }

    /// The shared user handle backing this member
    #[must_use]
    pub fn user(&self) -> &Shared<User> {
        &self.user
    }

    /// Nick if set, otherwise the username
    #[must_use]
    pub fn display_name(&self) -> String {
        self.nick
            .clone()
            .unwrap_or_else(|| self.user.read().username.clone())
    }

    /// Whether the member carries the given role
    #[must_use]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.roles.contains(&role_id)
    }
}
