//! User entities

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, UserFlags};
use crate::wire::{RawClientUser, RawUser};

/// A user account somewhere on Adapt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: u16,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub bio: Option<String>,
    pub flags: UserFlags,
}

impl User {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawUser) -> Self {
        Self {
            id: raw.id,
            username: raw.username.clone(),
            discriminator: raw.discriminator,
            avatar: raw.avatar.clone(),
            banner: raw.banner.clone(),
            bio: raw.bio.clone(),
            flags: raw.flags,
        }
    }

    /// Overwrite every field from a raw payload, in place
    pub fn apply(&mut self, raw: &RawUser) {
        self.id = raw.id;
        self.username = raw.username.clone();
        self.discriminator = raw.discriminator;
        self.avatar = raw.avatar.clone();
        self.banner = raw.banner.clone();
        self.bio = raw.bio.clone();
        self.flags = raw.flags;
    }

    /// Get the full tag: username#discriminator
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}#{:04}", self.username, self.discriminator)
    }

    /// Check if the user is a bot account
    #[inline]
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.flags.contains(UserFlags::BOT)
    }

    /// When the account was created, from the id's embedded timestamp
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }
}

/// The user this client is logged in as: a [`User`] plus private fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUser {
    pub user: User,
    pub email: Option<String>,
}

impl ClientUser {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawClientUser) -> Self {
        Self {
            user: User::from_raw(&raw.user),
            email: raw.email.clone(),
        }
    }

    /// Overwrite from a raw payload, in place
    pub fn apply(&mut self, raw: &RawClientUser) {
        self.user.apply(&raw.user);
        self.email.clone_from(&raw.email);
    }

    /// The account's id
    #[inline]
    #[must_use]
    pub fn id(&self) -> Snowflake {
        self.user.id
    }
}
