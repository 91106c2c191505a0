//! Channel entities

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;
use crate::wire::{RawDmChannel, RawGuildChannel, RawPermissionOverwrite};

/// Every kind of channel Adapt knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Text,
    Announcement,
    Voice,
    Category,
    Dm,
    Group,
}

impl ChannelType {
    /// Wire name of the channel type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Announcement => "announcement",
            Self::Voice => "voice",
            Self::Category => "category",
            Self::Dm => "dm",
            Self::Group => "group",
        }
    }

    /// Whether this type lives inside a guild
    #[must_use]
    pub const fn is_guild(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Announcement | Self::Voice | Self::Category
        )
    }

    /// Whether this is a DM-type channel
    #[must_use]
    pub const fn is_dm(self) -> bool {
        matches!(self, Self::Dm | Self::Group)
    }

    /// Whether messages can be sent into this channel type
    #[must_use]
    pub const fn is_text_based(self) -> bool {
        matches!(self, Self::Text | Self::Announcement | Self::Dm | Self::Group)
    }

    #[must_use]
    pub const fn is_voice_based(self) -> bool {
        matches!(self, Self::Voice)
    }
}

/// A per-target permission override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionOverwrite {
    /// Target user or role id
    pub id: Snowflake,
    pub allow: i64,
    pub deny: i64,
}

impl From<&RawPermissionOverwrite> for PermissionOverwrite {
    fn from(raw: &RawPermissionOverwrite) -> Self {
        Self {
            id: raw.id,
            allow: raw.allow,
            deny: raw.deny,
        }
    }
}

/// A channel inside a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildChannel {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub kind: ChannelType,
    pub name: String,
    pub position: u16,
    pub parent_id: Option<Snowflake>,
    pub overwrites: Vec<PermissionOverwrite>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub locked: bool,
    pub slowmode: u32,
    pub user_limit: Option<u16>,
}

impl GuildChannel {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawGuildChannel) -> Self {
        Self {
            id: raw.id,
            guild_id: raw.guild_id,
            kind: raw.kind,
            name: raw.name.clone(),
            position: raw.position,
            parent_id: raw.parent_id,
            overwrites: raw.overwrites.iter().map(PermissionOverwrite::from).collect(),
            topic: raw.topic.clone(),
            nsfw: raw.nsfw,
            locked: raw.locked,
            slowmode: raw.slowmode,
            user_limit: raw.user_limit,
        }
    }

    /// Overwrite from a raw payload, in place
    pub fn apply(&mut self, raw: &RawGuildChannel) {
        self.kind = raw.kind;
        self.name.clone_from(&raw.name);
        self.position = raw.position;
        self.parent_id = raw.parent_id;
        self.overwrites = raw.overwrites.iter().map(PermissionOverwrite::from).collect();
        self.topic.clone_from(&raw.topic);
        self.nsfw = raw.nsfw;
        self.locked = raw.locked;
        self.slowmode = raw.slowmode;
        self.user_limit = raw.user_limit;
    }

    #[inline]
    #[must_use]
    pub fn is_category(&self) -> bool {
        self.kind == ChannelType::Category
    }
}

/// A direct-message channel (1:1 or group)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DMChannel {
    pub id: Snowflake,
    pub kind: ChannelType,
    pub recipient_ids: Vec<Snowflake>,
    pub name: Option<String>,
    pub topic: Option<String>,
    pub icon: Option<String>,
    pub owner_id: Option<Snowflake>,
}

impl DMChannel {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawDmChannel) -> Self {
        Self {
            id: raw.id,
            kind: raw.kind,
            recipient_ids: raw.recipient_ids.clone(),
            name: raw.name.clone(),
            topic: raw.topic.clone(),
            icon: raw.icon.clone(),
            owner_id: raw.owner_id,
        }
    }

    /// Overwrite from a raw payload, in place
    pub fn apply(&mut self, raw: &RawDmChannel) {
        self.kind = raw.kind;
        self.recipient_ids.clone_from(&raw.recipient_ids);
        self.name.clone_from(&raw.name);
        self.topic.clone_from(&raw.topic);
        self.icon.clone_from(&raw.icon);
        self.owner_id = raw.owner_id;
    }

    #[inline]
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == ChannelType::Group
    }

    /// For a 1:1 DM, the peer that is not `me`
    #[must_use]
    pub fn recipient_id(&self, me: Snowflake) -> Option<Snowflake> {
        self.recipient_ids.iter().copied().find(|id| *id != me)
    }
}
