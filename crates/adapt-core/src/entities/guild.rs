//! Guild entity

use std::collections::HashMap;

use super::channel::GuildChannel;
use super::member::Member;
use super::role::Role;
use super::shared::Shared;
use crate::value_objects::{GuildFlags, Snowflake};
use crate::wire::{RawGuild, RawGuildMemberCount};

/// Member count breakdown reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberCounts {
    pub total: u32,
    pub online: Option<u32>,
}

impl From<RawGuildMemberCount> for MemberCounts {
    fn from(raw: RawGuildMemberCount) -> Self {
        Self {
            total: raw.total,
            online: raw.online,
        }
    }
}

/// A guild and the members/channels/roles nested under it
///
/// Scalar fields come straight off the wire; the nested maps are populated
/// by the connection cache's upsert pass and hold shared handles scoped to
/// this guild.
#[derive(Debug, Clone)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub banner: Option<String>,
    pub owner_id: Snowflake,
    pub flags: GuildFlags,
    pub member_count: Option<MemberCounts>,
    pub vanity_url: Option<String>,
    members: HashMap<Snowflake, Shared<Member>>,
    channels: HashMap<Snowflake, Shared<GuildChannel>>,
    roles: HashMap<Snowflake, Shared<Role>>,
}

impl Guild {
    /// Construct from a raw payload (scalar fields only; nested maps start
    /// empty and are filled by the cache)
    #[must_use]
    pub fn from_raw(raw: &RawGuild) -> Self {
        Self {
            id: raw.id,
            name: raw.name.clone(),
            description: raw.description.clone(),
            icon: raw.icon.clone(),
            banner: raw.banner.clone(),
            owner_id: raw.owner_id,
            flags: raw.flags,
            member_count: raw.member_count.map(MemberCounts::from),
            vanity_url: raw.vanity_url.clone(),
            members: HashMap::new(),
            channels: HashMap::new(),
            roles: HashMap::new(),
        }
    }

    /// Overwrite the scalar fields from a raw payload, in place
    pub fn apply(&mut self, raw: &RawGuild) {
        self.name.clone_from(&raw.name);
        self.description.clone_from(&raw.description);
        self.icon.clone_from(&raw.icon);
        self.banner.clone_from(&raw.banner);
        self.owner_id = raw.owner_id;
        self.flags = raw.flags;
        if let Some(count) = raw.member_count {
            self.member_count = Some(count.into());
        }
        self.vanity_url.clone_from(&raw.vanity_url);
    }

    /// Look up a member by user id
    #[must_use]
    pub fn member(&self, user_id: Snowflake) -> Option<Shared<Member>> {
        self.members.get(&user_id).cloned()
    }

    /// Look up a channel by id
    #[must_use]
    pub fn channel(&self, channel_id: Snowflake) -> Option<Shared<GuildChannel>> {
        self.channels.get(&channel_id).cloned()
    }

    /// Look up a role by id
    #[must_use]
    pub fn role(&self, role_id: Snowflake) -> Option<Shared<Role>> {
        self.roles.get(&role_id).cloned()
    }

    /// Snapshot of every cached member handle
    #[must_use]
    pub fn members(&self) -> Vec<Shared<Member>> {
        self.members.values().cloned().collect()
    }

    /// Snapshot of every cached channel handle
    #[must_use]
    pub fn channels(&self) -> Vec<Shared<GuildChannel>> {
        self.channels.values().cloned().collect()
    }

    /// Snapshot of every cached role handle
    #[must_use]
    pub fn roles(&self) -> Vec<Shared<Role>> {
        self.roles.values().cloned().collect()
    }

    /// Number of members currently cached (not the server-reported count)
    #[must_use]
    pub fn cached_member_count(&self) -> usize {
        self.members.len()
    }

    /// Insert a member handle keyed by its user id
    pub fn insert_member(&mut self, member: Shared<Member>) {
        let user_id = member.read().user_id;
        self.members.insert(user_id, member);
    }

    /// Insert a channel handle keyed by its id
    pub fn insert_channel(&mut self, channel: Shared<GuildChannel>) {
        let id = channel.read().id;
        self.channels.insert(id, channel);
    }

    /// Insert a role handle keyed by its id
    pub fn insert_role(&mut self, role: Shared<Role>) {
        let id = role.read().id;
        self.roles.insert(id, role);
    }

    /// Check if a user owns this guild
    #[inline]
    #[must_use]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    #[inline]
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.contains(GuildFlags::PUBLIC)
    }
}
