//! Bitflag value objects for users, guilds, messages, roles, and presences
//!
//! Each flag set is a plain named-constant declaration over a `u32` and
//! crosses the wire as a bare integer.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Special properties about a user
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UserFlags: u32 {
        /// The user is a bot account
        const BOT = 1 << 0;
    }
}

bitflags! {
    /// Who a piece of user profile data is visible to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PrivacyConfiguration: u32 {
        /// Visible to friends
        const FRIENDS = 1 << 0;
        /// Visible to mutual friends (friends of friends)
        const MUTUAL_FRIENDS = 1 << 1;
        /// Visible to members of shared guilds
        const GUILD_MEMBERS = 1 << 2;
        /// Visible to everyone; overrides all other configurations
        const EVERYONE = 1 << 3;

        /// Default DM privacy
        const DEFAULT_DM_PRIVACY = Self::FRIENDS.bits()
            | Self::MUTUAL_FRIENDS.bits()
            | Self::GUILD_MEMBERS.bits();
        /// Default group DM privacy
        const DEFAULT_GROUP_DM_PRIVACY = Self::FRIENDS.bits();
        /// Default friend request privacy
        const DEFAULT_FRIEND_REQUEST_PRIVACY = Self::EVERYONE.bits();
    }
}

bitflags! {
    /// Extra properties and features about a guild
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GuildFlags: u32 {
        /// The guild is public
        const PUBLIC = 1 << 0;
        /// The guild is verified or official
        const VERIFIED = 1 << 1;
        /// The guild has a vanity invite URL
        const VANITY_URL = 1 << 2;
    }
}

bitflags! {
    /// Extra properties and features about a message
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u32 {
        /// The message is pinned
        const PINNED = 1 << 0;
        /// The message is a system message
        const SYSTEM = 1 << 1;
        /// The message is a subscribed crosspost from an announcement channel
        const CROSSPOST = 1 << 2;
        /// The message has been published to subscribed channels
        const PUBLISHED = 1 << 3;
    }
}

bitflags! {
    /// Extra properties and features about a role
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RoleFlags: u32 {
        /// Shown separately in the members list
        const HOISTED = 1 << 0;
        /// Managed roles cannot be edited or deleted
        const MANAGED = 1 << 1;
        /// The role can be mentioned
        const MENTIONABLE = 1 << 2;
        /// The default role applied to everyone
        const DEFAULT_ROLE = 1 << 3;
    }
}

bitflags! {
    /// Device classes a user is present on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Devices: u32 {
        const DESKTOP = 1 << 0;
        const MOBILE = 1 << 1;
        const WEB = 1 << 2;
    }
}

// All flag sets cross the wire as plain integers. Unknown bits from newer
// servers are dropped rather than rejected.
macro_rules! flags_as_u32 {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Serialize for $name {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.serialize_u32(self.bits())
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    u32::deserialize(deserializer).map(Self::from_bits_truncate)
                }
            }
        )+
    };
}

flags_as_u32!(
    UserFlags,
    PrivacyConfiguration,
    GuildFlags,
    MessageFlags,
    RoleFlags,
    Devices,
);
