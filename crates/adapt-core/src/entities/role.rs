//! Role entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{RoleFlags, Snowflake};
use crate::wire::RawRole;

/// An allow/deny pair of permission bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionPair {
    pub allow: i64,
    pub deny: i64,
}

/// A guild role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub color: Option<u32>,
    pub permissions: PermissionPair,
    pub position: u16,
    pub flags: RoleFlags,
}

impl Role {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawRole) -> Self {
        Self {
            id: raw.id,
            guild_id: raw.guild_id,
            name: raw.name.clone(),
            color: raw.color,
            permissions: raw.permissions,
            position: raw.position,
            flags: raw.flags,
        }
    }

    /// Overwrite from a raw payload, in place
    pub fn apply(&mut self, raw: &RawRole) {
        self.name.clone_from(&raw.name);
        self.color = raw.color;
        self.permissions = raw.permissions;
        self.position = raw.position;
        self.flags = raw.flags;
    }

    /// Whether this is the guild's default (everyone) role
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.flags.contains(RoleFlags::DEFAULT_ROLE)
    }

    #[inline]
    #[must_use]
    pub fn is_hoisted(&self) -> bool {
        self.flags.contains(RoleFlags::HOISTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_apply_keeps_identity() {
        let raw = RawRole {
            id: Snowflake::new(7),
            guild_id: Snowflake::new(100),
            name: "mods".to_string(),
            color: None,
            permissions: PermissionPair { allow: 3, deny: 0 },
            position: 2,
            flags: RoleFlags::HOISTED,
        };
        let mut role = Role::from_raw(&raw);

        let mut renamed = raw.clone();
        renamed.name = "moderators".to_string();
        role.apply(&renamed);

        assert_eq!(role.id, Snowflake::new(7));
        assert_eq!(role.name, "moderators");
        assert!(role.is_hoisted());
        assert!(!role.is_default());
    }
}
