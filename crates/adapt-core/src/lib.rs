//! # adapt-core
//!
//! Domain layer for the Adapt client: snowflake identifiers, flag value
//! objects, cache-resident entities, raw wire payload types, and the
//! client-facing event enum. This crate knows nothing about transports.

pub mod entities;
pub mod events;
pub mod value_objects;
pub mod wire;

// Re-export commonly used types at crate root
pub use entities::{
    ChannelType, ClientUser, DMChannel, Device, Guild, GuildChannel, Member, MemberCounts,
    Message, MessageType, PermissionOverwrite, PermissionPair, Presence, ReadyEvent,
    Relationship, RelationshipKind, Role, Shared, Status, User, shared,
};
pub use events::Event;
pub use value_objects::{
    Devices, GuildFlags, MessageFlags, ModelType, PrivacyConfiguration, RoleFlags, Snowflake,
    SnowflakeParseError, UserFlags,
};
