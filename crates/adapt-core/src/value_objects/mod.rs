//! Value objects - immutable domain primitives

mod flags;
mod snowflake;

pub use flags::{Devices, GuildFlags, MessageFlags, PrivacyConfiguration, RoleFlags, UserFlags};
pub use snowflake::{ModelType, Snowflake, SnowflakeParseError};
