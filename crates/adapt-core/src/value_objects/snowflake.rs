//! Snowflake ID - Adapt's 64-bit unique identifier
//!
//! Structure:
//! - Bits 63-18: Timestamp (milliseconds since the Adapt epoch)
//! - Bits 17-13: Model type tag (what kind of entity this id names)
//! - Bits 12-0:  Server-internal sequence/node bits

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The kind of entity a snowflake identifies, encoded in bits 17-13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    Guild,
    User,
    Channel,
    Message,
    Attachment,
    Role,
    Internal,
    /// Tag value this client version does not recognize.
    Unknown,
}

impl ModelType {
    /// Decode a 5-bit model type tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            0 => Self::Guild,
            1 => Self::User,
            2 => Self::Channel,
            3 => Self::Message,
            4 => Self::Attachment,
            5 => Self::Role,
            6 => Self::Internal,
            _ => Self::Unknown,
        }
    }

    /// The 5-bit tag value for this model type.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Guild => 0,
            Self::User => 1,
            Self::Channel => 2,
            Self::Message => 3,
            Self::Attachment => 4,
            Self::Role => 5,
            Self::Internal => 6,
            Self::Unknown => 31,
        }
    }
}

/// Adapt snowflake ID (64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Adapt epoch: 2022-12-25 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_671_926_400_000;

    /// Create a new Snowflake from a raw u64 value
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Check if the Snowflake is zero (uninitialized)
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Build a snowflake from a Unix millisecond timestamp and model type.
    ///
    /// The low sequence bits are left at zero; this is mainly useful for
    /// constructing range bounds and test fixtures.
    #[must_use]
    pub const fn from_parts(timestamp_millis: i64, model_type: ModelType) -> Self {
        let elapsed = timestamp_millis - Self::EPOCH;
        Self(((elapsed as u64) << 18) | ((model_type.tag() as u64) << 13))
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        ((self.0 >> 18) as i64) + Self::EPOCH
    }

    /// Extract the model type tag
    #[inline]
    #[must_use]
    pub fn model_type(&self) -> ModelType {
        ModelType::from_tag(((self.0 >> 13) & 0b1_1111) as u8)
    }

    /// Convert the embedded timestamp to `DateTime<Utc>`
    #[must_use]
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        use chrono::{TimeZone, Utc};
        Utc.timestamp_millis_opt(self.timestamp_millis())
            .single()
            .unwrap_or_else(|| chrono::DateTime::<Utc>::MIN_UTC)
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<u64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialize as string for JSON (JavaScript BigInt safety)
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a snowflake ID")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                Ok(Snowflake(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(Snowflake)
                    .map_err(|_| de::Error::custom("snowflake must be non-negative"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(Snowflake)
                    .map_err(|_| de::Error::custom("invalid snowflake string"))
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}
