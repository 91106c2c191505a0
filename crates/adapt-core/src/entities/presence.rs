//! Presence entity and status/device enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Devices, Snowflake};
use crate::wire::RawPresence;

/// A user's presence status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Online,
    Idle,
    Dnd,
    Offline,
}

impl Status {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Dnd => "dnd",
            Self::Offline => "offline",
        }
    }

    /// Anything other than offline counts as online
    #[inline]
    #[must_use]
    pub fn is_online(self) -> bool {
        self != Self::Offline
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The device class this client identifies as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
    Web,
}

impl Device {
    /// Wire name of the device
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Web => "web",
        }
    }
}

/// A user's presence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub user_id: Snowflake,
    pub status: Status,
    pub custom_status: Option<String>,
    pub devices: Devices,
    pub online_since: Option<DateTime<Utc>>,
}

impl Presence {
    /// Construct from a raw payload
    #[must_use]
    pub fn from_raw(raw: &RawPresence) -> Self {
        Self {
            user_id: raw.user_id,
            status: raw.status,
            custom_status: raw.custom_status.clone(),
            devices: raw.devices,
            online_since: raw.online_since,
        }
    }
}
