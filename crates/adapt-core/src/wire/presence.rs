//! Raw presence payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Status;
use crate::value_objects::{Devices, Snowflake};

/// A user's presence as the server sends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPresence {
    pub user_id: Snowflake,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_status: Option<String>,
    #[serde(default)]
    pub devices: Devices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_since: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_decodes() {
        let presence: RawPresence = serde_json::from_str(
            r#"{
                "user_id": "42",
                "status": "idle",
                "custom_status": null,
                "devices": 3,
                "online_since": "2023-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(presence.status, Status::Idle);
        assert!(presence.devices.contains(Devices::DESKTOP | Devices::MOBILE));
        assert!(presence.online_since.is_some());
    }
}
