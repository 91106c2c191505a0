//! Payload builders for gateway fixtures
//!
//! Everything here produces the JSON shapes the harmony gateway sends, so
//! tests read as "the server said X" rather than as serialization noise.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

/// Counter for unique fixture ids
static ID_COUNTER: AtomicU64 = AtomicU64::new(1000);

/// A fresh id, unique within the test process
pub fn unique_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A plain user payload
pub fn user(id: u64, username: &str) -> Value {
    json!({
        "id": id.to_string(),
        "username": username,
        "discriminator": 1,
        "flags": 0
    })
}

/// The authenticated user payload served in `ready`
pub fn client_user(id: u64, username: &str) -> Value {
    let mut value = user(id, username);
    value["email"] = json!(format!("{username}@example.com"));
    value
}

/// A minimal `ready` payload: session, user, empty collections
pub fn ready(session_id: &str, user_id: u64, username: &str) -> Value {
    json!({
        "session_id": session_id,
        "user": client_user(user_id, username),
        "guilds": [],
        "dm_channels": [],
        "presences": [],
        "relationships": []
    })
}

/// A guild payload with one member, one role, and one text channel
pub fn guild(id: u64, name: &str, owner_id: u64) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "owner_id": owner_id.to_string(),
        "flags": 0,
        "members": [{
            "id": owner_id.to_string(),
            "username": "owner",
            "discriminator": 1,
            "flags": 0,
            "guild_id": id.to_string(),
            "joined_at": "2024-01-01T00:00:00Z"
        }],
        "roles": [{
            "id": id.to_string(),
            "guild_id": id.to_string(),
            "name": "Default",
            "permissions": {"allow": 0, "deny": 0},
            "position": 0,
            "flags": 8
        }],
        "channels": [{
            "id": (id + 1).to_string(),
            "guild_id": id.to_string(),
            "type": "text",
            "name": "general",
            "position": 0
        }]
    })
}

/// A `guild_create` envelope data payload
pub fn guild_create(guild: Value, nonce: Option<&str>) -> Value {
    match nonce {
        Some(nonce) => json!({"guild": guild, "nonce": nonce}),
        None => json!({"guild": guild}),
    }
}

/// A `user_update` envelope data payload
pub fn user_update(before: Value, after: Value) -> Value {
    json!({"before": before, "after": after})
}

/// A `message_create` envelope data payload
pub fn message_create(id: u64, channel_id: u64, author_id: u64, content: &str) -> Value {
    json!({
        "message": {
            "id": id.to_string(),
            "channel_id": channel_id.to_string(),
            "author_id": author_id.to_string(),
            "type": "default",
            "content": content,
            "flags": 0,
            "stars": 0
        }
    })
}
