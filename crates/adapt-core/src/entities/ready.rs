//! The resolved `ready` event

use super::channel::DMChannel;
use super::guild::Guild;
use super::relationship::Relationship;
use super::shared::Shared;
use super::user::ClientUser;

/// Everything the server handed over when the session became ready
///
/// The collections hold the same shared handles the connection cache holds;
/// this value is also what the cache's one-shot ready signal resolves with.
#[derive(Debug, Clone)]
pub struct ReadyEvent {
    pub session_id: String,
    pub user: ClientUser,
    pub guilds: Vec<Shared<Guild>>,
    pub dm_channels: Vec<Shared<DMChannel>>,
    pub relationships: Vec<Shared<Relationship>>,
}

impl ReadyEvent {
    /// Number of guilds in the snapshot
    #[must_use]
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }
}
