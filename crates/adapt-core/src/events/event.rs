//! The event enum delivered to handlers and listeners

use std::borrow::Cow;

use crate::entities::{Guild, Message, ReadyEvent, Shared, User};

/// Everything the dispatcher can deliver
///
/// Lifecycle events carry nothing; raw events carry the undecoded envelope
/// payload; semantic events carry resolved entities. For update events the
/// `before` value is a detached snapshot of the pre-update state and
/// `after` is the live cache handle.
#[derive(Debug, Clone)]
pub enum Event {
    /// The client began its first connection attempt
    Start,
    /// A session was established for the first time
    Connect,
    /// A session was re-established after a dropped connection
    Reconnect,
    /// The connection is going away for good (fatal error or shutdown)
    Disconnect,
    /// An inbound envelope, before any interpretation
    Raw {
        event: String,
        data: Option<serde_json::Value>,
    },
    /// The session snapshot finished populating the cache
    Ready(ReadyEvent),
    /// A cached user changed
    UserUpdate { before: User, after: Shared<User> },
    /// A guild became available (joined or delivered after ready)
    GuildCreate {
        guild: Shared<Guild>,
        nonce: Option<String>,
    },
    /// A cached guild changed
    GuildUpdate {
        before: Guild,
        after: Shared<Guild>,
    },
    /// A message arrived in some text-based channel
    Message(Message),
}

impl Event {
    /// The name listeners filter on
    ///
    /// Raw events are prefixed with `raw_`, so an inbound `user_update`
    /// envelope is observable both as `raw_user_update` (undecoded) and
    /// `user_update` (resolved).
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Start => Cow::Borrowed("start"),
            Self::Connect => Cow::Borrowed("connect"),
            Self::Reconnect => Cow::Borrowed("reconnect"),
            Self::Disconnect => Cow::Borrowed("disconnect"),
            Self::Raw { event, .. } => Cow::Owned(format!("raw_{event}")),
            Self::Ready(_) => Cow::Borrowed("ready"),
            Self::UserUpdate { .. } => Cow::Borrowed("user_update"),
            Self::GuildCreate { .. } => Cow::Borrowed("guild_create"),
            Self::GuildUpdate { .. } => Cow::Borrowed("guild_update"),
            Self::Message(_) => Cow::Borrowed("message"),
        }
    }
}
