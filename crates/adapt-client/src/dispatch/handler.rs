use adapt_core::entities::{Guild, Message, ReadyEvent, Shared, User};
use adapt_core::Event;
use async_trait::async_trait;
use serde_json::Value;

/// Receives every dispatched event through one method per variant.
///
/// All methods default to no-ops, so an implementor only overrides what it
/// cares about. One handler instance is shared across concurrent
/// invocations, so implementors hold their mutable state behind their own
/// synchronization.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The client began its first connection attempt.
    async fn on_start(&self) {}

    /// A session was established for the first time.
    async fn on_connect(&self) {}

    /// A session was re-established after a dropped connection.
    async fn on_reconnect(&self) {}

    /// The connection is going away for good.
    async fn on_disconnect(&self) {}

    /// An inbound envelope before any interpretation. Fires for every
    /// frame, including ones the client does not understand.
    async fn on_raw(&self, _event: String, _data: Option<Value>) {}

    /// The session snapshot finished populating the cache.
    async fn on_ready(&self, _ready: ReadyEvent) {}

    /// A cached user changed. `before` is a detached snapshot; `after`
    /// is the live cache handle.
    async fn on_user_update(&self, _before: User, _after: Shared<User>) {}

    /// A guild became available.
    async fn on_guild_create(&self, _guild: Shared<Guild>, _nonce: Option<String>) {}

    /// A cached guild changed.
    async fn on_guild_update(&self, _before: Guild, _after: Shared<Guild>) {}

    /// A message arrived in some text-based channel.
    async fn on_message(&self, _message: Message) {}
}

/// Routes an event to the matching handler method.
pub(crate) async fn invoke(handler: &dyn EventHandler, event: Event) {
    match event {
        Event::Start => handler.on_start().await,
        Event::Connect => handler.on_connect().await,
        Event::Reconnect => handler.on_reconnect().await,
        Event::Disconnect => handler.on_disconnect().await,
        Event::Raw { event, data } => handler.on_raw(event, data).await,
        Event::Ready(ready) => handler.on_ready(ready).await,
        Event::UserUpdate { before, after } => handler.on_user_update(before, after).await,
        Event::GuildCreate { guild, nonce } => handler.on_guild_create(guild, nonce).await,
        Event::GuildUpdate { before, after } => handler.on_guild_update(before, after).await,
        Event::Message(message) => handler.on_message(message).await,
    }
}
