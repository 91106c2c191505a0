//! Connection state - the client-side mirror of the server

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;

use adapt_core::wire::{
    RawDmChannel, RawGuild, RawGuildCreate, RawGuildUpdate, RawMember, RawMessageCreate, RawReady,
    RawRelationship, RawUser, RawUserUpdate,
};
use adapt_core::{
    shared, ClientUser, DMChannel, Event, Guild, GuildChannel, Member, Message, ReadyEvent,
    Relationship, RelationshipKind, Role, Shared, Snowflake, Status, User,
};

use crate::error::CacheError;
use crate::events::{EventSink, EventStream};
use crate::ready::ReadySignal;

/// The authoritative client-side view of the session
///
/// All maps hold shared handles; an entity with a given id is allocated once
/// and every later update for that id writes through the existing handle.
/// Mutation comes exclusively from the gateway's poll task, one event at a
/// time, so the per-entity locks are never contended by writers.
#[derive(Debug)]
pub struct ConnectionState {
    users: DashMap<Snowflake, Shared<User>>,
    relationships: DashMap<Snowflake, Shared<Relationship>>,
    guilds: DashMap<Snowflake, Shared<Guild>>,
    dm_channels: DashMap<Snowflake, Shared<DMChannel>>,
    current_user: RwLock<Option<ClientUser>>,
    ready: ReadySignal,
    connect_status: Status,
    events: EventSink,
}

impl ConnectionState {
    /// Create an empty state and the stream its events come out of
    #[must_use]
    pub fn new(connect_status: Status) -> (Self, EventStream) {
        let (events, stream) = EventSink::channel();
        let state = Self {
            users: DashMap::new(),
            relationships: DashMap::new(),
            guilds: DashMap::new(),
            dm_channels: DashMap::new(),
            current_user: RwLock::new(None),
            ready: ReadySignal::new(),
            connect_status,
            events,
        };
        (state, stream)
    }

    /// The presence status sent during identify
    #[must_use]
    pub fn connect_status(&self) -> Status {
        self.connect_status
    }

    /// The one-shot "session established" signal
    #[must_use]
    pub fn ready(&self) -> &ReadySignal {
        &self.ready
    }

    /// The user this client is logged in as, absent until ready
    #[must_use]
    pub fn current_user(&self) -> Option<ClientUser> {
        self.current_user.read().clone()
    }

    /// Push an event into the pipeline on behalf of the gateway
    pub fn emit(&self, event: Event) {
        self.events.emit(event);
    }

    // === Lookups ===

    #[must_use]
    pub fn get_user(&self, id: Snowflake) -> Option<Shared<User>> {
        self.users.get(&id).map(|entry| entry.clone())
    }

    #[must_use]
    pub fn get_relationship(&self, user_id: Snowflake) -> Option<Shared<Relationship>> {
        self.relationships.get(&user_id).map(|entry| entry.clone())
    }

    #[must_use]
    pub fn get_guild(&self, id: Snowflake) -> Option<Shared<Guild>> {
        self.guilds.get(&id).map(|entry| entry.clone())
    }

    #[must_use]
    pub fn get_dm_channel(&self, id: Snowflake) -> Option<Shared<DMChannel>> {
        self.dm_channels.get(&id).map(|entry| entry.clone())
    }

    // === Upserts ===

    /// Insert a fully constructed user, overwriting any cached state for
    /// that id but reusing its handle
    pub fn add_user(&self, user: User) -> Shared<User> {
        match self.users.entry(user.id) {
            Entry::Occupied(entry) => {
                *entry.get().write() = user;
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(shared(user)).clone(),
        }
    }

    /// Upsert a user from a raw payload
    pub fn add_raw_user(&self, raw: &RawUser) -> Shared<User> {
        match self.users.entry(raw.id) {
            Entry::Occupied(entry) => {
                entry.get().write().apply(raw);
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(shared(User::from_raw(raw))).clone(),
        }
    }

    /// Upsert a relationship by peer user id, mutating the kind in place
    pub fn update_relationship(
        &self,
        user_id: Snowflake,
        kind: RelationshipKind,
    ) -> Shared<Relationship> {
        match self.relationships.entry(user_id) {
            Entry::Occupied(entry) => {
                entry.get().write().kind = kind;
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                entry.insert(shared(Relationship::new(user_id, kind))).clone()
            }
        }
    }

    /// Upsert the peer user, then the relationship itself
    pub fn update_raw_relationship(&self, raw: &RawRelationship) -> Shared<Relationship> {
        self.add_raw_user(&raw.user);
        self.update_relationship(raw.user.id, raw.kind)
    }

    /// Upsert a guild and everything nested inside it
    pub fn add_raw_guild(&self, raw: &RawGuild) -> Shared<Guild> {
        let guild = match self.guilds.entry(raw.id) {
            Entry::Occupied(entry) => {
                entry.get().write().apply(raw);
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(shared(Guild::from_raw(raw))).clone(),
        };

        if let Some(members) = &raw.members {
            for member in members {
                self.upsert_member(&guild, member);
            }
        }
        if let Some(roles) = &raw.roles {
            for role in roles {
                let existing = guild.read().role(role.id);
                match existing {
                    Some(handle) => handle.write().apply(role),
                    None => guild.write().insert_role(shared(Role::from_raw(role))),
                }
            }
        }
        if let Some(channels) = &raw.channels {
            for channel in channels {
                let existing = guild.read().channel(channel.id);
                match existing {
                    Some(handle) => handle.write().apply(channel),
                    None => guild
                        .write()
                        .insert_channel(shared(GuildChannel::from_raw(channel))),
                }
            }
        }

        guild
    }

    /// Upsert a DM channel from a raw payload
    pub fn add_raw_dm_channel(&self, raw: &RawDmChannel) -> Shared<DMChannel> {
        match self.dm_channels.entry(raw.id) {
            Entry::Occupied(entry) => {
                entry.get().write().apply(raw);
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(shared(DMChannel::from_raw(raw))).clone(),
        }
    }

    fn upsert_member(&self, guild: &Shared<Guild>, raw: &RawMember) {
        let user = self.add_raw_user(&raw.user);
        let existing = guild.read().member(raw.user.id);
        match existing {
            Some(handle) => handle.write().apply(raw),
            None => guild.write().insert_member(shared(Member::from_raw(user, raw))),
        }
    }

    /// Drop every cached entity
    ///
    /// The ready signal is left as-is; it marks "a session was established
    /// at some point", not cache freshness.
    pub fn invalidate_caches(&self) {
        self.users.clear();
        self.relationships.clear();
        self.guilds.clear();
        self.dm_channels.clear();
        *self.current_user.write() = None;
        tracing::debug!("caches invalidated");
    }

    // === Event application ===

    /// Apply one decoded gateway envelope to the cache
    ///
    /// Tags without a handler here (including `hello`, `ping`, `pong`,
    /// `user_delete`, and anything a newer server might add) are ignored:
    /// the protocol is allowed to grow tags this client version does not
    /// understand, and such frames must not take the connection down.
    pub fn process_event(&self, event: &str, data: Option<&Value>) -> Result<(), CacheError> {
        match event {
            "ready" => self.handle_ready(payload("ready", data)?),
            "user_update" => self.handle_user_update(&payload("user_update", data)?),
            "guild_create" => self.handle_guild_create(payload("guild_create", data)?),
            "guild_update" => self.handle_guild_update(&payload("guild_update", data)?),
            "message_create" => {
                self.handle_message_create(&payload("message_create", data)?);
            }
            other => {
                tracing::trace!(event = other, "no cache handler for event, ignoring");
            }
        }
        Ok(())
    }

    fn handle_ready(&self, raw: RawReady) {
        let user = ClientUser::from_raw(&raw.user);
        *self.current_user.write() = Some(user.clone());

        let guilds: Vec<_> = raw.guilds.iter().map(|g| self.add_raw_guild(g)).collect();
        let dm_channels: Vec<_> = raw
            .dm_channels
            .iter()
            .map(|c| self.add_raw_dm_channel(c))
            .collect();
        let relationships: Vec<_> = raw
            .relationships
            .iter()
            .map(|r| self.update_raw_relationship(r))
            .collect();

        let ready = ReadyEvent {
            session_id: raw.session_id,
            user,
            guilds,
            dm_channels,
            relationships,
        };

        let first = self.ready.resolve(ready.clone());
        tracing::info!(
            session_id = %ready.session_id,
            guilds = ready.guilds.len(),
            dm_channels = ready.dm_channels.len(),
            relationships = ready.relationships.len(),
            first_ready = first,
            "session ready"
        );
        self.events.emit(Event::Ready(ready));
    }

    fn handle_user_update(&self, raw: &RawUserUpdate) {
        let before = match self.get_user(raw.before.id) {
            Some(handle) => handle.read().clone(),
            None => User::from_raw(&raw.before),
        };
        let after = self.add_raw_user(&raw.after);
        self.events.emit(Event::UserUpdate { before, after });
    }

    fn handle_guild_create(&self, raw: RawGuildCreate) {
        let guild = self.add_raw_guild(&raw.guild);
        self.events.emit(Event::GuildCreate {
            guild,
            nonce: raw.nonce,
        });
    }

    fn handle_guild_update(&self, raw: &RawGuildUpdate) {
        let before = match self.get_guild(raw.before.id) {
            Some(handle) => handle.read().clone(),
            None => Guild::from_raw(&raw.before),
        };
        let after = self.add_raw_guild(&raw.after);
        self.events.emit(Event::GuildUpdate { before, after });
    }

    fn handle_message_create(&self, raw: &RawMessageCreate) {
        if let Some(author) = &raw.message.author {
            self.add_raw_user(author.user());
        }
        self.events.emit(Event::Message(Message::from_raw(&raw.message)));
    }
}

/// Decode an event payload, before any cache mutation
fn payload<T: serde::de::DeserializeOwned>(
    tag: &'static str,
    data: Option<&Value>,
) -> Result<T, CacheError> {
    let data = data.ok_or(CacheError::MissingData { event: tag })?;
    serde_json::from_value(data.clone()).map_err(|source| CacheError::decode(tag, source))
}
