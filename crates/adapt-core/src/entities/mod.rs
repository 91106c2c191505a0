//! Cache-resident entities
//!
//! These are the mutable forms the connection cache holds. Each entity with
//! an id lives behind a [`Shared`] handle that is allocated once per id and
//! written through on every update, so everyone holding the handle observes
//! the newest state.

mod channel;
mod guild;
mod member;
mod message;
mod presence;
mod ready;
mod relationship;
mod role;
mod shared;
mod user;

pub use channel::{ChannelType, DMChannel, GuildChannel, PermissionOverwrite};
pub use guild::{Guild, MemberCounts};
pub use member::Member;
pub use message::{Message, MessageType};
pub use presence::{Device, Presence, Status};
pub use ready::ReadyEvent;
pub use relationship::{Relationship, RelationshipKind};
pub use role::{PermissionPair, Role};
pub use shared::{Shared, shared};
pub use user::{ClientUser, User};
