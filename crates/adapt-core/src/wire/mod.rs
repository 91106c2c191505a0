//! Raw wire payloads - serde mirrors of the server's JSON shapes
//!
//! These types decode exactly what the server sends; the `entities` module
//! holds the cache-resident forms built from them. Unknown keys are
//! ignored, missing required keys surface as decode errors.

mod channel;
mod gateway;
mod guild;
mod message;
mod presence;
mod user;

pub use channel::{RawDmChannel, RawGuildChannel, RawPermissionOverwrite};
pub use gateway::{
    RawGuildCreate, RawGuildUpdate, RawMessageCreate, RawReady, RawUserDelete, RawUserUpdate,
};
pub use guild::{RawGuild, RawGuildMemberCount, RawMember, RawRole};
pub use message::{RawMessage, RawMessageAuthor};
pub use presence::RawPresence;
pub use user::{RawClientUser, RawRelationship, RawUser};
