//! # adapt-cache
//!
//! The connection state cache: client-side mirrors of server entities
//! (users, relationships, guilds, DM channels), populated from the gateway's
//! `ready` snapshot and kept current by subsequent events. Entities are held
//! behind shared handles and mutated in place, so a handle obtained once
//! stays valid for the life of the process.

mod error;
mod events;
mod ready;
mod state;

pub use error::CacheError;
pub use events::{EventSink, EventStream};
pub use ready::ReadySignal;
pub use state::ConnectionState;
