//! # adapt-http
//!
//! The REST side of the client: a thin reqwest wrapper carrying the base
//! URL and token, with per-resource endpoint methods. The gateway core only
//! calls into this crate for login/registration; everything else is
//! convenience surface for library users.

mod api;
mod client;
mod error;
mod requests;

pub use client::HttpClient;
pub use error::HttpError;
pub use requests::{
    CreateGuildChannelPayload, CreateGuildPayload, CreateMessagePayload, CreateUserResponse,
    EditMessagePayload, EditUserPayload, FriendRequestPayload, GuildQuery, LoginResponse,
    MessageHistoryQuery,
};
