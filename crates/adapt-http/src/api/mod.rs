//! Per-resource endpoint methods on [`HttpClient`](crate::HttpClient).

mod auth;
mod channels;
mod guilds;
mod members;
mod messages;
mod relationships;
mod users;
