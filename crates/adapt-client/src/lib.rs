//! # adapt-client
//!
//! The user-facing facade over the Adapt client stack: construct a
//! [`Client`] from a token or credentials, register an [`EventHandler`] or
//! ad-hoc listeners, then `start` (or `run`) to connect and stay connected.
//!
//! ```no_run
//! use adapt_client::{Client, EventHandler};
//! use adapt_core::entities::Message;
//!
//! struct Handler;
//!
//! #[async_trait::async_trait]
//! impl EventHandler for Handler {
//!     async fn on_message(&self, message: Message) {
//!         println!("{:?}", message.content);
//!     }
//! }
//!
//! # async fn demo() -> Result<(), adapt_client::ClientError> {
//! let client = Client::new("my.token");
//! client.set_event_handler(Handler);
//! client.run().await
//! # }
//! ```

mod client;
pub mod dispatch;
mod error;

pub use client::Client;
pub use dispatch::{DispatchReport, Dispatcher, EventHandler, ListenError, ListenerId, WaitError};
pub use error::ClientError;

// The layers underneath, for callers that need them directly
pub use adapt_cache::ConnectionState;
pub use adapt_common::{ClientConfig, ServerConfig};
pub use adapt_core::{entities, Event, Snowflake};
pub use adapt_gateway::{GatewayError, GatewayOptions};
pub use adapt_http::{HttpClient, HttpError};
