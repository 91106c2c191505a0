//! Event dispatch: the handler trait, ad-hoc listeners, and the
//! dispatcher that fans events out to both.

mod dispatcher;
mod handler;
mod listener;

pub use dispatcher::{DispatchReport, Dispatcher, WaitError};
pub use handler::EventHandler;
pub use listener::{ListenError, ListenerBuilder, ListenerId};
