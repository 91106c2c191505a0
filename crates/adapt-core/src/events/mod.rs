//! Client-facing events

mod event;

pub use event::Event;
