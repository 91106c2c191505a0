//! Event pipeline between the cache and the dispatcher
//!
//! The cache never calls the dispatcher directly; it pushes resolved events
//! into an unbounded channel and whoever owns the receiving end (the client
//! facade's pump task) fans them out. This keeps the crate dependency flow
//! one-directional.

use adapt_core::Event;
use tokio::sync::mpsc;

/// The sending half of the event pipeline
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<Event>,
}

/// The receiving half of the event pipeline
pub type EventStream = mpsc::UnboundedReceiver<Event>;

impl EventSink {
    /// Create a connected sink/stream pair
    #[must_use]
    pub fn channel() -> (Self, EventStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Push an event into the pipeline
    ///
    /// A closed receiver is not an error for the sender: the client may
    /// simply not be pumping events (e.g. during shutdown), and cache
    /// mutation must not fail because of that.
    pub fn emit(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event dropped: no active receiver");
        }
    }
}
