//! One-shot "session established" signal

use adapt_core::ReadyEvent;
use tokio::sync::watch;

/// A single-assignment signal resolved by the first `ready` event
///
/// Resolution happens at most once; later attempts are checked no-ops so a
/// reconnect that re-delivers `ready` cannot clobber the original value.
/// Waiters registered before or after resolution both observe it.
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<Option<ReadyEvent>>,
    // Held so the channel survives with zero external subscribers
    _rx: watch::Receiver<Option<ReadyEvent>>,
}

impl ReadySignal {
    /// Create an unresolved signal
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self { tx, _rx: rx }
    }

    /// Resolve the signal, unless it already resolved
    ///
    /// Returns whether this call was the resolving one.
    pub fn resolve(&self, ready: ReadyEvent) -> bool {
        self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(ready);
            true
        })
    }

    /// Whether the signal has resolved
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// The resolved value, if any
    #[must_use]
    pub fn get(&self) -> Option<ReadyEvent> {
        self.tx.borrow().clone()
    }

    /// Suspend until the signal resolves
    pub async fn wait(&self) -> ReadyEvent {
        let mut rx = self.tx.subscribe();
        loop {
            if let Some(ready) = rx.borrow_and_update().clone() {
                return ready;
            }
            // The sender half lives in self, so the channel stays open for
            // as long as this borrow does.
            let _ = rx.changed().await;
        }
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}
