use std::sync::Arc;
use std::time::Duration;

use adapt_core::Event;
use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::time::Instant;

/// Boxed async callback a listener fires with a clone of the event.
pub type ListenerCallback = Arc<dyn Fn(Event) -> BoxFuture<'static, ()> + Send + Sync>;

/// Predicate deciding whether a name-matched event fires a listener.
pub type CheckFn = Arc<dyn Fn(&Event) -> bool + Send + Sync>;

/// Token for removing a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Misuse caught at registration time, before the listener is stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListenError {
    #[error("a listener needs at least one event name")]
    NoEventNames,
    #[error("`once` and an explicit `limit` are mutually exclusive")]
    OnceWithLimit,
    #[error("a listener limit of zero would never fire")]
    ZeroLimit,
}

pub(crate) struct Listener {
    pub id: ListenerId,
    pub names: Vec<String>,
    pub check: Option<CheckFn>,
    /// Absolute expiry; `None` means no timeout.
    pub deadline: Option<Instant>,
    /// Firings left; `None` means unlimited.
    pub remaining: Option<u32>,
    pub callback: ListenerCallback,
}

impl Listener {
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }
}

/// Event-name comparison is case-insensitive and tolerates the handler
/// method convention, so `"on_message"`, `"Message"`, and `"message"` all
/// subscribe to the same event.
pub(crate) fn normalize_event_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.strip_prefix("on_") {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// Builder for a listener; finished by [`register`](Self::register).
///
/// Created through `Dispatcher::listen` or `Client::listen`.
#[must_use = "a listener builder does nothing until registered"]
pub struct ListenerBuilder<'a> {
    pub(crate) dispatcher: &'a super::Dispatcher,
    pub(crate) names: Vec<String>,
    pub(crate) check: Option<CheckFn>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) limit: Option<u32>,
    pub(crate) once: bool,
}

impl ListenerBuilder<'_> {
    /// Only fire when the predicate passes. A failed check does not count
    /// against the limit.
    pub fn check(mut self, check: impl Fn(&Event) -> bool + Send + Sync + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    /// Expire the listener after the duration, measured from registration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Expire the listener after it has fired this many times.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Shorthand for a limit of one.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Validate and store the listener.
    pub fn register<F, Fut>(self, callback: F) -> Result<ListenerId, ListenError>
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let remaining = match (self.once, self.limit) {
            (true, Some(_)) => return Err(ListenError::OnceWithLimit),
            (true, None) => Some(1),
            (false, Some(0)) => return Err(ListenError::ZeroLimit),
            (false, limit) => limit,
        };
        if self.names.is_empty() {
            return Err(ListenError::NoEventNames);
        }

        let callback: ListenerCallback = Arc::new(move |event| Box::pin(callback(event)));
        Ok(self.dispatcher.insert(
            self.names,
            self.check,
            self.timeout.map(|timeout| Instant::now() + timeout),
            remaining,
            callback,
        ))
    }
}
