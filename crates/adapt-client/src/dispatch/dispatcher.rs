use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use adapt_core::Event;
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tokio::time::Instant;

use super::handler::{invoke, EventHandler};
use super::listener::{
    normalize_event_name, CheckFn, ListenError, Listener, ListenerBuilder, ListenerCallback,
    ListenerId,
};

/// `wait_for` outcomes that are not the event itself.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("no matching event within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Listen(#[from] ListenError),
}

/// What one `dispatch` call did.
///
/// Panicking callbacks are contained per invocation; their messages are
/// collected here instead of tearing down the dispatch loop.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Callbacks and handler methods that ran to completion.
    pub invoked: usize,
    /// Panic messages from callbacks that did not.
    pub failures: Vec<String>,
}

impl DispatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans events out to the primary handler and to registered listeners.
///
/// Listener expiry (timeout or firing limit) is evaluated lazily during
/// dispatch; an expired listener is swept the first time an event with a
/// matching name arrives after expiry.
#[derive(Default)]
pub struct Dispatcher {
    handler: RwLock<Option<Arc<dyn EventHandler>>>,
    listeners: Mutex<Vec<Listener>>,
    next_id: AtomicU64,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the primary handler.
    pub fn set_handler(&self, handler: Arc<dyn EventHandler>) {
        *self.handler.write() = Some(handler);
    }

    pub fn clear_handler(&self) {
        *self.handler.write() = None;
    }

    /// Start building a listener for the named events.
    pub fn listen(&self, events: &[&str]) -> ListenerBuilder<'_> {
        ListenerBuilder {
            dispatcher: self,
            names: events.iter().map(|name| normalize_event_name(name)).collect(),
            check: None,
            timeout: None,
            limit: None,
            once: false,
        }
    }

    /// Drop a listener before it expires on its own.
    pub fn remove(&self, id: ListenerId) {
        self.listeners.lock().retain(|listener| listener.id != id);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub(crate) fn insert(
        &self,
        names: Vec<String>,
        check: Option<CheckFn>,
        deadline: Option<Instant>,
        remaining: Option<u32>,
        callback: ListenerCallback,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push(Listener {
            id,
            names,
            check,
            deadline,
            remaining,
            callback,
        });
        id
    }

    /// Deliver one event to everything subscribed to it.
    ///
    /// The handler method and all matching listener callbacks run
    /// concurrently; the call returns once every invocation finished. The
    /// listener lock is held only while selecting callbacks, never across
    /// an await.
    pub async fn dispatch(&self, event: Event) -> DispatchReport {
        let name = event.name();
        let callbacks = self.select_callbacks(&name, &event);

        let mut tasks: JoinSet<()> = JoinSet::new();
        if let Some(handler) = self.handler.read().clone() {
            let handler_event = event.clone();
            tasks.spawn(async move { invoke(handler.as_ref(), handler_event).await });
        }
        for callback in callbacks {
            tasks.spawn(callback(event.clone()));
        }

        let mut report = DispatchReport::default();
        while let Some(outcome) = tasks.join_next().await {
            match outcome {
                Ok(()) => report.invoked += 1,
                Err(err) => {
                    tracing::error!(event = %name, error = %err, "event callback panicked");
                    report.failures.push(err.to_string());
                }
            }
        }
        report
    }

    /// Pick the callbacks this event fires and sweep expired listeners.
    fn select_callbacks(&self, name: &str, event: &Event) -> Vec<ListenerCallback> {
        let now = Instant::now();
        let mut selected = Vec::new();
        let mut listeners = self.listeners.lock();

        for listener in listeners.iter_mut() {
            if !listener.matches(name) {
                continue;
            }
            if listener.deadline.is_some_and(|deadline| now >= deadline) {
                // Swept by the retain below
                listener.remaining = Some(0);
                continue;
            }
            if let Some(check) = &listener.check {
                if !check(event) {
                    continue;
                }
            }
            if let Some(remaining) = &mut listener.remaining {
                *remaining -= 1;
            }
            selected.push(listener.callback.clone());
        }
        listeners.retain(|listener| listener.remaining != Some(0));
        selected
    }

    /// Block until an event with one of the given names arrives, or the
    /// timeout elapses.
    pub async fn wait_for(
        &self,
        events: &[&str],
        timeout: Duration,
    ) -> Result<Event, WaitError> {
        self.wait_for_matching(events, |_| true, timeout).await
    }

    /// Like [`wait_for`](Self::wait_for), with a predicate that
    /// name-matched events must also pass.
    pub async fn wait_for_matching<F>(
        &self,
        events: &[&str],
        check: F,
        timeout: Duration,
    ) -> Result<Event, WaitError>
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        let (tx, rx) = oneshot::channel();
        // The callback is `Fn`, the sender is consumed on use
        let slot = Arc::new(Mutex::new(Some(tx)));

        let id = self
            .listen(events)
            .check(check)
            .timeout(timeout)
            .once()
            .register(move |event| {
                let sender = slot.lock().take();
                async move {
                    if let Some(sender) = sender {
                        let _ = sender.send(event);
                    }
                }
            })?;

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(event)) => Ok(event),
            // Receive error means the listener was dropped without firing
            Ok(Err(_)) | Err(_) => {
                self.remove(id);
                Err(WaitError::Timeout(timeout))
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("has_handler", &self.handler.read().is_some())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use adapt_core::entities::ReadyEvent;
    use adapt_core::{Snowflake, UserFlags};

    use super::*;

    fn message_event(content: &str) -> Event {
        use adapt_core::entities::{Message, MessageType};
        use adapt_core::MessageFlags;

        Event::Message(Message {
            id: Snowflake::new(1),
            revision_id: None,
            channel_id: Snowflake::new(2),
            author_id: Some(Snowflake::new(3)),
            kind: MessageType::Default,
            content: Some(content.to_string()),
            flags: MessageFlags::empty(),
            stars: 0,
        })
    }

    fn ready_event() -> Event {
        use adapt_core::entities::{ClientUser, User};

        Event::Ready(ReadyEvent {
            session_id: "sess".to_string(),
            user: ClientUser {
                user: User {
                    id: Snowflake::new(9),
                    username: "me".to_string(),
                    discriminator: 1,
                    avatar: None,
                    banner: None,
                    bio: None,
                    flags: UserFlags::empty(),
                },
                email: None,
            },
            guilds: Vec::new(),
            dm_channels: Vec::new(),
            relationships: Vec::new(),
        })
    }

    #[tokio::test]
    async fn test_listener_fires_on_matching_name_only() {
        let dispatcher = Dispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        dispatcher
            .listen(&["message"])
            .register(move |_| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        dispatcher.dispatch(ready_event()).await;
        dispatcher.dispatch(message_event("hi")).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_listener_name_normalization_on_registration() {
        let dispatcher = Dispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        dispatcher
            .listen(&["on_Message"])
            .register(move |_| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        dispatcher.dispatch(message_event("hi")).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_limit_expires_listener_after_firings() {
        let dispatcher = Dispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        dispatcher
            .listen(&["message"])
            .limit(2)
            .register(move |_| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        for _ in 0..4 {
            dispatcher.dispatch(message_event("hi")).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_check_does_not_consume_limit() {
        let dispatcher = Dispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        dispatcher
            .listen(&["message"])
            .check(|event| {
                matches!(event, Event::Message(message) if message.content.as_deref() == Some("yes"))
            })
            .once()
            .register(move |_| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        dispatcher.dispatch(message_event("no")).await;
        assert_eq!(dispatcher.listener_count(), 1);

        dispatcher.dispatch(message_event("yes")).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_sweeps_listener_lazily() {
        let dispatcher = Dispatcher::new();
        dispatcher
            .listen(&["message"])
            .timeout(Duration::from_secs(5))
            .register(|_| async {})
            .unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;

        // Still registered until a matching event triggers the sweep
        assert_eq!(dispatcher.listener_count(), 1);
        let report = dispatcher.dispatch(message_event("late")).await;
        assert_eq!(report.invoked, 0);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_registration_misuse_rejected() {
        let dispatcher = Dispatcher::new();

        let err = dispatcher
            .listen(&[])
            .register(|_| async {})
            .unwrap_err();
        assert_eq!(err, ListenError::NoEventNames);

        let err = dispatcher
            .listen(&["message"])
            .once()
            .limit(3)
            .register(|_| async {})
            .unwrap_err();
        assert_eq!(err, ListenError::OnceWithLimit);

        let err = dispatcher
            .listen(&["message"])
            .limit(0)
            .register(|_| async {})
            .unwrap_err();
        assert_eq!(err, ListenError::ZeroLimit);

        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_panicking_callback_contained_in_report() {
        let dispatcher = Dispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();

        dispatcher
            .listen(&["message"])
            .register(|_| async { panic!("listener exploded") })
            .unwrap();
        dispatcher
            .listen(&["message"])
            .register(move |_| {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        let report = dispatcher.dispatch(message_event("hi")).await;
        assert_eq!(report.invoked, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_clean());
        // The healthy listener still ran
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wait_for_resolves_with_matching_event() {
        let dispatcher = Arc::new(Dispatcher::new());

        let waiter = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .wait_for_matching(
                        &["message"],
                        |event| {
                            matches!(
                                event,
                                Event::Message(message)
                                    if message.content.as_deref() == Some("target")
                            )
                        },
                        Duration::from_secs(5),
                    )
                    .await
            })
        };

        // Give the waiter a chance to register
        tokio::task::yield_now().await;
        while dispatcher.listener_count() == 0 {
            tokio::task::yield_now().await;
        }

        dispatcher.dispatch(message_event("other")).await;
        dispatcher.dispatch(message_event("target")).await;

        let event = waiter.await.unwrap().unwrap();
        match event {
            Event::Message(message) => assert_eq!(message.content.as_deref(), Some("target")),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_times_out() {
        let dispatcher = Dispatcher::new();
        let result = dispatcher
            .wait_for(&["message"], Duration::from_secs(1))
            .await;
        assert!(matches!(result, Err(WaitError::Timeout(_))));
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
