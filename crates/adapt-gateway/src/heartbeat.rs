//! Heartbeat manager
//!
//! Once started (on the server's `hello`), a spawned task periodically
//! pushes a ping frame to the writer and waits for an acknowledgement the
//! gateway supplies via [`HeartbeatManager::ack`] when a `pong` arrives. A
//! missed acknowledgement signals the reconnect notify the poll loop races
//! against. Acks carry no correlation id, so each one is attributed to the
//! most recent ping; a stale ack permit can survive a session boundary,
//! which is a known simplifying assumption rather than a bug to fix here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};
use tokio_tungstenite::tungstenite::Message;

/// Periodic liveness probe over the gateway transport
#[derive(Debug, Clone)]
pub struct HeartbeatManager {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    interval: Duration,
    timeout: Duration,
    ack: Notify,
    reconnect: Arc<Notify>,
    timing: Mutex<Timing>,
    /// Stop handle of the current run; `None` means inactive
    run: Mutex<Option<Arc<Notify>>>,
}

#[derive(Debug, Default)]
struct Timing {
    last_sent: Option<Instant>,
    last_acked: Option<Instant>,
    latency: Option<Duration>,
}

impl HeartbeatManager {
    /// Create an inactive manager
    ///
    /// `reconnect` is shared with the owning gateway; the manager signals
    /// it when an acknowledgement does not arrive in time.
    #[must_use]
    pub fn new(interval: Duration, timeout: Duration, reconnect: Arc<Notify>) -> Self {
        Self {
            inner: Arc::new(Inner {
                interval,
                timeout,
                ack: Notify::new(),
                reconnect,
                timing: Mutex::new(Timing::default()),
                run: Mutex::new(None),
            }),
        }
    }

    /// Start beating, replacing any previous run
    ///
    /// `ping` is the pre-encoded probe frame for this session's wire
    /// format; the manager itself never touches the codec.
    pub fn start(&self, outbound: mpsc::UnboundedSender<Message>, ping: Message) {
        self.stop();
        let stop = Arc::new(Notify::new());
        *self.inner.run.lock() = Some(stop.clone());

        let inner = self.inner.clone();
        tokio::spawn(async move {
            tracing::debug!(
                interval_ms = inner.interval.as_millis(),
                timeout_ms = inner.timeout.as_millis(),
                "heartbeat started"
            );
            loop {
                if outbound.send(ping.clone()).is_err() {
                    // Writer gone, the transport is already down
                    break;
                }
                inner.timing.lock().last_sent = Some(Instant::now());

                tokio::select! {
                    () = stop.notified() => break,
                    () = inner.ack.notified() => {
                        let now = Instant::now();
                        let mut timing = inner.timing.lock();
                        timing.last_acked = Some(now);
                        timing.latency = timing.last_sent.map(|sent| now - sent);
                        if let Some(latency) = timing.latency {
                            tracing::trace!(latency_ms = latency.as_millis(), "heartbeat acked");
                        }
                    }
                    () = tokio::time::sleep(inner.timeout) => {
                        tracing::warn!(
                            timeout_ms = inner.timeout.as_millis(),
                            "heartbeat ack timed out, requesting reconnect"
                        );
                        inner.reconnect.notify_one();
                        break;
                    }
                }

                tokio::select! {
                    () = stop.notified() => break,
                    () = tokio::time::sleep(inner.interval) => {}
                }
            }

            // Mark inactive unless a newer run already took over
            let mut run = inner.run.lock();
            if run.as_ref().is_some_and(|current| Arc::ptr_eq(current, &stop)) {
                *run = None;
            }
            tracing::debug!("heartbeat stopped");
        });
    }

    /// Acknowledge the most recent ping
    pub fn ack(&self) {
        self.inner.ack.notify_one();
    }

    /// Stop beating; a no-op when already inactive
    pub fn stop(&self) {
        if let Some(stop) = self.inner.run.lock().take() {
            stop.notify_one();
        }
    }

    /// Whether a beat task is currently running
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.run.lock().is_some()
    }

    /// Round-trip time of the last acknowledged ping
    #[must_use]
    pub fn latency(&self) -> Option<Duration> {
        self.inner.timing.lock().latency
    }
}
