//! Gateway connection state machine
//!
//! `connect` opens the transport and performs the greeting/identify
//! handshake; `start` then polls frames forever, recovering from
//! [`GatewayError::AttemptReconnect`] with a fresh connect and surfacing
//! everything else after guaranteed cleanup. A writer task owns the sink;
//! the poll task owns the stream and is the only writer of the cache.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{FutureExt, SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Notify};
use tokio_tungstenite::tungstenite::error::ProtocolError as WsProtocolError;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use adapt_cache::ConnectionState;
use adapt_core::{Event, Status};

use crate::error::GatewayError;
use crate::heartbeat::HeartbeatManager;
use crate::protocol::{ClientFrame, WireFormat};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type OutboundSlot = Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>;

/// Construction options for a gateway connection
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Prefer the binary (MessagePack) wire format over JSON
    pub prefer_msgpack: bool,
    /// Time between heartbeat pings
    pub heartbeat_interval: Duration,
    /// Time to wait for a heartbeat acknowledgement
    pub heartbeat_timeout: Duration,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            prefer_msgpack: true,
            heartbeat_interval: Duration::from_secs(15),
            heartbeat_timeout: Duration::from_secs(3),
        }
    }
}

/// A client connection to the harmony gateway
///
/// The object outlives individual transports: every `connect` replaces the
/// stream and writer while the cache, heartbeat manager, and wire format
/// keep their identity.
pub struct Gateway {
    url: String,
    token: String,
    format: WireFormat,
    state: Arc<ConnectionState>,
    heartbeat: HeartbeatManager,
    reconnect: Arc<Notify>,
    shutdown: Arc<Notify>,
    stream: Option<SplitStream<WsStream>>,
    outbound: OutboundSlot,
}

impl Gateway {
    /// Create a disconnected gateway
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        state: Arc<ConnectionState>,
        options: &GatewayOptions,
    ) -> Self {
        let reconnect = Arc::new(Notify::new());
        Self {
            url: url.into(),
            token: token.into(),
            format: WireFormat::from_preference(options.prefer_msgpack),
            state,
            heartbeat: HeartbeatManager::new(
                options.heartbeat_interval,
                options.heartbeat_timeout,
                reconnect.clone(),
            ),
            reconnect,
            shutdown: Arc::new(Notify::new()),
            stream: None,
            outbound: Arc::new(Mutex::new(None)),
        }
    }

    /// A cheap handle for controlling the connection from other tasks
    #[must_use]
    pub fn handle(&self) -> GatewayHandle {
        GatewayHandle {
            format: self.format,
            heartbeat: self.heartbeat.clone(),
            outbound: self.outbound.clone(),
            shutdown: self.shutdown.clone(),
        }
    }

    /// The wire format this gateway speaks
    #[must_use]
    pub fn wire_format(&self) -> WireFormat {
        self.format
    }

    /// Round-trip time of the last acknowledged heartbeat
    #[must_use]
    pub fn latency(&self) -> Option<Duration> {
        self.heartbeat.latency()
    }

    fn connect_url(&self) -> String {
        format!(
            "{}/?format={}",
            self.url.trim_end_matches('/'),
            self.format.query_value()
        )
    }

    /// Open the transport and perform the greeting/identify handshake
    ///
    /// The server speaks first: exactly one receive is expected to deliver
    /// the `hello` greeting (which starts the heartbeat) before identify is
    /// sent. Emits `connect` or `reconnect` once the handshake is through.
    pub async fn connect(&mut self, is_reconnect: bool) -> Result<(), GatewayError> {
        let url = self.connect_url();
        tracing::info!(url = %url, is_reconnect, "connecting to gateway");

        let (ws, _response) = connect_async(&url).await?;
        let (sink, stream) = ws.split();
        self.stream = Some(stream);

        let (tx, rx) = mpsc::unbounded_channel();
        *self.outbound.lock() = Some(tx);
        tokio::spawn(write_loop(sink, rx));

        // A reconnect permit left over from the previous session must not
        // immediately tear this one down
        let _ = self.reconnect.notified().now_or_never();

        self.poll().await?;

        self.send_frame(&ClientFrame::identify(
            self.token.clone(),
            self.state.connect_status(),
        ))?;

        self.state.emit(if is_reconnect {
            Event::Reconnect
        } else {
            Event::Connect
        });
        Ok(())
    }

    /// Receive and process exactly one frame
    ///
    /// The receive races the heartbeat's reconnect signal and the client's
    /// shutdown signal, so a cross-task condition lands in this loop's
    /// control flow instead of vanishing in another task.
    pub async fn poll(&mut self) -> Result<(), GatewayError> {
        let reconnect = self.reconnect.clone();
        let shutdown = self.shutdown.clone();
        let stream = self.stream.as_mut().ok_or(GatewayError::NotConnected)?;

        let message = tokio::select! {
            () = shutdown.notified() => return Err(GatewayError::Closed),
            () = reconnect.notified() => return Err(GatewayError::AttemptReconnect),
            frame = stream.next() => match frame {
                None => return Err(GatewayError::AttemptReconnect),
                Some(Err(err)) if is_abnormal_closure(&err) => {
                    tracing::debug!(error = %err, "connection severed without close handshake");
                    return Err(GatewayError::AttemptReconnect);
                }
                Some(Err(err)) => return Err(GatewayError::Transport(err)),
                Some(Ok(message)) => message,
            },
        };

        if let Message::Close(frame) = &message {
            tracing::debug!(frame = ?frame, "server closed the connection");
            return Err(GatewayError::AttemptReconnect);
        }
        self.process_message(&message)
    }

    /// Decode one data frame, raw-dispatch it, then apply it
    fn process_message(&mut self, message: &Message) -> Result<(), GatewayError> {
        // Websocket-level ping/pong is absorbed by the transport
        let Some(envelope) = self.format.decode(message)? else {
            return Ok(());
        };
        tracing::trace!(event = %envelope.event, "frame received");

        // Raw dispatch happens before any interpretation
        self.state.emit(Event::Raw {
            event: envelope.event.clone(),
            data: envelope.data.clone(),
        });

        match envelope.event.as_str() {
            "hello" => {
                let ping = self.format.encode(&ClientFrame::Ping)?;
                let outbound = self
                    .outbound
                    .lock()
                    .clone()
                    .ok_or(GatewayError::NotConnected)?;
                self.heartbeat.start(outbound, ping);
            }
            "pong" => self.heartbeat.ack(),
            _ => {}
        }

        self.state.process_event(&envelope.event, envelope.data.as_ref())?;
        Ok(())
    }

    /// Connect and poll until a fatal error
    ///
    /// `AttemptReconnect` is recovered in place with a fresh connect; any
    /// other error tears down and propagates. Cleanup (heartbeat stopped,
    /// transport closed, `disconnect` emitted) runs on every exit path.
    pub async fn start(&mut self) -> Result<(), GatewayError> {
        let result = self.run().await;

        self.heartbeat.stop();
        self.shutdown_transport();
        self.state.emit(Event::Disconnect);

        if let Err(err) = &result {
            if matches!(err, GatewayError::Closed) {
                tracing::info!("gateway closed");
            } else {
                tracing::error!(error = %err, "gateway terminated");
            }
        }
        result
    }

    async fn run(&mut self) -> Result<(), GatewayError> {
        self.connect(false).await?;
        loop {
            match self.poll().await {
                Ok(()) => {}
                Err(GatewayError::AttemptReconnect) => {
                    tracing::warn!("connection interrupted, reconnecting");
                    self.heartbeat.stop();
                    self.shutdown_transport();
                    self.connect(true).await?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Stop the heartbeat, then close the transport with a normal-closure
    /// code; safe to call when already closed
    pub fn close(&mut self) {
        self.heartbeat.stop();
        self.shutdown_transport();
        self.shutdown.notify_one();
    }

    /// Send a presence change; an absent status leaves it unchanged
    pub fn update_presence(&self, status: Option<Status>) -> Result<(), GatewayError> {
        self.send_frame(&ClientFrame::UpdatePresence { status })
    }

    fn send_frame(&self, frame: &ClientFrame) -> Result<(), GatewayError> {
        let message = self.format.encode(frame)?;
        let guard = self.outbound.lock();
        let tx = guard.as_ref().ok_or(GatewayError::NotConnected)?;
        tx.send(message).map_err(|_| GatewayError::NotConnected)
    }

    fn shutdown_transport(&mut self) {
        if let Some(tx) = self.outbound.lock().take() {
            let _ = tx.send(close_message());
        }
        self.stream = None;
    }
}

/// Control handle shared with the client facade
///
/// Cheap to clone; usable while `start` runs in another task.
#[derive(Debug, Clone)]
pub struct GatewayHandle {
    format: WireFormat,
    heartbeat: HeartbeatManager,
    outbound: OutboundSlot,
    shutdown: Arc<Notify>,
}

impl GatewayHandle {
    /// Round-trip time of the last acknowledged heartbeat
    #[must_use]
    pub fn latency(&self) -> Option<Duration> {
        self.heartbeat.latency()
    }

    /// Send a presence change; an absent status leaves it unchanged
    pub fn update_presence(&self, status: Option<Status>) -> Result<(), GatewayError> {
        let message = self
            .format
            .encode(&ClientFrame::UpdatePresence { status })?;
        let guard = self.outbound.lock();
        let tx = guard.as_ref().ok_or(GatewayError::NotConnected)?;
        tx.send(message).map_err(|_| GatewayError::NotConnected)
    }

    /// Shut the connection down: heartbeat first, then the transport
    ///
    /// The running `start` loop observes this as [`GatewayError::Closed`].
    /// Safe to call when already closed.
    pub fn close(&self) {
        self.heartbeat.stop();
        if let Some(tx) = self.outbound.lock().take() {
            let _ = tx.send(close_message());
        }
        self.shutdown.notify_one();
    }
}

/// Whether a transport error means the peer vanished rather than the
/// protocol being broken; such losses are recovered by reconnecting
fn is_abnormal_closure(err: &WsError) -> bool {
    match err {
        WsError::ConnectionClosed
        | WsError::AlreadyClosed
        | WsError::Protocol(WsProtocolError::ResetWithoutClosingHandshake) => true,
        WsError::Io(io) => matches!(
            io.kind(),
            std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::BrokenPipe
                | std::io::ErrorKind::UnexpectedEof
        ),
        _ => false,
    }
}

fn close_message() -> Message {
    Message::Close(Some(CloseFrame {
        code: CloseCode::Normal,
        reason: "".into(),
    }))
}

/// Writer task: forwards queued frames to the sink until the channel or
/// the sink goes away
async fn write_loop(
    mut sink: SplitSink<WsStream, Message>,
    mut rx: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(message) = rx.recv().await {
        let is_close = matches!(message, Message::Close(_));
        if sink.send(message).await.is_err() {
            break;
        }
        if is_close {
            break;
        }
    }
    let _ = sink.close().await;
}
