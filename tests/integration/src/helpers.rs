//! Test helpers: a scriptable mock harmony gateway
//!
//! The mock speaks the real wire protocol over both formats: it greets
//! each connection with `hello`, answers `identify` with `ready`, answers
//! `ping` with `pong` (unless told not to), and records everything the
//! client sent. Tests push additional events and kill connections to
//! exercise dispatch and reconnect paths.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use futures_util::{SinkExt, StreamExt};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::any;
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use adapt_common::ClientConfig;

/// A running mock gateway bound to an ephemeral port
pub struct MockGateway {
    pub url: String,
    state: Arc<GatewayState>,
    _handle: JoinHandle<()>,
}

struct GatewayState {
    /// The `ready` payload served after each identify
    ready: Mutex<Value>,
    /// Every identify frame received, decoded to JSON
    identifies: Mutex<Vec<Value>>,
    /// Every update_presence frame received
    presence_updates: Mutex<Vec<Value>>,
    connections: AtomicUsize,
    pings: AtomicUsize,
    /// When false, pings go unanswered so heartbeats time out
    answer_pings: AtomicBool,
    /// Kills every live connection without a close frame
    kill: broadcast::Sender<()>,
    /// Envelopes pushed to every live connection
    push: broadcast::Sender<Value>,
}

/// Install a test subscriber so `RUST_LOG` works in test runs; later calls
/// are no-ops
pub fn init_tracing() {
    let _ = adapt_common::try_init_tracing();
}

impl MockGateway {
    /// Start a mock serving the given `ready` payload
    pub async fn start(ready: Value) -> Result<Self> {
        init_tracing();
        let (kill, _) = broadcast::channel(8);
        let (push, _) = broadcast::channel(64);
        let state = Arc::new(GatewayState {
            ready: Mutex::new(ready),
            identifies: Mutex::new(Vec::new()),
            presence_updates: Mutex::new(Vec::new()),
            connections: AtomicUsize::new(0),
            pings: AtomicUsize::new(0),
            answer_pings: AtomicBool::new(true),
            kill,
            push,
        });

        let app = Router::new()
            .route("/", any(gateway_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            url: format!("ws://{addr}"),
            state,
            _handle: handle,
        })
    }

    /// Total connections accepted so far
    pub fn connection_count(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    /// Identify frames received so far, in arrival order
    pub fn identifies(&self) -> Vec<Value> {
        self.state.identifies.lock().clone()
    }

    pub fn presence_updates(&self) -> Vec<Value> {
        self.state.presence_updates.lock().clone()
    }

    pub fn ping_count(&self) -> usize {
        self.state.pings.load(Ordering::SeqCst)
    }

    /// Stop answering pings; the client's heartbeat will time out
    pub fn stop_answering_pings(&self) {
        self.state.answer_pings.store(false, Ordering::SeqCst);
    }

    /// Replace the `ready` payload served to future identifies
    pub fn set_ready(&self, ready: Value) {
        *self.state.ready.lock() = ready;
    }

    /// Sever every live connection without a websocket close frame
    pub fn drop_connections(&self) {
        let _ = self.state.kill.send(());
    }

    /// Push an envelope to every live connection
    pub fn push_event(&self, event: &str, data: Value) {
        let _ = self.state.push.send(json!({"event": event, "data": data}));
    }
}

async fn gateway_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<GatewayState>>,
) -> impl IntoResponse {
    let msgpack = params.get("format").map(String::as_str) == Some("msgpack");
    ws.on_upgrade(move |socket| drive_session(socket, state, msgpack))
}

async fn drive_session(socket: WebSocket, state: Arc<GatewayState>, msgpack: bool) {
    state.connections.fetch_add(1, Ordering::SeqCst);
    let mut kill = state.kill.subscribe();
    let mut push = state.push.subscribe();
    let (mut sender, mut receiver) = socket.split();

    // The server speaks first
    if sender.send(encode(msgpack, &json!({"event": "hello"}))).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            _ = kill.recv() => return,
            pushed = push.recv() => {
                let Ok(envelope) = pushed else { return };
                if sender.send(encode(msgpack, &envelope)).await.is_err() {
                    return;
                }
            }
            frame = receiver.next() => {
                let Some(Ok(message)) = frame else { return };
                let Some(decoded) = decode(msgpack, &message) else { continue };
                match decoded.get("op").and_then(Value::as_str) {
                    Some("identify") => {
                        state.identifies.lock().push(decoded);
                        let ready = state.ready.lock().clone();
                        let envelope = json!({"event": "ready", "data": ready});
                        if sender.send(encode(msgpack, &envelope)).await.is_err() {
                            return;
                        }
                    }
                    Some("ping") => {
                        state.pings.fetch_add(1, Ordering::SeqCst);
                        if state.answer_pings.load(Ordering::SeqCst) {
                            let envelope = json!({"event": "pong"});
                            if sender.send(encode(msgpack, &envelope)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Some("update_presence") => {
                        state.presence_updates.lock().push(decoded);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn encode(msgpack: bool, value: &Value) -> Message {
    if msgpack {
        // to_vec_named keeps map keys as strings
        Message::Binary(rmp_serde::to_vec_named(value).unwrap())
    } else {
        Message::Text(value.to_string())
    }
}

fn decode(msgpack: bool, message: &Message) -> Option<Value> {
    match message {
        Message::Text(text) if !msgpack => serde_json::from_str(text).ok(),
        Message::Binary(bytes) if msgpack => rmp_serde::from_slice(bytes).ok(),
        _ => None,
    }
}

/// Client configuration pointed at a mock gateway, with heartbeats fast
/// enough for tests
pub fn test_config(gateway_url: &str, msgpack: bool) -> ClientConfig {
    let mut config = ClientConfig::default().with_token("test.token");
    config.harmony_url = gateway_url.to_string();
    config.api_url = "http://127.0.0.1:1".to_string();
    config.prefer_msgpack = msgpack;
    config.heartbeat_interval_secs = 0.1;
    config.heartbeat_timeout_secs = 2.0;
    config
}

/// Poll a condition until it holds or two seconds pass
pub async fn eventually(what: &str, condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {what}");
}

/// A mock REST API covering the endpoints the tests exercise
pub struct MockApi {
    pub url: String,
    state: Arc<ApiState>,
    _handle: JoinHandle<()>,
}

struct ApiState {
    /// Token minted by login/registration, expected on authed requests
    token: String,
    /// Authorization header values seen on authed endpoints
    auth_headers: Mutex<Vec<Option<String>>>,
}

impl MockApi {
    pub async fn start(token: &str) -> Result<Self> {
        init_tracing();
        let state = Arc::new(ApiState {
            token: token.to_string(),
            auth_headers: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/login", axum::routing::post(api_login))
            .route("/users", axum::routing::post(api_create_user))
            .route("/users/me", axum::routing::get(api_fetch_self))
            .route("/users/:id", axum::routing::get(api_fetch_user))
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            url: format!("http://{addr}"),
            state,
            _handle: handle,
        })
    }

    /// Authorization header values seen so far on authed endpoints
    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.state.auth_headers.lock().clone()
    }
}

async fn api_login(
    State(state): State<Arc<ApiState>>,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    if body["password"] == "hunter2" {
        (
            axum::http::StatusCode::OK,
            axum::Json(json!({"user_id": "501", "token": state.token})),
        )
    } else {
        (
            axum::http::StatusCode::UNAUTHORIZED,
            axum::Json(json!({"message": "invalid credentials"})),
        )
    }
}

async fn api_create_user(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    axum::Json(json!({"id": "502", "token": state.token}))
}

async fn api_fetch_self(
    State(state): State<Arc<ApiState>>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let auth = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    state.auth_headers.lock().push(auth.clone());

    if auth.as_deref() == Some(state.token.as_str()) {
        (
            axum::http::StatusCode::OK,
            axum::Json(json!({
                "id": "501",
                "username": "jay",
                "discriminator": 1,
                "flags": 0,
                "email": "jay@example.com"
            })),
        )
    } else {
        (
            axum::http::StatusCode::UNAUTHORIZED,
            axum::Json(json!({"message": "invalid token"})),
        )
    }
}

async fn api_fetch_user(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> impl IntoResponse {
    if id == "404" {
        (
            axum::http::StatusCode::NOT_FOUND,
            axum::Json(json!({"message": "user not found"})),
        )
    } else {
        (
            axum::http::StatusCode::OK,
            axum::Json(json!({
                "id": id,
                "username": "someone",
                "discriminator": 2,
                "flags": 0
            })),
        )
    }
}
