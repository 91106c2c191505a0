use std::sync::Arc;
use std::time::Duration;

use adapt_cache::{ConnectionState, EventStream};
use adapt_common::ClientConfig;
use adapt_core::entities::{
    ClientUser, DMChannel, Guild, Relationship, Shared, Status, User,
};
use adapt_core::{Event, Snowflake};
use adapt_gateway::{Gateway, GatewayError, GatewayHandle, GatewayOptions};
use adapt_http::HttpClient;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::dispatch::{Dispatcher, EventHandler, ListenerBuilder, WaitError};
use crate::error::ClientError;

type HandleSlot = Arc<Mutex<Option<GatewayHandle>>>;

/// The top-level entry point: owns the REST client, the connection state,
/// and the dispatcher, and drives the gateway.
///
/// All methods take `&self`; wrap the client in an `Arc` to share it with
/// handler code.
pub struct Client {
    config: ClientConfig,
    http: Arc<HttpClient>,
    state: Arc<ConnectionState>,
    dispatcher: Arc<Dispatcher>,
    /// Consumed by the first `start`
    events: Mutex<Option<EventStream>>,
    gateway: HandleSlot,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl Client {
    /// Client from an existing token, defaulting to production with an
    /// online presence.
    pub fn new(token: impl Into<String>) -> Self {
        Self::assemble(ClientConfig::default().with_token(token), Status::Online)
    }

    /// Like [`new`](Self::new), with the presence announced at identify.
    pub fn new_with_status(token: impl Into<String>, status: Status) -> Self {
        Self::assemble(ClientConfig::default().with_token(token), status)
    }

    /// Client from a full configuration. The configuration must already
    /// carry a token; use [`login`](Self::login) to obtain one from
    /// credentials.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        config.require_token()?;
        Ok(Self::assemble(config, Status::Online))
    }

    /// Log in with credentials against production.
    pub async fn login(email: &str, password: &str) -> Result<Self, ClientError> {
        Self::login_with(ClientConfig::default(), email, password).await
    }

    /// Log in with credentials against the deployment the configuration
    /// points at.
    pub async fn login_with(
        config: ClientConfig,
        email: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let http = HttpClient::new(&config.api_url);
        let response = http.login(email, password).await?;
        Ok(Self::assemble(config.with_token(response.token), Status::Online))
    }

    /// Register a new account against production and return a client for
    /// it.
    pub async fn register(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        Self::register_with(ClientConfig::default(), username, email, password).await
    }

    /// Register a new account against the deployment the configuration
    /// points at.
    pub async fn register_with(
        config: ClientConfig,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let http = HttpClient::new(&config.api_url);
        let response = http.create_user(username, email, password).await?;
        Ok(Self::assemble(config.with_token(response.token), Status::Online))
    }

    fn assemble(config: ClientConfig, status: Status) -> Self {
        let (state, events) = ConnectionState::new(status);
        // require_token is checked by callers; an absent token here fails
        // at connect time instead
        let token = config.token.clone().unwrap_or_default();
        let http = HttpClient::with_token(&config.api_url, token);
        Self {
            config,
            http: Arc::new(http),
            state: Arc::new(state),
            dispatcher: Arc::new(Dispatcher::new()),
            events: Mutex::new(Some(events)),
            gateway: Arc::new(Mutex::new(None)),
            pump: Mutex::new(None),
        }
    }

    /// Connect and drive the gateway until a fatal error or an explicit
    /// [`close`](Self::close).
    ///
    /// Dropped connections reconnect internally; a client-initiated close
    /// returns `Ok`. Events flow to the dispatcher from the moment this is
    /// called, starting with `start` itself.
    pub async fn start(&self) -> Result<(), ClientError> {
        let token = self.config.require_token()?.to_string();
        let mut events = self
            .events
            .lock()
            .take()
            .ok_or(ClientError::AlreadyStarted)?;

        let dispatcher = self.dispatcher.clone();
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let report = dispatcher.dispatch(event).await;
                for failure in &report.failures {
                    tracing::error!(%failure, "event handler failed");
                }
            }
        });
        *self.pump.lock() = Some(pump);

        self.state.emit(Event::Start);

        let options = GatewayOptions {
            prefer_msgpack: self.config.prefer_msgpack,
            heartbeat_interval: Duration::from_secs_f64(self.config.heartbeat_interval_secs),
            heartbeat_timeout: Duration::from_secs_f64(self.config.heartbeat_timeout_secs),
        };
        let mut gateway = Gateway::new(
            &self.config.harmony_url,
            token,
            self.state.clone(),
            &options,
        );
        *self.gateway.lock() = Some(gateway.handle());

        let result = gateway.start().await;
        *self.gateway.lock() = None;
        match result {
            // A close requested through this client is a clean exit
            Err(GatewayError::Closed) | Ok(()) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// [`start`](Self::start), plus shutdown on ctrl-c.
    pub async fn run(&self) -> Result<(), ClientError> {
        let gateway = self.gateway.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, shutting down");
                if let Some(handle) = gateway.lock().clone() {
                    handle.close();
                }
            }
        });

        let result = self.start().await;
        watcher.abort();
        self.stop_pump();
        result
    }

    /// Close the gateway session and stop the event pump. Safe to call
    /// when not connected.
    pub fn close(&self) {
        if let Some(handle) = self.gateway.lock().clone() {
            handle.close();
        }
        self.stop_pump();
    }

    fn stop_pump(&self) {
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
    }

    /// Resolves once the session snapshot has populated the cache.
    /// Resolves immediately when already ready.
    pub async fn wait_until_ready(&self) {
        self.state.ready().wait().await;
    }

    /// Install or replace the primary event handler.
    pub fn set_event_handler(&self, handler: impl EventHandler + 'static) {
        self.dispatcher.set_handler(Arc::new(handler));
    }

    /// Start building an ad-hoc listener for the named events.
    pub fn listen(&self, events: &[&str]) -> ListenerBuilder<'_> {
        self.dispatcher.listen(events)
    }

    /// Block until an event with one of the given names arrives, or the
    /// timeout elapses.
    pub async fn wait_for(
        &self,
        events: &[&str],
        timeout: Duration,
    ) -> Result<Event, WaitError> {
        self.dispatcher.wait_for(events, timeout).await
    }

    /// Announce a presence change; an absent status leaves it unchanged.
    pub fn update_presence(&self, status: Option<Status>) -> Result<(), ClientError> {
        let handle = self.gateway.lock().clone().ok_or(ClientError::NotConnected)?;
        handle.update_presence(status)?;
        Ok(())
    }

    /// Round-trip time of the last acknowledged heartbeat. `None` before
    /// the first acknowledgement.
    pub fn latency(&self) -> Option<Duration> {
        self.gateway.lock().as_ref().and_then(GatewayHandle::latency)
    }

    /// The authenticated user, once ready.
    pub fn user(&self) -> Option<ClientUser> {
        self.state.current_user()
    }

    /// The authenticated user's id, decoded out of the token. Unlike
    /// [`user`](Self::user) this works before the session is ready.
    pub fn user_id(&self) -> Option<Snowflake> {
        let token = self.config.token.as_deref()?;
        adapt_common::user_id_from_token(token).ok()
    }

    pub fn get_user(&self, id: Snowflake) -> Option<Shared<User>> {
        self.state.get_user(id)
    }

    pub fn get_guild(&self, id: Snowflake) -> Option<Shared<Guild>> {
        self.state.get_guild(id)
    }

    pub fn get_dm_channel(&self, id: Snowflake) -> Option<Shared<DMChannel>> {
        self.state.get_dm_channel(id)
    }

    pub fn get_relationship(&self, user_id: Snowflake) -> Option<Shared<Relationship>> {
        self.state.get_relationship(user_id)
    }

    /// The REST client, for calls the facade has no shorthand for.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The connection-state cache.
    pub fn state(&self) -> &Arc<ConnectionState> {
        &self.state
    }

    /// The dispatcher, for registering listeners from handler code.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.stop_pump();
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.config.api_url)
            .field("harmony_url", &self.config.harmony_url)
            .field("started", &self.events.lock().is_none())
            .finish()
    }
}
