//! End-to-end tests: a real client against the mock harmony gateway
//!
//! Each test stands up its own mock on an ephemeral port, points a client
//! at it, and drives the full connect/identify/ready handshake over a real
//! websocket.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;
use tokio::time::timeout;

use adapt_client::Client;
use adapt_core::entities::Status;
use adapt_core::{Event, Snowflake};
use integration_tests::fixtures;
use integration_tests::helpers::{eventually, test_config, MockGateway};

const READY_WAIT: Duration = Duration::from_secs(5);

/// Spawn `start` on a shared client and hand back the join handle
fn spawn_start(client: &Arc<Client>) -> tokio::task::JoinHandle<Result<(), adapt_client::ClientError>> {
    let client = client.clone();
    tokio::spawn(async move { client.start().await })
}

#[tokio::test]
async fn test_identify_handshake_reaches_ready() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-1", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    let me = client.user().unwrap();
    assert_eq!(me.user.id, Snowflake::new(user_id));
    assert_eq!(me.user.username, "jay");
    assert_eq!(me.email.as_deref(), Some("jay@example.com"));

    // Exactly one identify, carrying the token and the default presence
    let identifies = gateway.identifies();
    assert_eq!(identifies.len(), 1);
    assert_eq!(identifies[0]["op"], "identify");
    assert_eq!(identifies[0]["token"], "test.token");
    assert_eq!(identifies[0]["status"], "online");

    // A client-initiated close is a clean exit
    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_msgpack_framing_end_to_end() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-mp", user_id, "bin")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, true))?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    // The mock only decodes binary frames on a msgpack connection, so a
    // captured identify proves the client sent MessagePack
    let identifies = gateway.identifies();
    assert_eq!(identifies.len(), 1);
    assert_eq!(identifies[0]["device"], "desktop");
    assert_eq!(client.user().unwrap().user.username, "bin");

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_raw_event_dispatched_before_semantic() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-raw", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let order: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = order.clone();
    client
        .listen(&["raw_message_create", "message"])
        .register(move |event| {
            let seen = seen.clone();
            async move {
                seen.lock().push(event.name().into_owned());
            }
        })
        .unwrap();

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    let channel_id = fixtures::unique_id();
    gateway.push_event(
        "message_create",
        fixtures::message_create(fixtures::unique_id(), channel_id, user_id, "hi"),
    );

    eventually("both dispatches", || order.lock().len() == 2).await;
    assert_eq!(*order.lock(), vec!["raw_message_create", "message"]);

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_dropped_connection_reconnects_and_reidentifies() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-rc", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let reconnects = Arc::new(AtomicUsize::new(0));
    let seen = reconnects.clone();
    client
        .listen(&["reconnect"])
        .register(move |_| {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        })
        .unwrap();

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;
    assert_eq!(gateway.connection_count(), 1);

    gateway.drop_connections();

    eventually("second identify", || gateway.identifies().len() >= 2).await;
    eventually("reconnect event", || {
        reconnects.load(Ordering::SeqCst) >= 1
    })
    .await;
    assert!(gateway.connection_count() >= 2);

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_heartbeat_runs_and_measures_latency() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-hb", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    eventually("an acknowledged ping", || {
        gateway.ping_count() >= 1 && client.latency().is_some()
    })
    .await;

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_unanswered_heartbeat_forces_reconnect() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-dead", user_id, "jay")).await?;
    let mut config = test_config(&gateway.url, false);
    config.heartbeat_timeout_secs = 0.1;
    let client = Arc::new(Client::from_config(config)?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    gateway.stop_answering_pings();

    eventually("a reconnect after heartbeat timeout", || {
        gateway.connection_count() >= 2
    })
    .await;

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_update_presence_reaches_server() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-pr", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    client.update_presence(Some(Status::Idle))?;

    eventually("the presence frame", || !gateway.presence_updates().is_empty()).await;
    let updates = gateway.presence_updates();
    assert_eq!(updates[0]["op"], "update_presence");
    assert_eq!(updates[0]["status"], "idle");

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_pushed_guild_create_populates_cache() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-g", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    let guild_id = fixtures::unique_id();
    gateway.push_event(
        "guild_create",
        fixtures::guild_create(fixtures::guild(guild_id, "Rust Hideout", user_id), Some("n-1")),
    );

    eventually("the guild in the cache", || {
        client.get_guild(Snowflake::new(guild_id)).is_some()
    })
    .await;

    let guild = client.get_guild(Snowflake::new(guild_id)).unwrap();
    {
        let guild = guild.read();
        assert_eq!(guild.name, "Rust Hideout");
        assert_eq!(guild.owner_id, Snowflake::new(user_id));
        assert!(guild.channel(Snowflake::new(guild_id + 1)).is_some());
        assert!(guild.member(Snowflake::new(user_id)).is_some());
    }
    // The member's user handle is the cached user handle
    let cached_user = client.get_user(Snowflake::new(user_id)).unwrap();
    let member_user = guild
        .read()
        .member(Snowflake::new(user_id))
        .unwrap()
        .read()
        .user()
        .clone();
    assert!(Arc::ptr_eq(&cached_user, &member_user));

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_user_update_delivers_before_and_after() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-u", user_id, "oldname")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let captured: Arc<Mutex<Option<Event>>> = Arc::new(Mutex::new(None));
    let slot = captured.clone();
    client
        .listen(&["user_update"])
        .once()
        .register(move |event| {
            let slot = slot.clone();
            async move {
                *slot.lock() = Some(event);
            }
        })
        .unwrap();

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    gateway.push_event(
        "user_update",
        fixtures::user_update(
            fixtures::user(user_id, "oldname"),
            fixtures::user(user_id, "newname"),
        ),
    );

    eventually("the user_update event", || captured.lock().is_some()).await;
    let event = captured.lock().take().unwrap();
    match event {
        Event::UserUpdate { before, after } => {
            assert_eq!(before.username, "oldname");
            assert_eq!(after.read().username, "newname");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    // The live cache handle reflects the update
    let cached = client.get_user(Snowflake::new(user_id)).unwrap();
    assert_eq!(cached.read().username, "newname");

    client.close();
    runner.await??;
    Ok(())
}

#[tokio::test]
async fn test_wait_for_matches_pushed_event() -> Result<()> {
    let user_id = fixtures::unique_id();
    let gateway = MockGateway::start(fixtures::ready("sess-w", user_id, "jay")).await?;
    let client = Arc::new(Client::from_config(test_config(&gateway.url, false))?);

    let runner = spawn_start(&client);
    timeout(READY_WAIT, client.wait_until_ready()).await?;

    let waiter = {
        let client = client.clone();
        tokio::spawn(async move { client.wait_for(&["message"], Duration::from_secs(5)).await })
    };
    // wait_for registers its listener on first poll
    eventually("the waiter to register", || {
        client.dispatcher().listener_count() > 0
    })
    .await;

    let channel_id = fixtures::unique_id();
    gateway.push_event(
        "message_create",
        fixtures::message_create(fixtures::unique_id(), channel_id, user_id, "ping me"),
    );

    let event = waiter.await??;
    match event {
        Event::Message(message) => {
            assert_eq!(message.content.as_deref(), Some("ping me"));
            assert_eq!(message.channel_id, Snowflake::new(channel_id));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    client.close();
    runner.await??;
    Ok(())
}
