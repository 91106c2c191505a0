//! End-to-end tests for the REST client against the mock API

use anyhow::Result;
use reqwest::StatusCode;

use adapt_core::Snowflake;
use adapt_http::{HttpClient, HttpError};
use integration_tests::helpers::MockApi;

#[tokio::test]
async fn test_login_installs_token() -> Result<()> {
    let api = MockApi::start("tok-login").await?;
    let client = HttpClient::new(&api.url);

    let response = client.login("jay@example.com", "hunter2").await?;
    assert_eq!(response.user_id, Snowflake::new(501));
    assert_eq!(response.token, "tok-login");
    assert_eq!(client.token().as_deref(), Some("tok-login"));

    // The installed token rides the Authorization header, unprefixed
    let me = client.fetch_self().await?;
    assert_eq!(me.user.username, "jay");
    assert_eq!(api.auth_headers(), vec![Some("tok-login".to_string())]);
    Ok(())
}

#[tokio::test]
async fn test_login_rejection_surfaces_api_error() -> Result<()> {
    let api = MockApi::start("tok-unused").await?;
    let client = HttpClient::new(&api.url);

    let err = client.login("jay@example.com", "wrong").await.unwrap_err();
    match err {
        HttpError::Api { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "invalid credentials");
        }
        HttpError::Transport(other) => panic!("unexpected transport error: {other}"),
    }
    // A failed login leaves no token behind
    assert!(client.token().is_none());
    Ok(())
}

#[tokio::test]
async fn test_registration_installs_token() -> Result<()> {
    let api = MockApi::start("tok-reg").await?;
    let client = HttpClient::new(&api.url);

    let response = client.create_user("newbie", "n@example.com", "hunter2").await?;
    assert_eq!(response.id, Snowflake::new(502));
    assert_eq!(client.token().as_deref(), Some("tok-reg"));
    Ok(())
}

#[tokio::test]
async fn test_not_found_decodes_error_body() -> Result<()> {
    let api = MockApi::start("tok").await?;
    let client = HttpClient::with_token(&api.url, "tok");

    let user = client.fetch_user(Snowflake::new(77)).await?;
    assert_eq!(user.username, "someone");

    let err = client.fetch_user(Snowflake::new(404)).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("user not found"));
    Ok(())
}

#[tokio::test]
async fn test_bad_token_rejected() -> Result<()> {
    let api = MockApi::start("tok-good").await?;
    let client = HttpClient::with_token(&api.url, "tok-bad");

    let err = client.fetch_self().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    Ok(())
}
