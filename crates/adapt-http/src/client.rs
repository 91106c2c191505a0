use parking_lot::RwLock;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiErrorBody, HttpError};

/// HTTP client for the Adapt REST API.
///
/// Holds the base URL and the authentication token. The token is sent raw in
/// the `Authorization` header, no scheme prefix. Cheap to share behind an
/// `Arc`; all methods take `&self`.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    /// Unauthenticated client, for login/registration calls.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_base(base_url.into()),
            token: RwLock::new(None),
        }
    }

    /// Client pre-loaded with a token.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Self::new(base_url);
        client.set_token(token);
        client
    }

    /// Installs or replaces the token used for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, HttpError> {
        let response = self
            .builder(Method::GET, path)
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn put_empty(&self, path: &str) -> Result<(), HttpError> {
        let response = self.builder(Method::PUT, path).send().await?;
        Self::check(response).await
    }

    pub(crate) async fn delete_empty(&self, path: &str) -> Result<(), HttpError> {
        let response = self.builder(Method::DELETE, path).send().await?;
        Self::check(response).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut builder = self.builder(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        Self::decode(response).await
    }

    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "REST request");
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token.read().as_deref() {
            builder = builder.header(AUTHORIZATION, token);
        }
        builder
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, HttpError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(response.json().await?)
    }

    async fn check(response: reqwest::Response) -> Result<(), HttpError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(())
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> HttpError {
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        HttpError::Api { status, message }
    }
}

fn normalize_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
