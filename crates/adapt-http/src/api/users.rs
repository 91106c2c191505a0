use adapt_core::wire::{RawClientUser, RawUser};
use adapt_core::Snowflake;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::requests::EditUserPayload;

impl HttpClient {
    /// Fetches the authenticated user, private fields included.
    pub async fn fetch_self(&self) -> Result<RawClientUser, HttpError> {
        self.get("/users/me").await
    }

    pub async fn fetch_user(&self, id: Snowflake) -> Result<RawUser, HttpError> {
        self.get(&format!("/users/{id}")).await
    }

    pub async fn edit_self(&self, payload: &EditUserPayload) -> Result<RawClientUser, HttpError> {
        self.patch("/users/me", payload).await
    }

    /// Deletes the authenticated account. The token stops working afterwards.
    pub async fn delete_self(&self) -> Result<(), HttpError> {
        self.delete_empty("/users/me").await
    }
}
