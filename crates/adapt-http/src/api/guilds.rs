use adapt_core::wire::RawGuild;
use adapt_core::Snowflake;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::requests::{CreateGuildPayload, GuildQuery};

impl HttpClient {
    /// Guilds the authenticated user is a member of.
    pub async fn fetch_guilds(&self, query: GuildQuery) -> Result<Vec<RawGuild>, HttpError> {
        self.get_query("/guilds", &query).await
    }

    pub async fn fetch_guild(
        &self,
        id: Snowflake,
        query: GuildQuery,
    ) -> Result<RawGuild, HttpError> {
        self.get_query(&format!("/guilds/{id}"), &query).await
    }

    pub async fn create_guild(&self, payload: &CreateGuildPayload) -> Result<RawGuild, HttpError> {
        self.post("/guilds", payload).await
    }

    /// Deletes a guild. Owner only.
    pub async fn delete_guild(&self, id: Snowflake) -> Result<(), HttpError> {
        self.delete_empty(&format!("/guilds/{id}")).await
    }
}
