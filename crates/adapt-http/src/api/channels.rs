use adapt_core::wire::{RawDmChannel, RawGuildChannel};
use adapt_core::{ChannelType, Snowflake};

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::requests::{CreateDmPayload, CreateGroupDmPayload, CreateGuildChannelPayload};

impl HttpClient {
    pub async fn fetch_guild_channels(
        &self,
        guild_id: Snowflake,
    ) -> Result<Vec<RawGuildChannel>, HttpError> {
        self.get(&format!("/guilds/{guild_id}/channels")).await
    }

    pub async fn fetch_channel(&self, id: Snowflake) -> Result<RawGuildChannel, HttpError> {
        self.get(&format!("/channels/{id}")).await
    }

    pub async fn create_guild_channel(
        &self,
        guild_id: Snowflake,
        payload: &CreateGuildChannelPayload,
    ) -> Result<RawGuildChannel, HttpError> {
        self.post(&format!("/guilds/{guild_id}/channels"), payload)
            .await
    }

    pub async fn delete_channel(&self, id: Snowflake) -> Result<(), HttpError> {
        self.delete_empty(&format!("/channels/{id}")).await
    }

    /// DM channels visible to the authenticated user.
    pub async fn fetch_dm_channels(&self) -> Result<Vec<RawDmChannel>, HttpError> {
        self.get("/users/me/channels").await
    }

    /// Opens (or returns the existing) 1:1 DM with the given user.
    pub async fn create_dm_channel(
        &self,
        recipient_id: Snowflake,
    ) -> Result<RawDmChannel, HttpError> {
        self.post(
            "/users/me/channels",
            &CreateDmPayload {
                kind: ChannelType::Dm,
                recipient_id,
            },
        )
        .await
    }

    /// Opens a named group DM with the given recipients.
    pub async fn create_group_dm_channel(
        &self,
        name: impl Into<String>,
        recipient_ids: Vec<Snowflake>,
    ) -> Result<RawDmChannel, HttpError> {
        self.post(
            "/users/me/channels",
            &CreateGroupDmPayload {
                kind: ChannelType::Group,
                name: name.into(),
                recipient_ids,
            },
        )
        .await
    }
}
