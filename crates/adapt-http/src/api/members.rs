use adapt_core::wire::RawMember;
use adapt_core::Snowflake;

use crate::client::HttpClient;
use crate::error::HttpError;

impl HttpClient {
    pub async fn fetch_members(&self, guild_id: Snowflake) -> Result<Vec<RawMember>, HttpError> {
        self.get(&format!("/guilds/{guild_id}/members")).await
    }

    pub async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<RawMember, HttpError> {
        self.get(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
    }

    /// The authenticated user's own member entry in the guild.
    pub async fn fetch_own_member(&self, guild_id: Snowflake) -> Result<RawMember, HttpError> {
        self.get(&format!("/guilds/{guild_id}/members/me")).await
    }

    /// Leaves the guild as the authenticated user.
    pub async fn leave_guild(&self, guild_id: Snowflake) -> Result<(), HttpError> {
        self.delete_empty(&format!("/guilds/{guild_id}/members/me"))
            .await
    }

    pub async fn kick_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<(), HttpError> {
        self.delete_empty(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
    }
}
