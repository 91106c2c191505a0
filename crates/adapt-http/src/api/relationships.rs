use adapt_core::wire::RawRelationship;
use adapt_core::Snowflake;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::requests::FriendRequestPayload;

impl HttpClient {
    pub async fn fetch_relationships(&self) -> Result<Vec<RawRelationship>, HttpError> {
        self.get("/relationships").await
    }

    /// Sends a friend request by username and discriminator.
    pub async fn send_friend_request(
        &self,
        username: &str,
        discriminator: u16,
    ) -> Result<RawRelationship, HttpError> {
        self.post(
            "/relationships/friends",
            &FriendRequestPayload {
                username: username.to_string(),
                discriminator,
            },
        )
        .await
    }

    /// Accepts an incoming friend request from the given user.
    pub async fn accept_friend_request(&self, user_id: Snowflake) -> Result<(), HttpError> {
        self.put_empty(&format!("/relationships/friends/{user_id}"))
            .await
    }

    pub async fn block_user(&self, user_id: Snowflake) -> Result<(), HttpError> {
        self.put_empty(&format!("/relationships/blocks/{user_id}"))
            .await
    }

    /// Removes whatever relationship exists with the user: unfriends,
    /// unblocks, or withdraws a pending request.
    pub async fn delete_relationship(&self, user_id: Snowflake) -> Result<(), HttpError> {
        self.delete_empty(&format!("/relationships/{user_id}")).await
    }
}
