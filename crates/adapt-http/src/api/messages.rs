use adapt_core::wire::RawMessage;
use adapt_core::Snowflake;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::requests::{CreateMessagePayload, EditMessagePayload, MessageHistoryQuery};

impl HttpClient {
    /// A page of message history for a channel, newest first unless the
    /// query says otherwise.
    pub async fn fetch_messages(
        &self,
        channel_id: Snowflake,
        query: MessageHistoryQuery,
    ) -> Result<Vec<RawMessage>, HttpError> {
        self.get_query(&format!("/channels/{channel_id}/messages"), &query)
            .await
    }

    pub async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<RawMessage, HttpError> {
        self.get(&format!("/channels/{channel_id}/messages/{message_id}"))
            .await
    }

    pub async fn create_message(
        &self,
        channel_id: Snowflake,
        payload: &CreateMessagePayload,
    ) -> Result<RawMessage, HttpError> {
        self.post(&format!("/channels/{channel_id}/messages"), payload)
            .await
    }

    pub async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        payload: &EditMessagePayload,
    ) -> Result<RawMessage, HttpError> {
        self.patch(
            &format!("/channels/{channel_id}/messages/{message_id}"),
            payload,
        )
        .await
    }

    pub async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<(), HttpError> {
        self.delete_empty(&format!("/channels/{channel_id}/messages/{message_id}"))
            .await
    }
}
