//! Cache error taxonomy

/// Errors raised while applying gateway events to the cache
///
/// All of these indicate a schema mismatch between this client and the
/// server; none are retriable. Decoding happens before any mutation, so a
/// failed event leaves the cache untouched.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The event's payload did not match the expected shape
    #[error("malformed `{event}` payload: {source}")]
    Decode {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The event requires a payload but none was attached
    #[error("`{event}` event arrived without a payload")]
    MissingData { event: &'static str },
}

impl CacheError {
    pub(crate) fn decode(event: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { event, source }
    }
}
