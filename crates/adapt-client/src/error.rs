use thiserror::Error;

/// Errors surfaced by the client facade.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Gateway(#[from] adapt_gateway::GatewayError),

    #[error(transparent)]
    Http(#[from] adapt_http::HttpError),

    #[error(transparent)]
    Config(#[from] adapt_common::ConfigError),

    /// `start` was called while a previous `start` is still driving the
    /// connection.
    #[error("client already started")]
    AlreadyStarted,

    /// An operation that needs a live gateway session ran before `start`.
    #[error("gateway is not connected")]
    NotConnected,
}
