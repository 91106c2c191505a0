use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the REST client.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request never produced an HTTP response (DNS, TLS, connect,
    /// body decode on a success response).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("API error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
    },
}

impl HttpError {
    /// Status code of an API-level error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Error body shape the server sends alongside non-success statuses.
/// Both fields are optional so a bare status still decodes.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
