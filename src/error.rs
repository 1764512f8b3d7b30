//! Error types for the prediction client

use crate::constants::GENERIC_FAILURE_MESSAGE;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server responded with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Message supplied by the server in an `error` or `detail` field
    #[error("{0}")]
    Server(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl ClientError {
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Text shown to the user in the alert dialog.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Server(msg) => msg.clone(),
            Self::InvalidCredentials => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}
