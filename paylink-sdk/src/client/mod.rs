//! HTTP client for the PayGlobal merchant API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod gateway;

pub use gateway::GatewayClient;

use reqwest::StatusCode;

/// Errors produced by the SDK HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}")]
    Api {
        status: StatusCode,
        /// Explanation taken from the JSON error body, when there was one.
        message: Option<String>,
    },

    /// The server answered 2xx but did not report success.
    #[error("request rejected by gateway")]
    Rejected { message: Option<String> },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Text the gateway itself supplied for this failure, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } | ClientError::Rejected { message } => {
                message.as_deref().filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}
