//! Error types for the feed proxy and the presenter's fetch boundary.
//!
//! Proxy errors render as `{ "error": ... }` JSON. Internal detail goes to the
//! log only; the response body carries a short, fixed message.

use warp::http::StatusCode;
use warp::reply::Response;

use crate::models::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// A required credential is missing. Holds the variable name.
    #[error("missing configuration: {0}")]
    Configuration(&'static str),

    /// The Graph API answered with a non-success status.
    #[error("Instagram API returned status {0}")]
    Upstream(u16),

    /// The Graph API answered 2xx with a body of the wrong shape.
    #[error("invalid upstream response: {0}")]
    Contract(String),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("internal error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(code) => StatusCode::from_u16(*code)
                .ok()
                .filter(|status| status.is_client_error() || status.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed to callers.
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::Configuration(_) => "Instagram credentials are not configured".to_string(),
            ProxyError::Upstream(code) => format!("Instagram API error: {code}"),
            ProxyError::Contract(_) => "Invalid response format from Instagram".to_string(),
            ProxyError::Transport(_) | ProxyError::Unexpected(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl warp::Reply for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Feed proxy error ({}): {}", status.as_u16(), self);
        } else {
            log::warn!("Feed proxy error ({}): {}", status.as_u16(), self);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        warp::reply::with_status(warp::reply::json(&body), status).into_response()
    }
}

/// Failures seen by the presenter when calling the proxy.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx from the proxy, with the proxy's `error` message when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("could not reach the feed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unreadable feed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("the feed took too long to respond")]
    Timeout,
}
