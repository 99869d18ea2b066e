use std::time::Duration;

use reqwest::Client;

use crate::error::ClientError;
use crate::models::{ErrorBody, FeedPage};

/// How the presenter obtains a [`FeedPage`].
pub trait FeedClient {
    fn fetch_feed(&self) -> impl std::future::Future<Output = Result<FeedPage, ClientError>> + Send;
}

/// Calls the feed proxy over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http: Client,
    endpoint: String,
}

impl HttpFeedClient {
    /// `base_url` is the site origin, e.g. `http://0.0.0.0:3030`.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(HttpFeedClient {
            http: Client::builder().timeout(timeout).build()?,
            endpoint: format!("{}/api/instagram", base_url.as_ref().trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl FeedClient for HttpFeedClient {
    async fn fetch_feed(&self) -> Result<FeedPage, ClientError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    format!(
                        "Error {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("")
                    )
                });
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
