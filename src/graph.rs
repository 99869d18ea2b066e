use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::{Config, Credentials};
use crate::error::ProxyError;

/// Fields requested from the Graph API `/media` edge.
pub const MEDIA_FIELDS: &str = "id,media_url,media_product_type,caption,alt_text,like_count,comments_count,thumbnail_url,permalink,legacy_instagram_media_id,shortcode";

/// Where the proxy gets the raw media listing from.
///
/// Implementations return the upstream body untouched; shape checks happen in
/// [`crate::proxy::normalize`].
pub trait MediaSource {
    fn fetch_media(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<String, ProxyError>> + Send;
}

struct CachedBody {
    fetched_at: Instant,
    body: String,
}

/// Graph API client with a per-account revalidating cache.
pub struct GraphClient {
    http: Client,
    base_url: String,
    api_version: String,
    revalidate: Duration,
    cache: Mutex<HashMap<String, CachedBody>>,
}

impl GraphClient {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(GraphClient {
            http,
            base_url: config.graph_api_url.clone(),
            api_version: config.graph_api_version.clone(),
            revalidate: config.revalidate,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn media_url(&self, account_id: &str) -> String {
        format!("{}/{}/{}/media", self.base_url, self.api_version, account_id)
    }

    async fn cached(&self, account_id: &str) -> Option<String> {
        let cache = self.cache.lock().await;
        cache
            .get(account_id)
            .filter(|cached| cached.fetched_at.elapsed() < self.revalidate)
            .map(|cached| cached.body.clone())
    }
}

impl MediaSource for GraphClient {
    async fn fetch_media(&self, credentials: &Credentials) -> Result<String, ProxyError> {
        if let Some(body) = self.cached(&credentials.account_id).await {
            debug!("Serving cached media listing for {}", credentials.account_id);
            return Ok(body);
        }

        info!("Fetching media listing for {}", credentials.account_id);
        let response = self
            .http
            .get(self.media_url(&credentials.account_id))
            .query(&[
                ("fields", MEDIA_FIELDS),
                ("access_token", credentials.access_token()),
            ])
            .send()
            .await
            .map_err(|err| ProxyError::Transport(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Instagram API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            return Err(ProxyError::Upstream(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| ProxyError::Transport(err.without_url()))?;

        self.cache.lock().await.insert(
            credentials.account_id.clone(),
            CachedBody {
                fetched_at: Instant::now(),
                body: body.clone(),
            },
        );
        Ok(body)
    }
}
