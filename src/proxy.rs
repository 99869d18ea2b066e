use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;

use env_logger::Env;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::config::Config;
use crate::error::ProxyError;
use crate::graph::MediaSource;
use crate::models::{FeedPage, MediaItem, Paging, RawMediaItem};

pub const FEED_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// Server-side half of the Instagram section: holds the credentials, calls a
/// [`MediaSource`] and serves the normalized feed at `GET /api/instagram`.
pub struct FeedProxy<Source: MediaSource> {
    config: Config,
    source: Source,
}

impl<Source: MediaSource + Send + Sync + 'static> FeedProxy<Source> {
    pub fn new(config: Config, source: Source) -> Self {
        FeedProxy { config, source }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Credentials are checked before the source is touched.
    pub async fn fetch_feed(&self) -> Result<FeedPage, ProxyError> {
        let credentials = self.config.credentials()?;
        let body = self.source.fetch_media(&credentials).await?;
        normalize(&body)
    }

    /// Starts the proxy server on the configured bind address.
    ///
    /// # Panics
    ///
    /// Panics if unable to bind to the configured address.
    pub async fn start(self) {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();

        let address = self.config.bind_addr;
        let api = routes(Arc::new(self));

        info!("Serving Instagram feed on {}", address);

        let routes = api.with(warp::log::custom(|info| {
            let method = info.method();
            let path = info.path();
            let status = info.status();
            let elapsed = info.elapsed().as_millis();

            if status.is_success() {
                info!(
                    "Method: {}, Path: {}, Status: {}, Elapsed Time: {}ms",
                    method, path, status, elapsed
                );
            } else {
                log::error!(
                    "Method: {}, Path: {}, Status: {}, Elapsed Time: {}ms",
                    method,
                    path,
                    status,
                    elapsed,
                );
            }
        }));
        warp::serve(routes).run(address).await
    }
}

pub fn routes<Source: MediaSource + Send + Sync + 'static>(
    proxy: Arc<FeedProxy<Source>>,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    warp::path!("api" / "instagram")
        .and(warp::get())
        .and_then(move || get_instagram_feed(proxy.clone()))
}

async fn get_instagram_feed<Source: MediaSource + Send + Sync + 'static>(
    proxy: Arc<FeedProxy<Source>>,
) -> Result<Response, Infallible> {
    Ok(match proxy.fetch_feed().await {
        Ok(page) => {
            warp::reply::with_header(warp::reply::json(&page), "cache-control", FEED_CACHE_CONTROL)
                .into_response()
        }
        Err(err) => err.into_response(),
    })
}

#[derive(Deserialize)]
struct UpstreamEnvelope {
    data: Option<Value>,
    paging: Option<Paging>,
}

/// Checks the upstream body's shape and normalizes every entry.
///
/// Entry order is kept. A repeated id keeps its first occurrence.
pub fn normalize(body: &str) -> Result<FeedPage, ProxyError> {
    let envelope: UpstreamEnvelope = serde_json::from_str(body)
        .map_err(|err| ProxyError::Contract(format!("body is not a media listing: {err}")))?;

    let entries = match envelope.data {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ProxyError::Contract("`data` is not a list".to_string())),
        None => return Err(ProxyError::Contract("`data` is missing".to_string())),
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut data = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let raw: RawMediaItem = serde_json::from_value(entry)
            .map_err(|err| ProxyError::Contract(format!("entry {index}: {err}")))?;
        if !seen.insert(raw.id.clone()) {
            warn!("Dropping duplicate media id {}", raw.id);
            continue;
        }
        data.push(MediaItem::from(raw));
    }

    Ok(FeedPage {
        data,
        paging: envelope.paging,
    })
}
