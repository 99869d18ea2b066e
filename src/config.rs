use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use dotenv::dotenv;

use crate::error::ProxyError;

pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_GRAPH_API_VERSION: &str = "v23.0";

#[derive(Clone)]
pub struct Config {
    pub instagram_id: Option<String>,
    pub access_token: Option<String>,
    pub graph_api_url: String,
    pub graph_api_version: String,
    pub bind_addr: SocketAddr,
    pub upstream_timeout: Duration,
    /// How long a successful upstream body is reused before refetching.
    pub revalidate: Duration,
}

impl Config {
    /// Loads `.env` (if there is one) and then reads the process environment.
    ///
    /// Missing Instagram credentials are not an error here: the proxy reports them
    /// per request, see [`Config::credentials`].
    pub fn load_env_config() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = non_empty("FEED_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3030".to_string())
            .parse::<SocketAddr>()
            .context("FEED_BIND_ADDR is not a valid socket address")?;

        let upstream_timeout = match non_empty("UPSTREAM_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(10),
        };

        let revalidate = match non_empty("FEED_REVALIDATE_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .context("FEED_REVALIDATE_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(300),
        };

        let config = Config {
            instagram_id: non_empty("INSTAGRAM_ID"),
            access_token: non_empty("INSTAGRAM_ACCESS_TOKEN"),
            graph_api_url: non_empty("GRAPH_API_URL")
                .unwrap_or_else(|| DEFAULT_GRAPH_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            graph_api_version: non_empty("GRAPH_API_VERSION")
                .unwrap_or_else(|| DEFAULT_GRAPH_API_VERSION.to_string()),
            bind_addr,
            upstream_timeout,
            revalidate,
        };

        log::info!(
            "Loaded config: bind_addr={}, graph_api={}/{}, credentials_present={}",
            config.bind_addr,
            config.graph_api_url,
            config.graph_api_version,
            config.instagram_id.is_some() && config.access_token.is_some(),
        );

        Ok(config)
    }

    pub fn credentials(&self) -> Result<Credentials, ProxyError> {
        let account_id = self
            .instagram_id
            .clone()
            .ok_or(ProxyError::Configuration("INSTAGRAM_ID"))?;
        let access_token = self
            .access_token
            .clone()
            .ok_or(ProxyError::Configuration("INSTAGRAM_ACCESS_TOKEN"))?;
        Ok(Credentials {
            account_id,
            access_token,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("instagram_id", &self.instagram_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("graph_api_url", &self.graph_api_url)
            .field("graph_api_version", &self.graph_api_version)
            .field("bind_addr", &self.bind_addr)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("revalidate", &self.revalidate)
            .finish()
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub account_id: String,
    access_token: String,
}

impl Credentials {
    pub fn new(account_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Credentials {
            account_id: account_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
