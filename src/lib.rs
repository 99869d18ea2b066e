mod client;
mod config;
pub mod display;
mod error;
mod graph;
pub mod handoff;
mod interaction;
mod models;
mod pagination;
mod presenter;
mod proxy;

pub use client::{FeedClient, HttpFeedClient};
pub use config::{Config, Credentials};
pub use error::{ClientError, ProxyError};
pub use graph::{GraphClient, MediaSource, MEDIA_FIELDS};
pub use interaction::InteractionState;
pub use models::{Cursors, ErrorBody, FeedPage, MediaItem, MediaKind, Paging, RawMediaItem};
pub use pagination::{Layout, Pagination};
pub use presenter::{Activation, Card, FeedPresenter, FeedState};
pub use proxy::{normalize, routes, FeedProxy, FEED_CACHE_CONTROL};
