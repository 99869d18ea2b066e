use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of the Graph API `/media` listing, as delivered upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMediaItem {
    pub id: String,
    pub media_url: Option<String>,
    pub media_product_type: Option<String>,
    pub caption: Option<String>,
    pub alt_text: Option<String>,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub comments_count: u64,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub legacy_instagram_media_id: Option<String>,
    pub shortcode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A normalized feed entry. Caption and counts are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_product_type: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_instagram_media_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcode: Option<String>,
    /// Upstream fields this crate does not model, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaItem {
    pub fn kind(&self) -> MediaKind {
        match self.media_product_type.as_deref() {
            Some("REELS") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }
}

impl From<RawMediaItem> for MediaItem {
    fn from(raw: RawMediaItem) -> Self {
        MediaItem {
            id: raw.id,
            media_url: raw.media_url,
            media_product_type: raw.media_product_type,
            caption: raw.caption.unwrap_or_default(),
            alt_text: raw.alt_text,
            like_count: raw.like_count,
            comments_count: raw.comments_count,
            thumbnail_url: raw.thumbnail_url,
            permalink: raw.permalink,
            legacy_instagram_media_id: raw.legacy_instagram_media_id,
            shortcode: raw.shortcode,
            extra: raw.extra,
        }
    }
}

/// Counts only feed a badge, so anything unusable reads as 0 rather than failing the feed.
fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let count = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|count| count.is_finite() && *count > 0.0)
                .map(|count| count as u64)
        }),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

/// The proxy's response body: items in upstream order plus the upstream paging block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub data: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
