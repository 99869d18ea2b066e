use std::sync::LazyLock;

use regex::Regex;

use crate::models::MediaItem;

pub const DEFAULT_CAPTION_LIMIT: usize = 100;
pub const DEFAULT_HASHTAGS: &str = "#ExperienciaParaiso";

// ASCII word characters only, so `#Niño` reads as `#Ni` like on the site.
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u:#\w+)").unwrap());

/// Badge form of a like/comment count: `999`, `1.5k`, `2.3M`.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        one_decimal(count, 1_000_000, 'M')
    } else if count >= 1_000 {
        one_decimal(count, 1_000, 'k')
    } else {
        count.to_string()
    }
}

/// Tenths of `unit`, rounding halves up.
fn one_decimal(count: u64, unit: u64, suffix: char) -> String {
    let tenths = (u128::from(count) * 10 + u128::from(unit) / 2) / u128::from(unit);
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

/// Cuts after `max_chars` characters and appends `...`.
pub fn truncate_caption(caption: &str, max_chars: usize) -> String {
    match caption.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &caption[..cut]),
        None => caption.to_string(),
    }
}

/// First three hashtags of a caption, or the house tag when there are none.
pub fn hashtags(caption: &str) -> String {
    let tags: Vec<&str> = HASHTAG
        .find_iter(caption)
        .take(3)
        .map(|tag| tag.as_str())
        .collect();
    if tags.is_empty() {
        DEFAULT_HASHTAGS.to_string()
    } else {
        tags.join(" ")
    }
}

/// Link to the post on instagram.com.
pub fn permalink_url(item: &MediaItem) -> Option<String> {
    match &item.shortcode {
        Some(shortcode) if !shortcode.is_empty() => {
            Some(format!("https://www.instagram.com/p/{shortcode}/"))
        }
        _ => item.permalink.clone(),
    }
}
