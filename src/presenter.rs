//! Client-side state for the Instagram section.
//!
//! A [`FeedPresenter`] fetches one [`FeedPage`] through a [`FeedClient`], pages
//! it into a grid sized for the viewport, and tracks per-item playback and
//! expansion. It is driven from a single event loop through `&mut self`.

use std::time::Duration;

use log::{info, warn};

use crate::client::FeedClient;
use crate::display::{self, DEFAULT_CAPTION_LIMIT};
use crate::error::ClientError;
use crate::interaction::InteractionState;
use crate::models::{FeedPage, MediaItem, MediaKind};
use crate::pagination::{Layout, Pagination};

pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Error(String),
    Empty,
    Ready,
}

/// What activating (clicking or tapping) a card does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Wide layouts open the post on instagram.com.
    Open(String),
    /// Narrow layouts toggle the card's overlay.
    Expanded(bool),
}

/// Render-ready view of one item on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub kind: MediaKind,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub alt_text: Option<String>,
    pub caption: String,
    pub hashtags: String,
    pub likes: String,
    pub comments: String,
    pub permalink: Option<String>,
    pub playing: bool,
    pub muted: bool,
    pub expanded: bool,
}

pub struct FeedPresenter<Client: FeedClient> {
    client: Client,
    state: FeedState,
    items: Vec<MediaItem>,
    layout: Layout,
    pagination: Pagination,
    interaction: InteractionState,
    caption_limit: usize,
    load_timeout: Duration,
}

impl<Client: FeedClient> FeedPresenter<Client> {
    /// Starts in `Loading`; call [`FeedPresenter::mount`] to fetch.
    pub fn new(client: Client, viewport_width: u32) -> Self {
        let layout = Layout::from_width(viewport_width);
        FeedPresenter {
            client,
            state: FeedState::Loading,
            items: Vec::new(),
            layout,
            pagination: Pagination::new(layout.page_size(), 0),
            interaction: InteractionState::default(),
            caption_limit: DEFAULT_CAPTION_LIMIT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_caption_limit(mut self, caption_limit: usize) -> Self {
        self.caption_limit = caption_limit;
        self
    }

    pub fn with_load_timeout(mut self, load_timeout: Duration) -> Self {
        self.load_timeout = load_timeout;
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Initial fetch when the section appears.
    pub async fn mount(&mut self) -> &FeedState {
        self.load().await
    }

    /// The "try again" action. Allowed from any state.
    pub async fn retry(&mut self) -> &FeedState {
        self.load().await
    }

    async fn load(&mut self) -> &FeedState {
        self.begin_load();
        let result = match tokio::time::timeout(self.load_timeout, self.client.fetch_feed()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout),
        };
        self.finish_load(result);
        &self.state
    }

    /// Enters `Loading`, dropping any previous error.
    pub fn begin_load(&mut self) {
        self.state = FeedState::Loading;
    }

    pub fn finish_load(&mut self, result: Result<FeedPage, ClientError>) {
        self.interaction.reset();
        match result {
            Ok(page) => {
                info!("Loaded {} Instagram posts", page.data.len());
                self.items = page.data;
                self.pagination = Pagination::new(self.layout.page_size(), self.items.len());
                self.state = if self.items.is_empty() {
                    FeedState::Empty
                } else {
                    FeedState::Ready
                };
            }
            Err(err) => {
                warn!("Failed to load Instagram posts: {err}");
                self.items.clear();
                self.pagination = Pagination::new(self.layout.page_size(), 0);
                self.state = FeedState::Error(err.to_string());
            }
        }
    }

    pub fn visible_items(&self) -> &[MediaItem] {
        &self.items[self.pagination.range()]
    }

    pub fn visible_cards(&self) -> Vec<Card> {
        self.visible_items()
            .iter()
            .map(|item| self.card(item))
            .collect()
    }

    fn card(&self, item: &MediaItem) -> Card {
        let kind = item.kind();
        Card {
            id: item.id.clone(),
            kind,
            media_url: item.media_url.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
            alt_text: item.alt_text.clone(),
            caption: display::truncate_caption(&item.caption, self.caption_limit),
            hashtags: display::hashtags(&item.caption),
            likes: display::format_count(item.like_count),
            comments: display::format_count(item.comments_count),
            permalink: display::permalink_url(item),
            playing: self.interaction.is_playing(&item.id),
            muted: kind == MediaKind::Video && self.interaction.is_muted(&item.id),
            expanded: self.interaction.is_expanded(&item.id),
        }
    }

    pub fn next_page(&mut self) -> bool {
        let changed = self.pagination.next();
        self.after_page_change(changed)
    }

    pub fn prev_page(&mut self) -> bool {
        let changed = self.pagination.prev();
        self.after_page_change(changed)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let changed = self.pagination.go_to(page);
        self.after_page_change(changed)
    }

    fn after_page_change(&mut self, changed: bool) -> bool {
        if changed {
            self.interaction.stop_all();
        }
        changed
    }

    /// Re-evaluates the layout for a new viewport width.
    pub fn resize(&mut self, viewport_width: u32) {
        let layout = Layout::from_width(viewport_width);
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.interaction.collapse();
        let before = self.pagination.range();
        self.pagination.set_page_size(layout.page_size());
        self.after_page_change(self.pagination.range() != before);
    }

    fn video(&self, id: &str) -> Option<&MediaItem> {
        self.items
            .iter()
            .find(|item| item.id == id && item.kind() == MediaKind::Video)
    }

    /// Returns whether the video is playing afterwards; `false` for unknown ids and images.
    pub fn toggle_play(&mut self, id: &str) -> bool {
        if self.video(id).is_none() {
            return false;
        }
        self.interaction.toggle_play(id)
    }

    /// Returns whether the video is muted afterwards.
    pub fn toggle_mute(&mut self, id: &str) -> bool {
        if self.video(id).is_none() {
            return true;
        }
        self.interaction.toggle_mute(id)
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.interaction.is_playing(id)
    }

    pub fn is_muted(&self, id: &str) -> bool {
        self.interaction.is_muted(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.interaction.is_expanded(id)
    }

    /// Pointer entered a card. Ignored on narrow layouts, which use taps.
    pub fn hover(&mut self, id: &str) {
        if self.layout == Layout::Wide {
            self.interaction.hover(id);
        }
    }

    pub fn unhover(&mut self, id: &str) {
        if self.layout == Layout::Wide {
            self.interaction.unhover(id);
        }
    }

    pub fn activate(&mut self, id: &str) -> Option<Activation> {
        let item = self.items.iter().find(|item| item.id == id)?;
        match self.layout {
            Layout::Wide => display::permalink_url(item).map(Activation::Open),
            Layout::Narrow => Some(Activation::Expanded(self.interaction.toggle_expanded(id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replies with queued results, one per fetch.
    struct QueuedClient {
        replies: Mutex<VecDeque<Result<FeedPage, ClientError>>>,
    }

    impl QueuedClient {
        fn new(replies: Vec<Result<FeedPage, ClientError>>) -> Self {
            QueuedClient {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    impl FeedClient for QueuedClient {
        async fn fetch_feed(&self) -> Result<FeedPage, ClientError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no reply queued")
        }
    }

    struct HangingClient;

    impl FeedClient for HangingClient {
        async fn fetch_feed(&self) -> Result<FeedPage, ClientError> {
            std::future::pending().await
        }
    }

    fn item(id: &str, product_type: &str) -> MediaItem {
        serde_json::from_value(json!({
            "id": id,
            "media_product_type": product_type,
            "shortcode": format!("sc{id}"),
        }))
        .unwrap()
    }

    /// `count` items; ids listed in `videos` are reels.
    fn page(count: usize, videos: &[usize]) -> FeedPage {
        FeedPage {
            data: (0..count)
                .map(|i| {
                    let kind = if videos.contains(&i) { "REELS" } else { "FEED" };
                    item(&i.to_string(), kind)
                })
                .collect(),
            paging: None,
        }
    }

    fn failure(message: &str) -> ClientError {
        ClientError::Status {
            status: 500,
            message: message.to_string(),
        }
    }

    async fn ready(count: usize, videos: &[usize], width: u32) -> FeedPresenter<QueuedClient> {
        let mut presenter =
            FeedPresenter::new(QueuedClient::new(vec![Ok(page(count, videos))]), width);
        presenter.mount().await;
        presenter
    }

    fn visible_ids<C: FeedClient>(presenter: &FeedPresenter<C>) -> Vec<String> {
        presenter
            .visible_items()
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn starts_loading_and_becomes_ready() {
        let mut presenter = FeedPresenter::new(QueuedClient::new(vec![Ok(page(3, &[]))]), 1024);
        assert_eq!(presenter.state(), &FeedState::Loading);
        assert_eq!(presenter.mount().await, &FeedState::Ready);
        assert_eq!(presenter.items().len(), 3);
    }

    #[tokio::test]
    async fn zero_items_is_empty() {
        let mut presenter = FeedPresenter::new(QueuedClient::new(vec![Ok(page(0, &[]))]), 1024);
        assert_eq!(presenter.mount().await, &FeedState::Empty);
        assert!(presenter.visible_cards().is_empty());
    }

    #[tokio::test]
    async fn failure_then_retry_recovers() {
        let client = QueuedClient::new(vec![
            Err(failure("Instagram API error: 403")),
            Ok(page(2, &[])),
        ]);
        let mut presenter = FeedPresenter::new(client, 1024);

        assert_eq!(
            presenter.mount().await,
            &FeedState::Error("Instagram API error: 403".to_string())
        );
        assert!(presenter.items().is_empty());

        presenter.begin_load();
        assert_eq!(presenter.state(), &FeedState::Loading);

        assert_eq!(presenter.retry().await, &FeedState::Ready);
        assert_eq!(presenter.items().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_fetch_times_out_into_error() {
        let mut presenter =
            FeedPresenter::new(HangingClient, 1024).with_load_timeout(Duration::from_secs(5));
        let state = presenter.mount().await.clone();
        assert_eq!(
            state,
            FeedState::Error(ClientError::Timeout.to_string())
        );
    }

    #[tokio::test]
    async fn nine_items_on_a_wide_viewport() {
        let mut presenter = ready(9, &[], 1280).await;
        assert_eq!(presenter.pagination().page_size(), 8);
        assert_eq!(presenter.pagination().page_count(), 2);
        assert_eq!(visible_ids(&presenter), ["0", "1", "2", "3", "4", "5", "6", "7"]);

        assert!(presenter.next_page());
        assert_eq!(visible_ids(&presenter), ["8"]);
        assert!(!presenter.next_page());
        assert_eq!(presenter.pagination().current(), 1);
    }

    #[tokio::test]
    async fn narrow_viewport_uses_two_columns() {
        let presenter = ready(9, &[], 375).await;
        assert_eq!(presenter.pagination().page_size(), 4);
        assert_eq!(presenter.pagination().page_count(), 3);
    }

    #[tokio::test]
    async fn one_video_plays_at_a_time() {
        let mut presenter = ready(4, &[1, 2], 1280).await;
        assert!(presenter.toggle_play("1"));
        assert!(presenter.toggle_play("2"));
        assert!(!presenter.is_playing("1"));
        assert!(presenter.is_playing("2"));

        let playing: Vec<bool> = presenter.visible_cards().iter().map(|c| c.playing).collect();
        assert_eq!(playing, [false, false, true, false]);
    }

    #[tokio::test]
    async fn images_cannot_play() {
        let mut presenter = ready(2, &[1], 1280).await;
        assert!(!presenter.toggle_play("0"));
        assert!(!presenter.toggle_play("missing"));
        assert!(!presenter.is_playing("0"));
    }

    #[tokio::test]
    async fn changing_page_stops_playback() {
        let mut presenter = ready(9, &[0, 8], 1280).await;
        presenter.toggle_play("0");

        assert!(presenter.next_page());
        assert!(!presenter.is_playing("0"));

        presenter.toggle_play("8");
        assert!(presenter.go_to_page(0));
        assert!(!presenter.is_playing("8"));
    }

    #[tokio::test]
    async fn refused_navigation_keeps_playback() {
        let mut presenter = ready(3, &[0], 1280).await;
        presenter.toggle_play("0");
        assert!(!presenter.prev_page());
        assert!(!presenter.next_page());
        assert!(presenter.is_playing("0"));
    }

    #[tokio::test]
    async fn mute_defaults_on_and_toggles_per_video() {
        let mut presenter = ready(3, &[0, 1], 1280).await;
        assert!(presenter.is_muted("0"));
        assert!(!presenter.toggle_mute("0"));
        assert!(presenter.is_muted("1"));

        let cards = presenter.visible_cards();
        assert!(!cards[0].muted);
        assert!(cards[1].muted);
        assert!(!cards[2].muted, "images carry no mute flag");
    }

    #[tokio::test]
    async fn resize_to_wide_clamps_page_and_stops_playback() {
        let mut presenter = ready(9, &[8], 375).await;
        assert!(presenter.go_to_page(2));
        presenter.toggle_play("8");

        presenter.resize(1280);
        assert_eq!(presenter.layout(), Layout::Wide);
        assert_eq!(presenter.pagination().current(), 1);
        assert_eq!(visible_ids(&presenter), ["8"]);
        assert!(!presenter.is_playing("8"));
    }

    #[tokio::test]
    async fn resize_to_narrow_stops_playback_when_the_window_moves() {
        let mut presenter = ready(9, &[8], 1280).await;
        assert!(presenter.next_page());
        assert!(presenter.toggle_play("8"));

        presenter.resize(375);
        assert_eq!(presenter.pagination().current(), 1);
        assert_eq!(visible_ids(&presenter), ["4", "5", "6", "7"]);
        assert!(!presenter.is_playing("8"));
    }

    #[tokio::test]
    async fn resize_keeps_playback_when_the_window_is_unchanged() {
        let mut presenter = ready(3, &[1], 1280).await;
        assert!(presenter.toggle_play("1"));

        presenter.resize(375);
        assert_eq!(visible_ids(&presenter), ["0", "1", "2"]);
        assert!(presenter.is_playing("1"));
    }

    #[tokio::test]
    async fn activation_depends_on_layout() {
        let mut presenter = ready(2, &[], 1280).await;
        assert_eq!(
            presenter.activate("1"),
            Some(Activation::Open("https://www.instagram.com/p/sc1/".to_string()))
        );
        assert_eq!(presenter.activate("missing"), None);

        presenter.resize(375);
        assert_eq!(presenter.activate("1"), Some(Activation::Expanded(true)));
        assert_eq!(presenter.activate("0"), Some(Activation::Expanded(true)));
        assert!(!presenter.is_expanded("1"));
        assert_eq!(presenter.activate("0"), Some(Activation::Expanded(false)));
    }

    #[tokio::test]
    async fn hover_only_applies_on_wide_layouts() {
        let mut presenter = ready(2, &[], 1280).await;
        presenter.hover("0");
        assert!(presenter.is_expanded("0"));
        presenter.unhover("0");
        assert!(!presenter.is_expanded("0"));

        presenter.resize(375);
        presenter.hover("0");
        assert!(!presenter.is_expanded("0"));
    }

    #[tokio::test]
    async fn cards_carry_display_values() {
        let mut feed = page(1, &[]);
        feed.data[0].caption = "Desayuno buffet frente al mar #Piura".to_string();
        feed.data[0].like_count = 1_500;
        feed.data[0].comments_count = 42;
        let mut presenter =
            FeedPresenter::new(QueuedClient::new(vec![Ok(feed)]), 1280).with_caption_limit(8);
        presenter.mount().await;

        let card = &presenter.visible_cards()[0];
        assert_eq!(card.caption, "Desayuno...");
        assert_eq!(card.hashtags, "#Piura");
        assert_eq!(card.likes, "1.5k");
        assert_eq!(card.comments, "42");
        assert_eq!(card.kind, MediaKind::Image);
    }

    #[tokio::test]
    async fn reload_resets_page_and_flags() {
        let client = QueuedClient::new(vec![Ok(page(9, &[8])), Ok(page(9, &[8]))]);
        let mut presenter = FeedPresenter::new(client, 1280);
        presenter.mount().await;
        presenter.next_page();
        presenter.toggle_play("8");

        presenter.retry().await;
        assert_eq!(presenter.pagination().current(), 0);
        assert!(!presenter.is_playing("8"));
    }
}
