use std::collections::HashSet;

/// Transient per-item UI flags, keyed by media id.
///
/// Only one id can be playing; holding it in an `Option` makes that hold for
/// every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    playing: Option<String>,
    unmuted: HashSet<String>,
    expanded: Option<String>,
}

impl InteractionState {
    pub fn is_playing(&self, id: &str) -> bool {
        self.playing.as_deref() == Some(id)
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    /// Pauses `id` if it is playing, otherwise makes it the only playing item.
    /// Returns whether `id` is playing afterwards.
    pub fn toggle_play(&mut self, id: &str) -> bool {
        if self.is_playing(id) {
            self.playing = None;
            false
        } else {
            self.playing = Some(id.to_string());
            true
        }
    }

    pub fn stop_all(&mut self) {
        self.playing = None;
    }

    /// Videos start muted.
    pub fn is_muted(&self, id: &str) -> bool {
        !self.unmuted.contains(id)
    }

    /// Returns whether `id` is muted afterwards.
    pub fn toggle_mute(&mut self, id: &str) -> bool {
        if self.unmuted.remove(id) {
            true
        } else {
            self.unmuted.insert(id.to_string());
            false
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    pub fn hover(&mut self, id: &str) {
        self.expanded = Some(id.to_string());
    }

    pub fn unhover(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.expanded = None;
        }
    }

    /// Tap model: expanding one item collapses any other.
    /// Returns whether `id` is expanded afterwards.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        if self.is_expanded(id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(id.to_string());
            true
        }
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    pub fn reset(&mut self) {
        *self = InteractionState::default();
    }
}
