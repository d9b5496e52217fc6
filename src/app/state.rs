use crate::app::queue::{CursorPolicy, PlaybackQueue};
use crate::services::MoodLabel;
use crate::track::Track;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), is_error: false }
    }
    pub fn error(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), is_error: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LyricsView {
    pub track_title: String,
    pub text: String,
}

/// Everything one user sees. Each connection/terminal owns its own session;
/// nothing here is shared.
#[derive(Debug, Clone)]
pub struct Session {
    pub queue: PlaybackQueue,
    pub mood: Option<MoodLabel>,
    /// Plain song names from the fallback catalog. Never playable.
    pub suggestions: Vec<String>,
    pub artist_filter: Option<String>,
    pub is_playing: bool,
    pub lyrics: Option<LyricsView>,
    pub notification: Option<Notification>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl Session {
    pub fn new(policy: CursorPolicy) -> Self {
        Session {
            queue: PlaybackQueue::new(policy),
            mood: None,
            suggestions: Vec::new(),
            artist_filter: None,
            is_playing: false,
            lyrics: None,
            notification: None,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn set_notification(&mut self, n: Notification) {
        self.notification = Some(n);
    }

    pub fn now_playing(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Loads a fresh result set. Playback stops and per-track views reset.
    pub fn load_tracks(&mut self, tracks: Vec<Track>) {
        self.queue.replace(tracks);
        self.suggestions.clear();
        self.is_playing = false;
        self.lyrics = None;
    }

    /// Called after the selection moved. Lyrics belong to the old track.
    pub fn selection_changed(&mut self) {
        self.lyrics = None;
        if !self.now_playing().is_some_and(Track::is_playable) {
            self.is_playing = false;
        }
    }

    /// Flips `is_playing` when the current track has audio. Returns the new
    /// state, or `None` if there is nothing to play.
    pub fn toggle_play(&mut self) -> Option<bool> {
        if self.now_playing().is_some_and(Track::is_playable) {
            self.is_playing = !self.is_playing;
            Some(self.is_playing)
        } else {
            self.is_playing = false;
            None
        }
    }
}
