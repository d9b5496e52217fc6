//! The "now playing" queue: an ordered list of tracks plus a cursor.
//!
//! Exactly one [`CursorPolicy`] governs a queue for its whole life. The
//! cursor is `None` when the queue is empty and a valid index otherwise.

use crate::track::Track;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum CursorPolicy {
    /// Next/previous stop at the ends.
    #[default]
    Clamped,
    /// Next/previous wrap around.
    Wrapping,
    /// The head always plays; advancing moves it to the tail.
    Rotate,
}

#[derive(Debug, Clone)]
pub struct PlaybackQueue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
    policy: CursorPolicy,
}

impl PlaybackQueue {
    pub fn new(policy: CursorPolicy) -> Self {
        PlaybackQueue {
            tracks: Vec::new(),
            cursor: None,
            policy,
        }
    }

    pub fn policy(&self) -> CursorPolicy {
        self.policy
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.cursor = if tracks.is_empty() { None } else { Some(0) };
        self.tracks = tracks;
    }

    /// Appends at the tail. Selects the new track only if nothing was
    /// selected before.
    pub fn enqueue(&mut self, track: Track) {
        self.tracks.push(track);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    pub fn can_advance(&self) -> bool {
        match (self.policy, self.cursor) {
            (_, None) => false,
            (CursorPolicy::Clamped, Some(i)) => i + 1 < self.tracks.len(),
            (CursorPolicy::Wrapping | CursorPolicy::Rotate, Some(_)) => self.tracks.len() > 1,
        }
    }

    pub fn can_retreat(&self) -> bool {
        match (self.policy, self.cursor) {
            (_, None) | (CursorPolicy::Rotate, _) => false,
            (CursorPolicy::Clamped, Some(i)) => i > 0,
            (CursorPolicy::Wrapping, Some(_)) => self.tracks.len() > 1,
        }
    }

    /// Moves to the next track. Returns whether the selection changed.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let n = self.tracks.len();
        match (self.policy, self.cursor) {
            (CursorPolicy::Clamped, Some(i)) => self.cursor = Some(i + 1),
            (CursorPolicy::Wrapping, Some(i)) => self.cursor = Some((i + 1) % n),
            (CursorPolicy::Rotate, Some(_)) => return self.rotate(),
            (_, None) => return false,
        }
        true
    }

    /// Moves to the previous track. A rotating queue has no way back.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        let n = self.tracks.len();
        match (self.policy, self.cursor) {
            (CursorPolicy::Clamped, Some(i)) => self.cursor = Some(i - 1),
            (CursorPolicy::Wrapping, Some(i)) => self.cursor = Some((i + n - 1) % n),
            _ => return false,
        }
        true
    }

    /// Pops the head and appends it at the tail. Only meaningful under
    /// [`CursorPolicy::Rotate`]; a no-op for the index-based policies.
    pub fn rotate(&mut self) -> bool {
        if self.policy != CursorPolicy::Rotate || self.tracks.len() < 2 {
            return false;
        }
        self.tracks.rotate_left(1);
        true
    }
}
