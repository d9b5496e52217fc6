//! Plain-text rendering of a [`Session`].

use std::fmt::Write;

use crate::app::state::Session;
use crate::track::Track;

pub const PROMPT: &str = "moodwave> ";

const KEYS: &[(&str, &str)] = &[
    ("<text>", "Describe your mood"),
    (":song <q>", "Search songs directly"),
    (":more <q>", "Search and append to the queue"),
    (":artist [name]", "Set / clear the artist filter"),
    (":n  :p", "Next / previous track"),
    (":play", "Play / pause"),
    (":lyrics", "Lyrics for the current track"),
    (":list", "Show the queue"),
    (":help", "Toggle this help"),
    (":q", "Quit"),
];

pub fn welcome() -> String {
    "🎵 moodwave: how are you feeling today? (:help for commands)\n".to_string()
}

pub fn help() -> String {
    let mut out = String::from("Commands\n");
    for (key, desc) in KEYS {
        let _ = writeln!(out, "  {key:<16}{desc}");
    }
    out
}

pub fn render(session: &Session) -> String {
    let mut out = String::new();

    if session.show_help {
        out.push_str(&help());
    }

    if let Some(mood) = &session.mood {
        let _ = writeln!(out, "Detected Mood: {mood}");
    }
    if let Some(artist) = &session.artist_filter {
        let _ = writeln!(out, "Artist filter: {artist}");
    }
    if let Some(n) = &session.notification {
        let tag = if n.is_error { "✗" } else { "•" };
        let _ = writeln!(out, "{tag} {}", n.message);
    }

    for name in &session.suggestions {
        let _ = writeln!(out, "  🎶 {name}");
    }

    if let Some(track) = session.now_playing() {
        out.push_str(&render_track(track, session.is_playing));
        out.push_str(&render_queue(session));
    }

    if let Some(lyrics) = &session.lyrics {
        let _ = writeln!(out, "\nLyrics: {}\n{}", lyrics.track_title, lyrics.text);
    }

    out
}

pub fn render_track(track: &Track, is_playing: bool) -> String {
    let mut out = String::new();
    let state = if is_playing { "▶ Playing" } else { "■ Stopped" };
    let _ = writeln!(out, "\n{}  ({state})", track.title);
    let _ = writeln!(out, "  Artist: {}", track.artist);
    let _ = writeln!(out, "  Album:  {}", track.album);
    match &track.image_url {
        Some(url) => out.push_str(&format!("  Image:  {url}\n")),
        None => out.push_str("  Image:  No image available.\n"),
    }
    match &track.audio_url {
        Some(url) => out.push_str(&format!("  Audio:  {url}\n")),
        None => out.push_str("  Audio:  Audio unavailable.\n"),
    }
    if let Some(link) = &track.permalink {
        let _ = writeln!(out, "  Listen: {link}");
    }
    out
}

fn render_queue(session: &Session) -> String {
    let queue = &session.queue;
    let mut out = String::new();
    let _ = writeln!(out, "\nQueue ({}, {})", queue.len(), queue.policy());
    for (i, track) in queue.tracks().iter().enumerate() {
        let marker = if queue.cursor() == Some(i) { "▶" } else { " " };
        let _ = writeln!(out, " {marker} {:>2}. {} - {}", i + 1, track.title, track.artist);
    }
    let prev = if queue.can_retreat() { "[:p prev]" } else { "[prev disabled]" };
    let next = if queue.can_advance() { "[:n next]" } else { "[next disabled]" };
    let _ = writeln!(out, "  {prev} {next}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::queue::CursorPolicy;
    use serde_json::json;

    #[test]
    fn test_render_marks_unavailable_slots() {
        let track = Track::from_raw(&json!({ "name": "Fix You" }));
        let text = render_track(&track, false);
        assert!(text.contains("Fix You"));
        assert!(text.contains("No image available."));
        assert!(text.contains("Audio unavailable."));
    }

    #[test]
    fn test_render_available_slots() {
        let track = Track::from_raw(&json!({
            "name": "Happy",
            "image": [{ "link": "cover.jpg" }],
            "downloadUrl": [{ "link": "song.mp4" }]
        }));
        let text = render_track(&track, true);
        assert!(text.contains("  Image:  cover.jpg\n"));
        assert!(text.contains("  Audio:  song.mp4\n"));
        assert!(text.contains("(▶ Playing)"));
    }

    #[test]
    fn test_render_clamped_controls() {
        let mut session = Session::new(CursorPolicy::Clamped);
        session.load_tracks(vec![
            Track::from_raw(&json!({ "name": "a" })),
            Track::from_raw(&json!({ "name": "b" })),
        ]);
        let text = render(&session);
        assert!(text.contains("[prev disabled]"));
        assert!(text.contains("[:n next]"));
        assert!(text.contains(" ▶  1. a"));
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help();
        assert!(text.contains(":lyrics"));
        assert!(text.contains(":q"));
    }
}
