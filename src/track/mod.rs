//! Normalized track records.
//!
//! Search backends return loosely-typed JSON where any field may be missing,
//! `null`, or of an unexpected shape. [`Track::from_raw`] is the single place
//! that JSON is interpreted; everything downstream works with the fixed-shape
//! [`Track`].

use serde_json::Value;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "N/A";

/// One element of a search backend's results array, untouched.
pub type RawTrack = Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// `None` marks the artwork slot as unavailable.
    pub image_url: Option<String>,
    /// `None` marks the track as unplayable.
    pub audio_url: Option<String>,
    /// Backend id, used for the lyrics lookup.
    pub external_id: Option<String>,
    /// Provider page for the track ("listen on ...").
    pub permalink: Option<String>,
}

impl Track {
    /// Never fails: every missing or mistyped field degrades to a placeholder
    /// or to `None`.
    pub fn from_raw(raw: &RawTrack) -> Self {
        let title = non_empty_str(raw.get("name"))
            .or_else(|| non_empty_str(raw.get("song")))
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();

        Track {
            title,
            artist: artist_of(raw).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: album_of(raw).unwrap_or(UNKNOWN_ALBUM).to_string(),
            image_url: best_variant_link(raw.get("image")),
            audio_url: best_variant_link(raw.get("downloadUrl")),
            external_id: id_of(raw.get("id")),
            permalink: non_empty_str(raw.get("url")).map(str::to_string),
        }
    }

    pub fn is_playable(&self) -> bool {
        self.audio_url.is_some()
    }
}

fn non_empty_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Quality variants are ordered lowest to highest, so the last one wins.
/// Anything other than a non-empty array whose last element carries a string
/// `link` yields `None`.
fn best_variant_link(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_array)
        .and_then(|variants| variants.last())
        .and_then(|last| non_empty_str(last.get("link")))
        .map(str::to_string)
}

fn album_of(raw: &Value) -> Option<&str> {
    match raw.get("album") {
        Some(album @ Value::Object(_)) => non_empty_str(album.get("name")),
        other => non_empty_str(other),
    }
}

fn artist_of(raw: &Value) -> Option<String> {
    if let Some(s) = non_empty_str(raw.get("primaryArtists")) {
        return Some(s.to_string());
    }

    let primary: Vec<&str> = raw
        .get("artists")
        .and_then(|a| a.get("primary"))
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|artist| non_empty_str(artist.get("name")))
                .collect()
        })
        .unwrap_or_default();
    if !primary.is_empty() {
        return Some(primary.join(", "));
    }

    non_empty_str(raw.get("artist"))
        .or_else(|| non_empty_str(raw.get("singers")))
        .map(str::to_string)
}

fn id_of(v: Option<&Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record() {
        let raw = json!({
            "id": "abc123",
            "name": "Kesariya",
            "primaryArtists": "Arijit Singh",
            "album": { "name": "Brahmastra" },
            "url": "https://www.jiosaavn.com/song/kesariya/abc",
            "image": [
                { "quality": "50x50", "link": "small.jpg" },
                { "quality": "500x500", "link": "large.jpg" }
            ],
            "downloadUrl": [
                { "quality": "96kbps", "link": "low.mp4" },
                { "quality": "320kbps", "link": "high.mp4" }
            ]
        });
        let t = Track::from_raw(&raw);
        assert_eq!(t.title, "Kesariya");
        assert_eq!(t.artist, "Arijit Singh");
        assert_eq!(t.album, "Brahmastra");
        assert_eq!(t.image_url.as_deref(), Some("large.jpg"));
        assert_eq!(t.audio_url.as_deref(), Some("high.mp4"));
        assert_eq!(t.external_id.as_deref(), Some("abc123"));
        assert_eq!(
            t.permalink.as_deref(),
            Some("https://www.jiosaavn.com/song/kesariya/abc")
        );
        assert!(t.is_playable());
    }

    #[test]
    fn test_empty_object_degrades_to_placeholders() {
        let t = Track::from_raw(&json!({}));
        assert_eq!(t.title, UNKNOWN_TITLE);
        assert_eq!(t.artist, UNKNOWN_ARTIST);
        assert_eq!(t.album, UNKNOWN_ALBUM);
        assert!(t.image_url.is_none());
        assert!(t.audio_url.is_none());
        assert!(t.external_id.is_none());
        assert!(!t.is_playable());
    }

    #[test]
    fn test_non_object_record_does_not_panic() {
        for raw in [json!(null), json!(42), json!("song"), json!([1, 2, 3])] {
            let t = Track::from_raw(&raw);
            assert_eq!(t.title, UNKNOWN_TITLE);
            assert!(t.audio_url.is_none());
        }
    }

    #[test]
    fn test_title_falls_back_to_song_field() {
        let t = Track::from_raw(&json!({ "song": "Tum Hi Ho" }));
        assert_eq!(t.title, "Tum Hi Ho");

        let t = Track::from_raw(&json!({ "name": "", "song": "Tum Hi Ho" }));
        assert_eq!(t.title, "Tum Hi Ho");

        let t = Track::from_raw(&json!({ "name": null, "song": 7 }));
        assert_eq!(t.title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_missing_image_and_download_url() {
        let only_image = json!({ "name": "A", "image": [{ "link": "i.jpg" }] });
        let t = Track::from_raw(&only_image);
        assert_eq!(t.image_url.as_deref(), Some("i.jpg"));
        assert!(t.audio_url.is_none());

        let only_audio = json!({ "name": "A", "downloadUrl": [{ "link": "a.mp4" }] });
        let t = Track::from_raw(&only_audio);
        assert!(t.image_url.is_none());
        assert_eq!(t.audio_url.as_deref(), Some("a.mp4"));
    }

    #[test]
    fn test_variant_list_edge_shapes() {
        let cases = [
            json!({ "image": [] }),
            json!({ "image": null }),
            json!({ "image": "cover.jpg" }),
            json!({ "image": { "link": "cover.jpg" } }),
            json!({ "image": [{ "link": "first.jpg" }, { "size": "500x500" }] }),
            json!({ "image": [{ "link": "first.jpg" }, { "link": null }] }),
            json!({ "image": [{ "link": "first.jpg" }, "oops"] }),
        ];
        for raw in &cases {
            assert!(
                Track::from_raw(raw).image_url.is_none(),
                "expected unavailable image for {raw}"
            );
        }
    }

    #[test]
    fn test_last_variant_wins() {
        let raw = json!({
            "image": [{ "link": "a" }, { "link": "b" }, { "link": "c" }],
            "downloadUrl": [{ "link": "x" }, { "link": "y" }]
        });
        let t = Track::from_raw(&raw);
        assert_eq!(t.image_url.as_deref(), Some("c"));
        assert_eq!(t.audio_url.as_deref(), Some("y"));
    }

    #[test]
    fn test_album_as_plain_string() {
        let t = Track::from_raw(&json!({ "album": "Aashiqui 2" }));
        assert_eq!(t.album, "Aashiqui 2");

        let t = Track::from_raw(&json!({ "album": { "id": "1" } }));
        assert_eq!(t.album, UNKNOWN_ALBUM);
    }

    #[test]
    fn test_artist_sources() {
        let nested = json!({
            "artists": { "primary": [{ "name": "Pritam" }, { "name": "Arijit Singh" }, {}] }
        });
        assert_eq!(Track::from_raw(&nested).artist, "Pritam, Arijit Singh");

        let singers = json!({ "singers": "Shreya Ghoshal" });
        assert_eq!(Track::from_raw(&singers).artist, "Shreya Ghoshal");

        let empty_primary = json!({ "artists": { "primary": [] }, "artist": "Coldplay" });
        assert_eq!(Track::from_raw(&empty_primary).artist, "Coldplay");
    }

    #[test]
    fn test_numeric_id() {
        let t = Track::from_raw(&json!({ "id": 9001 }));
        assert_eq!(t.external_id.as_deref(), Some("9001"));
    }
}
