use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{send_json, LyricsSource, ServiceError};

/// Whether a failed lyrics fetch is shown to the user or only logged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum LyricsVerbosity {
    #[default]
    Silent,
    Notify,
}

/// Reads `data.lyrics`. Any other shape means "no lyrics", not an error.
pub fn extract_lyrics(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|d| d.get("lyrics"))
        .and_then(Value::as_str)
        .map(|l| l.replace("<br>", "\n").trim().to_string())
        .filter(|l| !l.is_empty())
}

pub struct SaavnLyrics {
    client: reqwest::Client,
    url: String,
}

impl SaavnLyrics {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        SaavnLyrics { client, url }
    }
}

#[async_trait]
impl LyricsSource for SaavnLyrics {
    async fn lyrics(&self, track_id: &str) -> Result<Option<String>, ServiceError> {
        debug!("Fetching lyrics for {track_id}");
        let req = self.client.get(&self.url).query(&[("id", track_id)]);
        match send_json(req).await {
            Ok(body) => Ok(extract_lyrics(&body)),
            Err(ServiceError::Status(404)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
