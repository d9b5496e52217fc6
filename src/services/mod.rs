use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::track::RawTrack;

pub mod classifier;
pub mod lyrics;
pub mod search;

pub use classifier::{GroqClassifier, MoodLabel};
pub use lyrics::{LyricsVerbosity, SaavnLyrics};
pub use search::{SaavnSearch, RESULT_LIMIT};

/// Everything that can go wrong talking to an upstream service. Callers treat
/// every variant the same way; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ServiceError::Timeout
        } else if e.is_decode() {
            ServiceError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            ServiceError::Status(status.as_u16())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

/// Shared client for all outbound calls. The timeout applies to each request
/// as a whole.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("moodwave/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ServiceError::Transport(e.to_string()))
}

/// Sends a prepared request and decodes a JSON body, mapping non-2xx statuses
/// to [`ServiceError::Status`].
pub(crate) async fn send_json(req: reqwest::RequestBuilder) -> Result<serde_json::Value, ServiceError> {
    let response = req.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status(status.as_u16()));
    }
    let body = response.json::<serde_json::Value>().await?;
    Ok(body)
}

/// Turns free text into a mood label.
#[async_trait]
pub trait MoodClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<MoodLabel, ServiceError>;
}

/// Looks up tracks for a query. Unreachable services and zero matches both
/// come back as an empty list.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    async fn search(&self, query: &str, extra: Option<&str>) -> Vec<RawTrack>;
}

/// Fetches lyrics by backend track id. `Ok(None)` means the backend has none.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    async fn lyrics(&self, track_id: &str) -> Result<Option<String>, ServiceError>;
}
