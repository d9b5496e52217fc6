use dotenvy::dotenv;
use std::{str::FromStr, time::Duration};
use thiserror::Error;

use crate::app::queue::CursorPolicy;
use crate::services::lyrics::LyricsVerbosity;

pub const DEFAULT_CLASSIFIER_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_SEARCH_URL: &str = "https://saavn.dev/search/songs";
pub const DEFAULT_LYRICS_URL: &str = "https://saavn.dev/lyrics";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is missing from .env or environment!")]
    MissingVar(&'static str),

    #[error("{var} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub classifier_url: String,
    pub classifier_model: String,
    pub search_url: String,
    pub lyrics_url: String,
    pub request_timeout: Duration,
    pub cursor_policy: CursorPolicy,
    pub lyrics_verbosity: LyricsVerbosity,
    pub redis_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env is optional, plain env vars work too
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be driven
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let groq_api_key = get("GROQ_API_KEY").ok_or(ConfigError::MissingVar("GROQ_API_KEY"))?;

        let timeout_secs = match get("MOODWAVE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        var: "MOODWAVE_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        var: "MOODWAVE_TIMEOUT_SECS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            groq_api_key: groq_api_key.trim().to_string(),
            classifier_url: get("MOODWAVE_CLASSIFIER_URL")
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_URL.to_string()),
            classifier_model: get("MOODWAVE_CLASSIFIER_MODEL")
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_string()),
            search_url: get("MOODWAVE_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            lyrics_url: get("MOODWAVE_LYRICS_URL").unwrap_or_else(|| DEFAULT_LYRICS_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            cursor_policy: parse_enum("MOODWAVE_CURSOR_POLICY", get("MOODWAVE_CURSOR_POLICY"))?
                .unwrap_or_default(),
            lyrics_verbosity: parse_enum("MOODWAVE_LYRICS_ERRORS", get("MOODWAVE_LYRICS_ERRORS"))?
                .unwrap_or_default(),
            redis_url: get("REDIS_URL"),
        })
    }
}

fn parse_enum<T>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr<Err = strum::ParseError>,
{
    raw.map(|value| {
        value
            .trim()
            .to_ascii_lowercase()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            })
    })
    .transpose()
}
