use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::{send_json, MoodClassifier, ServiceError};

/// Moods the classifier is asked to choose from. The reply is not checked
/// against this list; whatever label comes back is used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Romantic,
    Party,
    Workout,
    Chill,
    Energetic,
    Devotional,
    Patriotic,
    Relaxing,
}

/// A trimmed, lowercased, non-empty mood label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoodLabel(String);

impl MoodLabel {
    pub fn new(raw: &str) -> Option<Self> {
        let label = raw.trim().to_lowercase();
        if label.is_empty() {
            None
        } else {
            Some(MoodLabel(label))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const SYSTEM_PROMPT: &str = "You are a helpful assistant that categorizes moods.";
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub fn build_instruction(text: &str) -> String {
    let moods = Mood::iter().map(|m| m.to_string()).collect::<Vec<_>>().join(", ");
    format!(
        "Based on this message, choose one mood from the following list: {moods}. \
         Message: {text}. Reply with only one mood from the list."
    )
}

/// Pulls the label out of an OpenAI-style chat completion body.
pub fn parse_label(body: serde_json::Value) -> Result<MoodLabel, ServiceError> {
    let response: ChatResponse =
        serde_json::from_value(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ServiceError::Malformed("no choices in response".to_string()))?;
    MoodLabel::new(&content).ok_or_else(|| ServiceError::Malformed("empty mood label".to_string()))
}

/// Chat-completions classifier (Groq by default, any OpenAI-compatible
/// endpoint works).
pub struct GroqClassifier {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl GroqClassifier {
    pub fn new(client: reqwest::Client, url: String, model: String, api_key: String) -> Self {
        GroqClassifier {
            client,
            url,
            model,
            api_key,
        }
    }
}

#[async_trait]
impl MoodClassifier for GroqClassifier {
    async fn classify(&self, text: &str) -> Result<MoodLabel, ServiceError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_instruction(text),
                },
            ],
            temperature: TEMPERATURE,
        };
        debug!("Classifying mood via {}", self.url);

        let req = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload);
        let label = parse_label(send_json(req).await?)?;
        info!("Detected mood: {label}");
        Ok(label)
    }
}
