use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{send_json, ServiceError, TrackSearch};
use crate::track::RawTrack;

/// Callers keep at most this many results per search.
pub const RESULT_LIMIT: usize = 10;

/// Joins the query with the optional narrowing term (e.g. an artist name).
pub fn compose_query(query: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|e| !e.is_empty()) {
        Some(extra) => format!("{} {extra}", query.trim()),
        None => query.trim().to_string(),
    }
}

/// Extracts `data.results` from a search response body.
pub fn extract_results(body: Value) -> Result<Vec<RawTrack>, ServiceError> {
    match body {
        Value::Object(mut root) => match root.remove("data") {
            Some(Value::Object(mut data)) => match data.remove("results") {
                Some(Value::Array(results)) => Ok(results),
                _ => Err(ServiceError::Malformed("missing data.results".to_string())),
            },
            _ => Err(ServiceError::Malformed("missing data".to_string())),
        },
        _ => Err(ServiceError::Malformed("body is not an object".to_string())),
    }
}

/// JioSaavn-style song search (`GET <url>?query=...`).
pub struct SaavnSearch {
    client: reqwest::Client,
    url: String,
}

impl SaavnSearch {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        SaavnSearch { client, url }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<RawTrack>, ServiceError> {
        let req = self.client.get(&self.url).query(&[("query", query)]);
        extract_results(send_json(req).await?)
    }
}

#[async_trait]
impl TrackSearch for SaavnSearch {
    async fn search(&self, query: &str, extra: Option<&str>) -> Vec<RawTrack> {
        let query = compose_query(query, extra);
        if query.is_empty() {
            return vec![];
        }
        match self.try_search(&query).await {
            Ok(results) => {
                debug!("Search {query:?} returned {} results", results.len());
                results
            }
            Err(e) => {
                warn!("Search {query:?} failed: {e}");
                vec![]
            }
        }
    }
}
