use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::services::{search::compose_query, TrackSearch};
use crate::track::RawTrack;

const SEARCH_KEY_PREFIX: &str = "moodwave:search:";
pub const SEARCH_TTL_SECS: u64 = 3600;

/// String key/value storage with expiry. Outages read as misses and writes
/// are best-effort.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn load(&self, key: &str) -> Option<String>;
    async fn store(&self, key: &str, value: &str, ttl_secs: u64);
}

pub struct Cache {
    client: redis::Client,
}

impl Cache {
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Cache { client })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let val: Option<String> = conn.get(key).await.unwrap_or(None);
                Ok(val)
            }
            Err(_) => Ok(None),
        }
    }

    pub async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let _: std::result::Result<(), _> = conn.set_ex(key, value, ttl_secs).await;
        }
        Ok(())
    }

    pub async fn ping(&self) -> bool {
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let result: std::result::Result<String, _> =
                    redis::cmd("PING").query_async(&mut conn).await;
                result.is_ok()
            }
            Err(_) => false,
        }
    }
}

#[async_trait]
impl CacheStore for Cache {
    async fn load(&self, key: &str) -> Option<String> {
        self.get(key).await.ok().flatten()
    }

    async fn store(&self, key: &str, value: &str, ttl_secs: u64) {
        self.set(key, value, ttl_secs).await.ok();
    }
}

pub fn search_key(query: &str) -> String {
    format!("{SEARCH_KEY_PREFIX}{}", query.to_lowercase())
}

/// Serves repeated searches from the cache. Empty results are never stored so
/// a transient upstream outage isn't remembered for an hour.
pub struct CachedSearch {
    inner: Arc<dyn TrackSearch>,
    cache: Arc<dyn CacheStore>,
}

impl CachedSearch {
    pub fn new(inner: Arc<dyn TrackSearch>, cache: Arc<dyn CacheStore>) -> Self {
        CachedSearch { inner, cache }
    }
}

#[async_trait]
impl TrackSearch for CachedSearch {
    async fn search(&self, query: &str, extra: Option<&str>) -> Vec<RawTrack> {
        let key = search_key(&compose_query(query, extra));

        if let Some(cached) = self.cache.load(&key).await {
            match serde_json::from_str::<Vec<RawTrack>>(&cached) {
                Ok(results) => {
                    debug!("Search cache hit for {key}");
                    return results;
                }
                Err(e) => warn!("Ignoring unreadable cache entry {key}: {e}"),
            }
        }

        let results = self.inner.search(query, extra).await;
        if !results.is_empty() {
            if let Ok(json) = serde_json::to_string(&results) {
                self.cache.store(&key, &json, SEARCH_TTL_SECS).await;
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingSearch {
        calls: AtomicUsize,
        results: Vec<RawTrack>,
    }

    impl CountingSearch {
        fn returning(results: Vec<RawTrack>) -> Arc<Self> {
            Arc::new(CountingSearch { calls: AtomicUsize::new(0), results })
        }
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TrackSearch for CountingSearch {
        async fn search(&self, _query: &str, _extra: Option<&str>) -> Vec<RawTrack> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results.clone()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, u64)>>,
    }

    impl MemoryStore {
        fn with_entry(key: &str, value: &str) -> Arc<Self> {
            let store = MemoryStore::default();
            store.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            Arc::new(store)
        }
        fn writes(&self) -> Vec<(String, u64)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CacheStore for MemoryStore {
        async fn load(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        async fn store(&self, key: &str, value: &str, ttl_secs: u64) {
            self.writes.lock().unwrap().push((key.to_string(), ttl_secs));
            self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn test_search_key_is_case_insensitive() {
        assert_eq!(search_key("Happy Arijit"), "moodwave:search:happy arijit");
    }

    #[tokio::test]
    async fn test_repeat_query_is_served_from_cache() {
        let store = Arc::new(MemoryStore::default());
        let inner = CountingSearch::returning(vec![json!({ "name": "Kesariya" })]);
        let search = CachedSearch::new(inner.clone(), store.clone());

        let first = search.search("Romantic", Some("Arijit")).await;
        let second = search.search("romantic", Some("arijit")).await;

        assert_eq!(first, second);
        assert_eq!(second[0]["name"], "Kesariya");
        assert_eq!(inner.calls(), 1);
        assert_eq!(
            store.writes(),
            vec![("moodwave:search:romantic arijit".to_string(), SEARCH_TTL_SECS)]
        );
    }

    #[tokio::test]
    async fn test_cached_entry_skips_inner_search() {
        let store = MemoryStore::with_entry("moodwave:search:happy", r#"[{"name":"Happy"}]"#);
        let inner = CountingSearch::returning(vec![json!({ "name": "Live" })]);
        let search = CachedSearch::new(inner.clone(), store.clone());

        let results = search.search("happy", None).await;

        assert_eq!(results, vec![json!({ "name": "Happy" })]);
        assert_eq!(inner.calls(), 0);
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_empty_results_are_not_stored() {
        let store = Arc::new(MemoryStore::default());
        let inner = CountingSearch::returning(vec![]);
        let search = CachedSearch::new(inner.clone(), store.clone());

        assert!(search.search("patriotic", None).await.is_empty());
        assert!(search.search("patriotic", None).await.is_empty());

        assert!(store.writes().is_empty());
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_entry_falls_through_and_is_replaced() {
        let store = MemoryStore::with_entry("moodwave:search:chill", "{not json");
        let inner = CountingSearch::returning(vec![json!({ "name": "Weightless" })]);
        let search = CachedSearch::new(inner.clone(), store.clone());

        let results = search.search("chill", None).await;

        assert_eq!(results[0]["name"], "Weightless");
        assert_eq!(inner.calls(), 1);
        assert_eq!(store.writes().len(), 1);
        assert_eq!(search.search("chill", None).await, results);
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_redis_passes_through() {
        // Nothing listens on port 1, so every cache call degrades to a miss.
        let cache = Arc::new(Cache::new("redis://127.0.0.1:1").unwrap());
        assert!(!cache.ping().await);

        let inner = CountingSearch::returning(vec![json!({ "name": "happy" })]);
        let search = CachedSearch::new(inner.clone(), cache);
        let first = search.search("happy", None).await;
        let second = search.search("happy", None).await;

        assert_eq!(first, second);
        assert_eq!(first[0]["name"], "happy");
        assert_eq!(inner.calls(), 2);
    }
}
