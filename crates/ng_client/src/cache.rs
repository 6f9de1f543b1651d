use async_trait::async_trait;
use ng_core::{ArticleFetcher, Feed, Result, ResultSet};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::config::DEFAULT_CACHE_TTL;

struct Entry<V> {
    stored_at: Instant,
    value: V,
}

/// Query results keyed by string, each considered fresh for `ttl` after it
/// was stored.
pub struct QueryCache<V> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
}

impl<V: Clone + Send + Sync> QueryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored value unless it has gone stale.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            Entry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Drops every stale entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V: Clone + Send + Sync> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Serves fresh results from a [`QueryCache`] and asks `inner` otherwise.
/// Failed fetches are not cached. Stale entries are dropped on every miss,
/// so the cache never holds more than the keys fetched within one TTL.
pub struct CachedFetcher<F> {
    inner: F,
    cache: QueryCache<ResultSet>,
}

impl<F: ArticleFetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: QueryCache<ResultSet>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &QueryCache<ResultSet> {
        &self.cache
    }

    fn key(feed: &Feed, page: u32) -> String {
        format!("{}:{}", feed.cache_key(), page)
    }
}

#[async_trait]
impl<F: ArticleFetcher> ArticleFetcher for CachedFetcher<F> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_articles(&self, feed: &Feed, page: u32) -> Result<ResultSet> {
        let key = Self::key(feed, page);
        if let Some(result) = self.cache.get(&key).await {
            debug!("Cache hit for {}", key);
            return Ok(result);
        }

        let purged = self.cache.purge_expired().await;
        if purged > 0 {
            debug!("Dropped {} stale cache entries", purged);
        }

        let result = self.inner.fetch_articles(feed, page).await?;
        self.cache.insert(key, result.clone()).await;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ng_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl ArticleFetcher for CountingFetcher {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch_articles(&self, _feed: &Feed, page: u32) -> Result<ResultSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::RateLimited("try later".to_string()));
            }
            Ok(ResultSet::new(page as u64, vec![]))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.insert("top", 1u32).await;
        assert_eq!(cache.get("top").await, Some(1));

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get("top").await, Some(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("top").await, None);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = QueryCache::default();
        cache.insert("a", "x".to_string()).await;
        cache.insert("b", "y".to_string()).await;
        assert!(cache.invalidate("a").await);
        assert!(!cache.invalidate("a").await);
        assert_eq!(cache.get("b").await.as_deref(), Some("y"));
        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_fetcher_reuses_fresh_results() {
        let fetcher = CachedFetcher::new(
            CountingFetcher::new(false),
            QueryCache::new(Duration::from_secs(60)),
        );
        let feed = Feed::topic("bitcoin");

        fetcher.fetch_articles(&feed, 0).await.unwrap();
        fetcher.fetch_articles(&feed, 0).await.unwrap();
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 1);

        // different page, different key
        let result = fetcher.fetch_articles(&feed, 1).await.unwrap();
        assert_eq!(result.total_results, 1);
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(61)).await;
        fetcher.fetch_articles(&feed, 0).await.unwrap();
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entries_do_not_accumulate() {
        let fetcher = CachedFetcher::new(
            CountingFetcher::new(false),
            QueryCache::new(Duration::from_secs(60)),
        );

        for i in 0..1000 {
            let feed = Feed::topic(format!("t{}", i));
            fetcher.fetch_articles(&feed, 0).await.unwrap();
            tokio::time::advance(Duration::from_secs(61)).await;
        }
        assert_eq!(fetcher.cache().len().await, 1);

        // fresh entries survive a miss on another key
        fetcher.fetch_articles(&Feed::topic("a"), 0).await.unwrap();
        fetcher.fetch_articles(&Feed::topic("b"), 0).await.unwrap();
        assert_eq!(fetcher.cache().len().await, 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let fetcher = CachedFetcher::new(CountingFetcher::new(true), QueryCache::default());
        let feed = Feed::default();

        assert!(fetcher.fetch_articles(&feed, 0).await.is_err());
        assert!(fetcher.fetch_articles(&feed, 0).await.is_err());
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 2);
        assert!(fetcher.cache().is_empty().await);
    }
}
