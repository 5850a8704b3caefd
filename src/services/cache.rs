// src/services/cache.rs
// DOCUMENTATION: In-memory cache for news lookup responses
// PURPOSE: Avoid hitting the news provider again for a location it just answered

use crate::models::Article;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Articles per location with TTL
/// DOCUMENTATION: Keyed by the exact geo string the client sent
pub struct ArticleCache {
    store: RwLock<HashMap<String, CacheEntry<Vec<Article>>>>,
    default_ttl: Duration,
}

impl ArticleCache {
    /// Create new cache with default TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            default_ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Get cached articles for a location
    pub async fn get(&self, geo: &str) -> Option<Vec<Article>> {
        let store = self.store.read().await;

        match store.get(geo) {
            Some(entry) if !entry.is_expired() => {
                log::debug!("Cache HIT for geo: {}", geo);
                Some(entry.data.clone())
            }
            Some(_) => {
                log::debug!("Cache EXPIRED for geo: {}", geo);
                None
            }
            None => {
                log::debug!("Cache MISS for geo: {}", geo);
                None
            }
        }
    }

    /// Set cached articles with default TTL
    pub async fn set(&self, geo: String, articles: Vec<Article>) {
        self.set_with_ttl(geo, articles, self.default_ttl).await;
    }

    /// Set cached articles with custom TTL
    pub async fn set_with_ttl(&self, geo: String, articles: Vec<Article>, ttl: Duration) {
        log::debug!("Cache SET for geo: {} (TTL: {}s)", geo, ttl.as_secs());
        let mut store = self.store.write().await;
        store.insert(geo, CacheEntry::new(articles, ttl));
    }

    /// Clear expired entries
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Cache cleanup: removed {} expired entries ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let total = store.len();
        let expired = store.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
        }
    }
}

/// Cache statistics
#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries
pub fn start_cleanup_task(cache: Arc<ArticleCache>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));

        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });
}
