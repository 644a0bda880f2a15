//! In-memory cache module for the TaskDesk application
//!
//! This module provides a process-local key-value cache with optional
//! per-entry TTL. It backs the session store, so every entry is lost when
//! the process restarts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration for the in-memory cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied by [`MemoryCache::set_default`]
    pub default_ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Some(Duration::from_secs(24 * 60 * 60)),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Shared in-memory cache
#[derive(Debug, Clone)]
pub struct MemoryCache<V> {
    config: CacheConfig,
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
}

impl<V: Clone + Send + Sync> MemoryCache<V> {
    /// Create a new, empty cache
    pub fn new(config: CacheConfig) -> Self {
        info!(
            "In-memory cache initialized with default TTL: {:?}",
            config.default_ttl
        );
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set a key-value pair with optional TTL
    pub async fn set(&self, key: &str, value: V, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
    }

    /// Set a key-value pair using the configured default TTL
    pub async fn set_default(&self, key: &str, value: V) {
        self.set(key, value, self.config.default_ttl).await;
    }

    /// Get a value by key, evicting it if it has expired
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            debug!("Evicting expired cache entry");
            entries.remove(key);
        }
        None
    }

    /// Delete a key, returning whether a live entry was removed
    pub async fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    /// Remove every expired entry, returning how many were evicted
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired(now)).count()
    }

    /// Whether the cache holds no live entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
