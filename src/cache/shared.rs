//! Shared Cache Handle
//!
//! Thread-safe wrapper around [`CacheStore`] used by request handlers and the
//! background cleanup task.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;

// == Bounded Cache ==
/// Cloneable handle to a bounded, TTL-limited LRU cache.
///
/// Every structural change (get, set, delete, clear, purge) happens under the
/// write lock, so the expiry check and removal in `get` form a single
/// critical section. Read-only inspection uses the read lock.
#[derive(Debug)]
pub struct BoundedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for BoundedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> BoundedCache<V> {
    /// Creates a cache holding at most `capacity` entries, each living `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        let store = CacheStore::new(capacity, ttl)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(store)),
        })
    }

    /// Returns the value for `key` if present and not expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    /// Inserts or overwrites `key`, evicting the LRU entry when full.
    pub async fn set(&self, key: impl Into<String>, value: V) -> Result<()> {
        self.inner.write().await.set(key, value)
    }

    /// Removes `key` if present. Returns whether an entry was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.purge_expired()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    /// Weak reference to the underlying store, for tasks that must not keep
    /// the cache alive.
    pub(crate) fn downgrade(&self) -> Weak<RwLock<CacheStore<V>>> {
        Arc::downgrade(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = BoundedCache::new(10, Duration::from_secs(60)).unwrap();
        let other = cache.clone();

        cache.set("item:name:pikachu", 25u32).await.unwrap();

        assert_eq!(other.get("item:name:pikachu").await, Some(25));
        assert!(other.delete("item:name:pikachu").await);
        assert_eq!(cache.get("item:name:pikachu").await, None);
    }

    #[tokio::test]
    async fn test_concurrent_writers_respect_capacity() {
        let cache = BoundedCache::new(16, Duration::from_secs(60)).unwrap();

        let mut handles = Vec::new();
        for task in 0..8u32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    cache.set(format!("k{task}:{i}"), i).await.unwrap();
                    let _ = cache.get(&format!("k{task}:{}", i / 2)).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 16);
        let stats = cache.stats().await;
        assert_eq!(stats.evictions, 8 * 50 - 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_reported_absent() {
        let cache = BoundedCache::new(10, Duration::from_secs(10)).unwrap();
        cache.set("list:20:0", "page").await.unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;

        assert!(!cache.contains_key("list:20:0").await);
        assert_eq!(cache.get("list:20:0").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_then_get() {
        let cache = BoundedCache::new(10, Duration::from_secs(60)).unwrap();
        cache.set("a", 1).await.unwrap();
        cache.set("b", 2).await.unwrap();

        cache.clear().await;
        cache.clear().await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.len().await, 0);
    }
}
