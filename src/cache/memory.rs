//! In-memory cache backend for tests and local development.

use super::{CacheEntryOptions, DistributedCache};
use crate::error::Result;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Entry {
    bytes: Vec<u8>,
    expires_at: Option<DateTime<Utc>>,
    /// Upper bound no sliding renewal may exceed.
    absolute_cap: Option<DateTime<Utc>>,
    sliding: Option<ChronoDuration>,
}

/// Process-local [`DistributedCache`] honoring absolute and sliding
/// expiration.
///
/// Expired entries are dropped lazily on access. Cloning the cache clones
/// a handle to the same store.
///
/// # Example
///
/// ```
/// use convert_kit::cache::{CacheEntryOptions, DistributedCache, InMemoryCache};
///
/// # async fn example() -> convert_kit::Result<()> {
/// let cache = InMemoryCache::new();
/// cache.set("key", b"value".to_vec(), CacheEntryOptions::default()).await?;
/// assert!(cache.get("key").await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<DashMap<String, Entry>>,
}

impl InMemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        InMemoryCache {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored entries, including any not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fixed instant past which the entry is gone regardless of reads.
    fn absolute_cap(options: &CacheEntryOptions, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let relative = options
            .absolute_expiration_relative
            .and_then(|d| ChronoDuration::from_std(d).ok())
            .map(|d| now + d);
        [options.absolute_expiration, relative]
            .into_iter()
            .flatten()
            .min()
    }
}

impl DistributedCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now();
        let Some(mut entry) = self.entries.get_mut(key) else {
            return Ok(None);
        };
        if let Some(expires_at) = entry.expires_at {
            if expires_at <= now {
                drop(entry);
                self.entries.remove(key);
                debug!("✗ in-memory GET {} -> expired", key);
                return Ok(None);
            }
        }
        // A read renews the sliding window, never past the absolute cap.
        if let Some(window) = entry.sliding {
            let renewed = now + window;
            entry.expires_at = Some(match entry.absolute_cap {
                Some(cap) => cap.min(renewed),
                None => renewed,
            });
        }
        Ok(Some(entry.bytes.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, options: CacheEntryOptions) -> Result<()> {
        let now = Utc::now();
        let absolute_cap = Self::absolute_cap(&options, now);
        let sliding = options
            .sliding_expiration
            .and_then(|d| ChronoDuration::from_std(d).ok());
        let expires_at = match (absolute_cap, sliding.map(|d| now + d)) {
            (Some(cap), Some(slide)) => Some(cap.min(slide)),
            (cap, slide) => cap.or(slide),
        };
        self.entries.insert(
            key.to_string(),
            Entry {
                bytes: value,
                expires_at,
                absolute_cap,
                sliding,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
