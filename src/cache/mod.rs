//! JSON wrapper over a byte-oriented distributed cache abstraction.
//!
//! The storage semantics live entirely behind [`DistributedCache`]; this
//! module adds typed get/set on top of it, serializing values as UTF-8
//! JSON. An in-memory backend ships for tests and local development.

mod memory;

pub use memory::InMemoryCache;

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Expiration options for a cache entry.
///
/// All fields are optional; an entry with none set never expires. When
/// both absolute forms are set, the earlier instant wins.
///
/// # Example
///
/// ```
/// use convert_kit::cache::CacheEntryOptions;
/// use std::time::Duration;
///
/// let options = CacheEntryOptions::default()
///     .with_absolute_expiration_relative(Duration::from_secs(300))
///     .with_sliding_expiration(Duration::from_secs(60));
/// assert!(options.sliding_expiration.is_some());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheEntryOptions {
    /// Fixed instant at which the entry expires.
    pub absolute_expiration: Option<DateTime<Utc>>,
    /// Expiration relative to the time the entry is stored.
    pub absolute_expiration_relative: Option<Duration>,
    /// Window of inactivity after which the entry expires; renewed on
    /// every read.
    pub sliding_expiration: Option<Duration>,
}

impl CacheEntryOptions {
    /// Set a fixed expiration instant.
    pub fn with_absolute_expiration(mut self, at: DateTime<Utc>) -> Self {
        self.absolute_expiration = Some(at);
        self
    }

    /// Set an expiration relative to the store time.
    pub fn with_absolute_expiration_relative(mut self, after: Duration) -> Self {
        self.absolute_expiration_relative = Some(after);
        self
    }

    /// Set a sliding inactivity window.
    pub fn with_sliding_expiration(mut self, window: Duration) -> Self {
        self.sliding_expiration = Some(window);
        self
    }
}

/// A key-value distributed cache storing byte payloads.
///
/// This is the external seam: real deployments implement it over their
/// store of choice, and [`InMemoryCache`] stands in for tests.
pub trait DistributedCache: Send + Sync {
    /// Fetch the payload stored under `key`, if present and unexpired.
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Store `value` under `key` with the given expiration options,
    /// replacing any existing entry.
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        options: CacheEntryOptions,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Remove the entry under `key`. Removing a missing key is not an
    /// error.
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Typed JSON get/set over any [`DistributedCache`].
pub trait JsonCacheExt: DistributedCache {
    /// Fetch and decode the value stored under `key`.
    ///
    /// A missing key is `Ok(None)`; a present but undecodable payload is
    /// an error.
    fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<T>>> + Send;

    /// Encode `value` as JSON and store it under `key`.
    fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        options: CacheEntryOptions,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl<C: DistributedCache> JsonCacheExt for C {
    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)?;
                debug!("✓ cache GET {} -> {} bytes", key, bytes.len());
                Ok(Some(value))
            }
            None => {
                debug!("✗ cache GET {} -> miss", key);
                Ok(None)
            }
        }
    }

    async fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        options: CacheEntryOptions,
    ) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        debug!("cache SET {} ({} bytes)", key, bytes.len());
        self.set(key, bytes, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Employment {
        id: String,
        employer_name: String,
    }

    #[tokio::test]
    async fn json_set_get_round_trip() {
        let cache = InMemoryCache::new();
        let entity = Employment {
            id: "emp_12345".to_string(),
            employer_name: "Acme".to_string(),
        };

        cache
            .set_json("employment:emp_12345", &entity, CacheEntryOptions::default())
            .await
            .expect("set succeeds");

        let loaded: Option<Employment> = cache
            .get_json("employment:emp_12345")
            .await
            .expect("get succeeds");
        assert_eq!(loaded, Some(entity));
    }

    #[tokio::test]
    async fn missing_key_is_none_not_error() {
        let cache = InMemoryCache::new();
        let loaded: Option<Employment> = cache.get_json("nope").await.expect("get succeeds");
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn undecodable_payload_is_an_error() {
        let cache = InMemoryCache::new();
        cache
            .set("bad", b"not json".to_vec(), CacheEntryOptions::default())
            .await
            .expect("set succeeds");

        let result: Result<Option<Employment>> = cache.get_json("bad").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn payload_is_utf8_json() {
        let cache = InMemoryCache::new();
        let entity = Employment {
            id: "1".to_string(),
            employer_name: "Acme".to_string(),
        };
        cache
            .set_json("employment:1", &entity, CacheEntryOptions::default())
            .await
            .expect("set succeeds");

        let raw = cache
            .get("employment:1")
            .await
            .expect("get succeeds")
            .expect("present");
        let text = String::from_utf8(raw).expect("utf-8");
        assert!(text.contains("\"employer_name\":\"Acme\""));
    }
}
