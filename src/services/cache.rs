use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-memory cache of serialized ranking results
///
/// Keys embed the snapshot revision, so a new population never serves a
/// stale ranking. Entries also expire after the configured TTL.
pub struct ResultCache {
    l1_cache: moka::future::Cache<String, Vec<u8>>,
}

impl ResultCache {
    /// Create a new cache holding up to `capacity` entries
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { l1_cache }
    }

    /// Get the serialized JSON stored under `key`
    pub async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        match self.l1_cache.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(bytes)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Serialize `value`, store it, and return the JSON bytes
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<Vec<u8>, CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.l1_cache.insert(key.to_string(), bytes.clone()).await;

        tracing::trace!("Cache set: {}", key);
        Ok(bytes)
    }

    /// Drop every entry, used when a new population is published
    pub fn invalidate_all(&self) {
        self.l1_cache.invalidate_all();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.l1_cache.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a trending list
    pub fn trending(revision: u64, limit: usize) -> String {
        format!("trending:{}:{}", revision, limit)
    }

    /// Build a cache key for the mentors of one skill
    pub fn mentors(revision: u64, skill: &str) -> String {
        format!("mentors:{}:{}", revision, skill)
    }
}
