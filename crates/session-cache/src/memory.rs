use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex};

use pinboard_model::{CacheError, SessionCache};

/// In-memory session storage.
///
/// Clones share the same entries. An optional quota caps the total size
/// in bytes of all keys and values, mirroring browser storage limits.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryCache {
    /// Creates an empty cache without a quota.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding at most `bytes` bytes.
    #[inline]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Default::default(),
            quota: Some(bytes),
        }
    }

    /// Removes every entry, as if the session had ended.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::unavailable().with_reason("poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::unavailable().with_reason("poisoned"))?;

        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                warn!("quota of {quota} bytes exceeded while writing {key}");
                return Err(CacheError::quota_exceeded());
            }
        }

        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("len", &self.len())
            .field("quota", &self.quota)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pinboard_model::CacheErrorKind;

    use super::*;

    #[test]
    fn test_quota() {
        let cache = MemoryCache::with_quota(16);
        cache.set("k", "0123456789").unwrap();
        // Overwriting the same key only counts the new value.
        cache.set("k", "abcdefghij").unwrap();

        let err = cache.set("other", "0123456789").unwrap_err();
        assert_eq!(err.kind(), CacheErrorKind::QuotaExceeded);
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("abcdefghij"));
        assert_eq!(cache.get("other").unwrap(), None);
    }
}
