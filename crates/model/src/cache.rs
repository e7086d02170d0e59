use crate::error::CacheError;

/// Cache key under which the serialized transcript is stored.
pub const TRANSCRIPT_CACHE_KEY: &str = "chat-messages";

/// Cache key under which the one-time special offer flag is stored.
pub const SPECIAL_OFFER_CACHE_KEY: &str = "has-shown-babysitter";

/// Key-value string storage scoped to one browsing session.
///
/// Implementations may fail at any time (storage disabled, quota, etc).
/// Callers are expected to degrade gracefully: a failed read is a cache
/// miss and a failed write is skipped.
///
/// The cache is shared between the engine and its host, so it must be
/// usable through a shared reference.
pub trait SessionCache: Send + Sync {
    /// Reads the value for `key`, returning `None` if it's absent.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrites the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

impl<C: SessionCache + ?Sized> SessionCache for std::sync::Arc<C> {
    #[inline]
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    #[inline]
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }
}
