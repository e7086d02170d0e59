//! Session cache implementations.
//!
//! [`MemoryCache`] is the regular, process-local session storage. It's
//! cheap to clone and every clone observes the same entries, which lets
//! a host tear down and rebuild the conversation engine while keeping
//! the session alive.
//!
//! [`UnavailableCache`] refuses every access. It stands in for a storage
//! that is disabled or inaccessible.

#[macro_use]
extern crate tracing;

mod memory;

use pinboard_model::{CacheError, SessionCache};

pub use memory::MemoryCache;

/// A session cache whose every access fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableCache;

impl SessionCache for UnavailableCache {
    #[inline]
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        trace!("refusing to read {key}");
        Err(CacheError::unavailable().with_reason("storage is disabled"))
    }

    #[inline]
    fn set(&self, key: &str, _value: &str) -> Result<(), CacheError> {
        trace!("refusing to write {key}");
        Err(CacheError::unavailable().with_reason("storage is disabled"))
    }
}
