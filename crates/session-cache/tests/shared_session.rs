use pinboard_model::{CacheErrorKind, SessionCache, TRANSCRIPT_CACHE_KEY};
use pinboard_session_cache::{MemoryCache, UnavailableCache};
use serde_json::json;

#[test]
fn test_clones_share_entries() {
    let cache = MemoryCache::new();
    let other = cache.clone();
    assert!(cache.is_empty());

    let payload = json!([{ "id": "welcome" }]).to_string();
    cache.set(TRANSCRIPT_CACHE_KEY, &payload).unwrap();
    assert_eq!(
        other.get(TRANSCRIPT_CACHE_KEY).unwrap().as_deref(),
        Some(payload.as_str())
    );

    other.clear();
    assert_eq!(cache.get(TRANSCRIPT_CACHE_KEY).unwrap(), None);
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_unavailable_cache_always_fails() {
    let cache = UnavailableCache;
    let err = cache.get(TRANSCRIPT_CACHE_KEY).unwrap_err();
    assert_eq!(err.kind(), CacheErrorKind::Unavailable);
    assert!(cache.set(TRANSCRIPT_CACHE_KEY, "[]").is_err());
}

#[test]
fn test_usable_as_trait_object() {
    let cache: std::sync::Arc<dyn SessionCache> =
        std::sync::Arc::new(MemoryCache::new());
    cache.set("has-shown-babysitter", "true").unwrap();
    assert_eq!(
        cache.get("has-shown-babysitter").unwrap().as_deref(),
        Some("true")
    );
}
