use std::time::Duration;

use pinboard::SessionBuilder;
use pinboard::model::{Role, SessionCache, TRANSCRIPT_CACHE_KEY};
use pinboard_session_cache::MemoryCache;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn test_cook_query_emphasizes_markers() {
    let mut session = SessionBuilder::new().build().unwrap();
    session.send_message("Looking for a cook");
    assert!(!session.sync_markers());

    sleep(Duration::from_millis(1001)).await;
    assert!(session.sync_markers());
    let ids: Vec<_> = session
        .board()
        .emphasized()
        .map(|marker| marker.id.as_str())
        .collect();
    assert_eq!(ids, ["ana-cook", "carlos-cook", "lucia-cook"]);

    let styled = session
        .board()
        .styled()
        .find(|styled| styled.marker.id == "maria-babysitter")
        .unwrap();
    assert!(!styled.emphasized);
}

#[tokio::test(start_paused = true)]
async fn test_reservation_return_and_reload() {
    let cache = MemoryCache::new();
    let mut session = SessionBuilder::new()
        .with_session_cache(cache.clone())
        .build()
        .unwrap();

    session.return_from("?from=service&reserved=true");
    sleep(Duration::from_millis(1501)).await;
    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].role, Role::Assistant);
    assert!(session.sync_markers());
    assert_eq!(session.board().emphasized().count(), 1);

    session.reload().await;
    assert_eq!(session.transcript().await, transcript);
    // A fresh engine starts without emphasis.
    assert_eq!(session.board().emphasized().count(), 0);

    // The offer was already shown in this session.
    session.return_from("from=service&reserved=true");
    sleep(Duration::from_secs(2)).await;
    assert_eq!(session.transcript().await.len(), 2);

    drop(session);
    assert!(cache.get(TRANSCRIPT_CACHE_KEY).unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_reload_keeps_message_sent_just_before() {
    let mut session = SessionBuilder::new().build().unwrap();
    session.send_message("hello");
    session.reload().await;

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].role, Role::User);
    assert_eq!(transcript[1].content, "hello");
    // The reply chain died with the old engine.
    assert!(!session.is_composing());
}

#[tokio::test(start_paused = true)]
async fn test_custom_welcome() {
    let session = SessionBuilder::new()
        .with_welcome_message("Hola!")
        .build()
        .unwrap();
    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].content, "Hola!");
}
