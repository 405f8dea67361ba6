//! End-to-end: config file → wiring → HTTP source → shared cache.

use std::io::Write;

use mockito::Matcher;
use tempfile::NamedTempFile;
use yamohub_lib::bootstrap::{load_config, wire_feed_runtime};
use yh_app::{LoadOutcome, ScrollState, SkipReason};
use yh_core::{CollectionKey, OwnerId};

fn posts_body(ids: std::ops::Range<u32>, current: u32, total: u32) -> String {
    let items: Vec<String> = ids
        .map(|id| format!(r#"{{"id":"p-{id}","title":"Post {id}","price":{id}.5}}"#))
        .collect();
    format!(
        r#"{{"items":[{}],"meta":{{"currentPage":{current},"totalPages":{total},"totalItems":6,"itemsPerPage":3}}}}"#,
        items.join(",")
    )
}

fn write_config(base_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[api]
base_url = "{base_url}"
timeout_secs = 5

[pagination]
page_limit = 3
max_limit = 20

[endpoints]
user = "/v2/members/{{owner}}/listings"
"#
    )
    .unwrap();
    file
}

#[tokio::test]
async fn configured_runtime_pages_through_owner_collection() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/v2/members/42/listings")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "3".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(posts_body(0..3, 1, 2))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/v2/members/42/listings")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "3".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(posts_body(3..6, 2, 2))
        .expect(1)
        .create_async()
        .await;

    let config_file = write_config(&server.url());
    let config = load_config(config_file.path()).unwrap();
    let runtime = wire_feed_runtime(&config).unwrap();
    assert_eq!(runtime.settings.page_limit, 3);
    assert_eq!(runtime.settings.max_limit, 20);

    let key = CollectionKey::owned("user", OwnerId::from("42"));
    let controller = runtime.controller(key.clone());

    assert!(controller.mount().await.is_loaded());
    assert!(controller.retry().await.is_loaded());
    assert_eq!(
        controller.retry().await,
        LoadOutcome::Skipped(SkipReason::Exhausted)
    );

    let window = runtime.cache.get(&key);
    assert_eq!(window.len(), 6);
    assert_eq!(window.items[5].title, "Post 5");
    assert_eq!(controller.state(), ScrollState::Exhausted);

    // A second view of the same collection reuses the cached pages.
    let again = runtime.controller(key);
    assert_eq!(
        again.mount().await,
        LoadOutcome::Skipped(SkipReason::CacheHit)
    );

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn server_error_surfaces_as_idle_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/posts")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let config_file = write_config(&server.url());
    let runtime = wire_feed_runtime(&load_config(config_file.path()).unwrap()).unwrap();
    let controller = runtime.controller(CollectionKey::singleton("home"));

    assert!(matches!(controller.mount().await, LoadOutcome::Failed(_)));
    match controller.state() {
        ScrollState::Idle { error: Some(message) } => assert!(message.contains("503")),
        other => panic!("unexpected state: {other:?}"),
    }
    assert!(!runtime.cache.get(&CollectionKey::singleton("home")).initialized);

    mock.assert_async().await;
}
