//! HTTP list source tests against a local mock server.

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use yh_core::ports::{ListSourceError, RemoteListSourcePort};
use yh_core::{CollectionKey, Post};
use yh_infra::{EndpointConfig, HttpListSource};

fn source(base_url: &str) -> HttpListSource<Post> {
    HttpListSource::new(base_url, EndpointConfig::defaults(), Duration::from_secs(5))
        .expect("http client")
}

fn posts(range: std::ops::Range<u32>) -> serde_json::Value {
    json!(range
        .map(|i| json!({ "id": format!("p-{i}"), "title": format!("Post {i}") }))
        .collect::<Vec<_>>())
}

#[tokio::test]
async fn fetches_page_with_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "items": posts(10..20),
                "meta": { "currentPage": 2, "totalPages": 3, "totalItems": 25, "itemsPerPage": 10 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = source(&server.url())
        .fetch_page(&CollectionKey::singleton("home"), 2, 10)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.items[0].id.as_str(), "p-10");
    assert!(page.has_more());
}

#[tokio::test]
async fn owner_scoped_key_hits_owner_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/users/42/posts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "items": [], "meta": { "currentPage": 1, "totalPages": 1 } }).to_string())
        .create_async()
        .await;

    let page = source(&server.url())
        .fetch_page(&CollectionKey::owned("user", "42"), 1, 10)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(page.items.is_empty());
    assert!(!page.has_more());
    assert!(!page.is_malformed());
}

#[tokio::test]
async fn missing_meta_is_decoded_as_last_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/videos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "items": posts(0..3) }).to_string())
        .create_async()
        .await;

    let page = source(&server.url())
        .fetch_page(&CollectionKey::singleton("videos"), 1, 10)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert!(page.is_malformed());
    assert!(!page.has_more());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/posts")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let err = source(&server.url())
        .fetch_page(&CollectionKey::singleton("home"), 1, 10)
        .await
        .unwrap_err();

    match err {
        ListSourceError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/posts"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/posts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = source(&server.url())
        .fetch_page(&CollectionKey::singleton("home"), 1, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, ListSourceError::Decode(_)));
}
#[tokio::test]
async fn owner_id_cannot_escape_its_path_segment() {
    let mut server = mockito::Server::new_async().await;
    let escaped = server
        .mock("GET", "/api/users/7/comments/x/posts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "items": [] }).to_string())
        .expect(0)
        .create_async()
        .await;
    let encoded = server
        .mock("GET", "/api/users/7%2Fcomments%2Fx/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(json!({ "items": posts(0..1), "meta": { "currentPage": 1, "totalPages": 1 } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let page = source(&server.url())
        .fetch_page(&CollectionKey::owned("user", "7/comments/x"), 1, 10)
        .await
        .unwrap();

    encoded.assert_async().await;
    escaped.assert_async().await;
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let err = source("http://127.0.0.1:1")
        .fetch_page(&CollectionKey::singleton("home"), 1, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, ListSourceError::Network(_)));
}

#[tokio::test]
async fn unknown_collection_never_issues_a_request() {
    let err = source("http://127.0.0.1:1")
        .fetch_page(&CollectionKey::singleton("favorites"), 1, 10)
        .await
        .unwrap_err();

    assert_eq!(err, ListSourceError::UnknownCollection("favorites".into()));
}
