use async_trait::async_trait;

use crate::collection::{CollectionKey, PageResponse};
use crate::ports::errors::ListSourceError;

/// Remote source of paginated collections.
///
/// `page` is 1-based. Implementations perform exactly one request per call
/// and never retry; retrying is the caller's decision.
#[async_trait]
pub trait RemoteListSourcePort<T>: Send + Sync {
    async fn fetch_page(
        &self,
        key: &CollectionKey,
        page: u32,
        limit: u32,
    ) -> Result<PageResponse<T>, ListSourceError>;
}

#[cfg(test)]
mockall::mock! {
    pub ListSource {}

    #[async_trait]
    impl RemoteListSourcePort<u32> for ListSource {
        async fn fetch_page(
            &self,
            key: &CollectionKey,
            page: u32,
            limit: u32,
        ) -> Result<PageResponse<u32>, ListSourceError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::PageMeta;
    use std::sync::Arc;

    #[tokio::test]
    async fn port_is_usable_as_shared_trait_object() {
        let mut mock = MockListSource::new();
        mock.expect_fetch_page()
            .withf(|key, page, limit| key.to_string() == "home" && *page == 1 && *limit == 10)
            .times(1)
            .returning(|_, _, _| Ok(PageResponse::new(vec![7], Some(PageMeta::new(1, 1)))));

        let source: Arc<dyn RemoteListSourcePort<u32>> = Arc::new(mock);
        let page = source
            .fetch_page(&CollectionKey::singleton("home"), 1, 10)
            .await
            .unwrap();
        assert_eq!(page.items, vec![7]);
    }

    #[tokio::test]
    async fn errors_surface_unchanged() {
        let mut mock = MockListSource::new();
        mock.expect_fetch_page().returning(|_, _, _| {
            Err(ListSourceError::Status {
                status: 503,
                url: "http://feed/api/posts".to_string(),
            })
        });

        let err = mock
            .fetch_page(&CollectionKey::singleton("home"), 1, 10)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "request to http://feed/api/posts failed with status 503"
        );
    }
}
