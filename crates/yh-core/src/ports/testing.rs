//! Scripted list source for tests of code built on [`RemoteListSourcePort`].
//!
//! Enabled for dependants through the `test-support` feature.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use super::{ListSourceError, RemoteListSourcePort};
use crate::collection::{CollectionKey, PageMeta, PageResponse};

/// A page of `items` claiming to be page `current` of `total`.
pub fn page<T>(items: impl IntoIterator<Item = T>, current: u32, total: u32) -> PageResponse<T> {
    PageResponse::new(items.into_iter().collect(), Some(PageMeta::new(current, total)))
}

/// Answers requests from a queue of scripted results.
///
/// A gated source parks every request until [`ScriptedSource::release`]
/// hands out a permit, which keeps a load in flight for as long as a test
/// needs. An empty script answers with a network error.
pub struct ScriptedSource<T> {
    responses: Mutex<VecDeque<Result<PageResponse<T>, ListSourceError>>>,
    calls: Mutex<Vec<(CollectionKey, u32, u32)>>,
    gate: Option<Semaphore>,
    started: Notify,
}

impl<T> ScriptedSource<T> {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            gate: None,
            started: Notify::new(),
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn push(&self, response: Result<PageResponse<T>, ListSourceError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Let `permits` parked or future requests through a gated source.
    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    /// Resolves once a request reached the source.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(key, page, limit)` of every request, in arrival order.
    pub fn calls(&self) -> Vec<(CollectionKey, u32, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(_, page, _)| *page).collect()
    }
}

impl<T> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RemoteListSourcePort<T> for ScriptedSource<T>
where
    T: Send + 'static,
{
    async fn fetch_page(
        &self,
        key: &CollectionKey,
        page: u32,
        limit: u32,
    ) -> Result<PageResponse<T>, ListSourceError> {
        self.calls.lock().unwrap().push((key.clone(), page, limit));
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ListSourceError::Network("script exhausted".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_in_script_order_then_fails() {
        let source = ScriptedSource::new();
        source.push(Ok(page(0..2u32, 1, 2)));
        let key = CollectionKey::singleton("home");

        let first = source.fetch_page(&key, 1, 2).await.unwrap();
        assert_eq!(first.items, vec![0, 1]);
        assert!(matches!(
            source.fetch_page(&key, 2, 2).await,
            Err(ListSourceError::Network(_))
        ));
        assert_eq!(source.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn gated_source_holds_requests_until_released() {
        let source = std::sync::Arc::new(ScriptedSource::gated());
        source.push(Ok(page(0..1u32, 1, 1)));

        let pending = {
            let source = source.clone();
            tokio::spawn(async move {
                source
                    .fetch_page(&CollectionKey::singleton("home"), 1, 1)
                    .await
            })
        };
        source.wait_started().await;
        assert!(!pending.is_finished());

        source.release(1);
        assert!(pending.await.unwrap().is_ok());
    }
}
