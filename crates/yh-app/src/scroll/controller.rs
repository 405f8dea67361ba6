//! Infinite scroll controller
//!
//! Decides when a list asks the cache for its next page. The rendering layer
//! attaches a sentinel to the last rendered item; when that sentinel scrolls
//! into view the controller calls `load_more`. Exactly one observation is
//! active per controller at any time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info_span, Instrument};
use yh_core::ports::{Visibility, VisibilityError, VisibilityObserverPort};
use yh_core::{CollectionKey, SentinelId};

use crate::cache::{LoadOutcome, PaginatedCollectionCache};
use crate::models::CollectionView;

#[derive(Debug, thiserror::Error)]
pub enum ScrollError {
    #[error("failed to observe sentinel: {0}")]
    Observe(#[from] VisibilityError),

    #[error("no async runtime available to watch the sentinel")]
    NoRuntime,
}

/// Load state of the controlled collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollState {
    /// More pages exist; `error` holds the last failure, if any.
    Idle { error: Option<String> },
    Loading,
    /// Last page reached. Terminal until the key is reset.
    Exhausted,
}

/// Capability the rendering layer binds to the last rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelHandle {
    id: SentinelId,
    rendered_len: usize,
}

impl SentinelHandle {
    /// Id the rendering layer reports visibility under.
    pub fn id(&self) -> &SentinelId {
        &self.id
    }

    /// Length of the rendered list when the sentinel was attached.
    pub fn rendered_len(&self) -> usize {
        self.rendered_len
    }
}

struct ActiveSentinel {
    id: SentinelId,
    task: AbortHandle,
}

pub struct InfiniteScrollController<T> {
    cache: Arc<PaginatedCollectionCache<T>>,
    observer: Arc<dyn VisibilityObserverPort>,
    key: Mutex<CollectionKey>,
    limit: u32,
    active: Mutex<Option<ActiveSentinel>>,
}

impl<T> InfiniteScrollController<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(
        cache: Arc<PaginatedCollectionCache<T>>,
        observer: Arc<dyn VisibilityObserverPort>,
        key: CollectionKey,
        limit: u32,
    ) -> Self {
        Self {
            cache,
            observer,
            key: Mutex::new(key),
            limit,
            active: Mutex::new(None),
        }
    }

    pub fn key(&self) -> CollectionKey {
        lock(&self.key).clone()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Load the first page unless the cache already holds it.
    pub async fn mount(&self) -> LoadOutcome {
        let key = self.key();
        self.cache.ensure_loaded(&key, self.limit).await
    }

    /// Explicit user retry after a failure.
    pub async fn retry(&self) -> LoadOutcome {
        let key = self.key();
        self.cache.load_more(&key, self.limit).await
    }

    /// Pull-to-refresh: page 1 replaces the cached pages.
    pub async fn refresh(&self) -> LoadOutcome {
        let key = self.key();
        self.cache.refresh(&key, self.limit).await
    }

    pub fn view(&self) -> CollectionView<T> {
        self.cache.view(&self.key())
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionView<T>> {
        self.cache.subscribe(&self.key())
    }

    pub fn state(&self) -> ScrollState {
        let key = self.key();
        if self.cache.is_loading(&key) {
            return ScrollState::Loading;
        }
        let window = self.cache.get(&key);
        if window.is_exhausted() {
            ScrollState::Exhausted
        } else {
            ScrollState::Idle {
                error: window.error,
            }
        }
    }

    pub fn active_sentinel(&self) -> Option<SentinelId> {
        lock(&self.active).as_ref().map(|active| active.id.clone())
    }

    /// Start observing a sentinel placed after `rendered_len` items.
    ///
    /// The previous observation, if any, is torn down first.
    pub fn attach_sentinel(&self, rendered_len: usize) -> Result<SentinelHandle, ScrollError> {
        let runtime = Handle::try_current().map_err(|_| ScrollError::NoRuntime)?;
        let mut active = lock(&self.active);
        if let Some(previous) = active.take() {
            self.teardown(previous);
        }

        let id = SentinelId::new();
        let mut events = self.observer.observe(&id)?;
        let cache = Arc::clone(&self.cache);
        let key = self.key();
        let limit = self.limit;

        let span = info_span!("feed.sentinel", key = %key, sentinel = %id, rendered_len);
        let task = runtime.spawn(
            async move {
                let mut visible = false;
                while let Some(visibility) = events.recv().await {
                    match visibility {
                        Visibility::Visible if !visible => {
                            visible = true;
                            trigger_load(&cache, &key, limit);
                        }
                        Visibility::Visible => {}
                        Visibility::Hidden => visible = false,
                    }
                }
                debug!("sentinel observation closed");
            }
            .instrument(span),
        );

        debug!(key = %self.key(), sentinel = %id, rendered_len, "sentinel attached");
        *active = Some(ActiveSentinel {
            id: id.clone(),
            task: task.abort_handle(),
        });
        Ok(SentinelHandle { id, rendered_len })
    }

    /// Disconnect the active observation. Safe to call repeatedly.
    ///
    /// A page request already started keeps running and still lands in the
    /// shared cache.
    pub fn detach(&self) {
        if let Some(previous) = lock(&self.active).take() {
            self.teardown(previous);
        }
    }

    /// Switch to another key, e.g. when the owner filter changes.
    ///
    /// The previous key's window is reset.
    pub fn rebind(&self, key: CollectionKey) {
        self.detach();
        let previous = std::mem::replace(&mut *lock(&self.key), key);
        self.cache.reset(&previous);
        debug!(previous = %previous, key = %self.key(), "scroll controller rebound");
    }

    fn teardown(&self, active: ActiveSentinel) {
        self.observer.disconnect(&active.id);
        active.task.abort();
        debug!(sentinel = %active.id, "sentinel detached");
    }
}

impl<T> Drop for InfiniteScrollController<T> {
    fn drop(&mut self) {
        if let Some(active) = lock(&self.active).take() {
            self.observer.disconnect(&active.id);
            active.task.abort();
        }
    }
}

/// Request the next page unless the window is exhausted or already loading.
///
/// The request runs on its own task so tearing down the observation never
/// cancels it.
fn trigger_load<T>(cache: &Arc<PaginatedCollectionCache<T>>, key: &CollectionKey, limit: u32)
where
    T: Clone + Send + Sync + 'static,
{
    if cache.is_loading(key) || cache.get(key).is_exhausted() {
        debug!(key = %key, "sentinel visible, nothing to load");
        return;
    }
    let cache = Arc::clone(cache);
    let key = key.clone();
    tokio::spawn(async move {
        let outcome = cache.load_more(&key, limit).await;
        debug!(key = %key, ?outcome, "sentinel load finished");
    });
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
