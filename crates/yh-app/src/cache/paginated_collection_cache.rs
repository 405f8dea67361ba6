//! Paginated collection cache
//!
//! Single source of truth for "which pages of which list have been fetched".
//! Any number of renderers may share one instance; each key owns one
//! [`PageWindow`] and one in-flight flag.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info_span, warn, Instrument};
use yh_core::ports::{ListSourceError, RemoteListSourcePort};
use yh_core::{CollectionKey, LoadMode, PageResponse, PageWindow};

use super::outcome::{LoadOutcome, SkipReason};
use crate::models::CollectionView;

/// Largest page size accepted unless configured otherwise.
pub const DEFAULT_MAX_LIMIT: u32 = 100;

/// Which page a load asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadRequest {
    /// Page 1 on mount; served from cache once initialized.
    FirstPage,
    /// `last_loaded_page + 1`, appended.
    NextPage,
    /// Page 1 again, replacing every cached page.
    Refresh,
}

struct Slot<T> {
    window: PageWindow<T>,
    /// Set from the start of a request until it resolves, across resets.
    in_flight: bool,
    /// Bumped by reset so responses requested before it are dropped.
    generation: u64,
    publisher: watch::Sender<CollectionView<T>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        let (publisher, _) = watch::channel(CollectionView::default());
        Self {
            window: PageWindow::default(),
            in_flight: false,
            generation: 0,
            publisher,
        }
    }

    fn view(&self) -> CollectionView<T> {
        CollectionView::from_window(&self.window, self.in_flight)
    }

    fn publish(&self) {
        self.publisher.send_replace(self.view());
    }

    /// Nothing pending and nobody watching.
    fn is_evictable(&self) -> bool {
        !self.in_flight && self.publisher.receiver_count() == 0
    }
}

/// Shared cache of paginated collections.
///
/// Constructed explicitly and handed out as `Arc`; there is no global
/// instance. The slot map lock is never held across an await point, and the
/// in-flight flag is checked and set under it before the request starts.
pub struct PaginatedCollectionCache<T> {
    source: Arc<dyn RemoteListSourcePort<T>>,
    max_limit: u32,
    slots: Mutex<HashMap<CollectionKey, Slot<T>>>,
}

impl<T> PaginatedCollectionCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn RemoteListSourcePort<T>>) -> Self {
        Self::with_max_limit(source, DEFAULT_MAX_LIMIT)
    }

    pub fn with_max_limit(source: Arc<dyn RemoteListSourcePort<T>>, max_limit: u32) -> Self {
        Self {
            source,
            max_limit,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Current window for `key`, created empty on first access.
    pub fn get(&self, key: &CollectionKey) -> PageWindow<T> {
        let mut slots = self.lock();
        Self::slot(&mut slots, key).window.clone()
    }

    /// Current rendering-layer view for `key`.
    pub fn view(&self, key: &CollectionKey) -> CollectionView<T> {
        let mut slots = self.lock();
        Self::slot(&mut slots, key).view()
    }

    pub fn is_loading(&self, key: &CollectionKey) -> bool {
        self.lock().get(key).is_some_and(|slot| slot.in_flight)
    }

    /// Subscribe to every state change of `key`.
    ///
    /// The receiver starts with the current view and survives resets.
    pub fn subscribe(&self, key: &CollectionKey) -> watch::Receiver<CollectionView<T>> {
        let mut slots = self.lock();
        let slot = Self::slot(&mut slots, key);
        slot.publisher.subscribe()
    }

    /// Keys that currently have a window.
    pub fn keys(&self) -> Vec<CollectionKey> {
        let mut keys: Vec<_> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Append the next page of `key`.
    ///
    /// No request is sent while another load for `key` is pending or once
    /// the source reported its last page.
    pub async fn load_more(&self, key: &CollectionKey, limit: u32) -> LoadOutcome {
        self.load(key, limit, LoadRequest::NextPage).await
    }

    /// Load the first page unless it is already cached.
    pub async fn ensure_loaded(&self, key: &CollectionKey, limit: u32) -> LoadOutcome {
        self.load(key, limit, LoadRequest::FirstPage).await
    }

    /// Fetch page 1 again and replace every cached page with it.
    pub async fn refresh(&self, key: &CollectionKey, limit: u32) -> LoadOutcome {
        self.load(key, limit, LoadRequest::Refresh).await
    }

    /// Restore the default window for `key`.
    ///
    /// A response still pending for `key` is discarded when it arrives, and
    /// the key keeps reporting a load in flight until then. A key with no
    /// subscribers and nothing pending is dropped from the cache.
    pub fn reset(&self, key: &CollectionKey) {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(key) else {
            return;
        };
        if Self::reset_slot(key, slot) {
            slots.remove(key);
        }
    }

    /// Reset every key, e.g. at the end of a session.
    pub fn clear(&self) {
        self.lock().retain(|key, slot| !Self::reset_slot(key, slot));
    }

    async fn load(&self, key: &CollectionKey, limit: u32, request: LoadRequest) -> LoadOutcome {
        if limit == 0 || limit > self.max_limit {
            warn!(key = %key, limit, max_limit = self.max_limit, "rejecting page limit");
            return LoadOutcome::Skipped(SkipReason::InvalidLimit);
        }

        let (page, mode, guard) = {
            let mut slots = self.lock();
            let slot = Self::slot(&mut slots, key);
            if slot.in_flight {
                debug!(key = %key, "load already in flight");
                return LoadOutcome::Skipped(SkipReason::InFlight);
            }
            let (page, mode) = match request {
                LoadRequest::FirstPage if slot.window.initialized => {
                    debug!(key = %key, "first page served from cache");
                    return LoadOutcome::Skipped(SkipReason::CacheHit);
                }
                LoadRequest::NextPage if slot.window.is_exhausted() => {
                    return LoadOutcome::Skipped(SkipReason::Exhausted);
                }
                LoadRequest::FirstPage | LoadRequest::Refresh => (1, LoadMode::Replace),
                LoadRequest::NextPage => (slot.window.next_page(), LoadMode::Append),
            };
            slot.in_flight = true;
            slot.publish();
            let guard = InFlightGuard {
                cache: self,
                key,
                generation: slot.generation,
                armed: true,
            };
            (page, mode, guard)
        };

        let span = info_span!("feed.load", key = %key, page, limit, ?mode);
        let result = self
            .source
            .fetch_page(key, page, limit)
            .instrument(span)
            .await;

        guard.complete(page, mode, result)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CollectionKey, Slot<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns whether the slot can be evicted.
    fn reset_slot(key: &CollectionKey, slot: &mut Slot<T>) -> bool {
        slot.window = PageWindow::default();
        slot.generation += 1;
        if slot.is_evictable() {
            debug!(key = %key, "collection reset and evicted");
            return true;
        }
        slot.publish();
        debug!(
            key = %key,
            generation = slot.generation,
            pending = slot.in_flight,
            "collection reset"
        );
        false
    }

    fn slot<'a>(
        slots: &'a mut HashMap<CollectionKey, Slot<T>>,
        key: &CollectionKey,
    ) -> &'a mut Slot<T> {
        slots.entry(key.clone()).or_insert_with(Slot::new)
    }
}

/// Clears the in-flight flag if a load future is dropped before its
/// response is merged.
struct InFlightGuard<'a, T> {
    cache: &'a PaginatedCollectionCache<T>,
    key: &'a CollectionKey,
    generation: u64,
    armed: bool,
}

impl<T> InFlightGuard<'_, T>
where
    T: Clone + Send + Sync + 'static,
{
    fn complete(
        mut self,
        page: u32,
        mode: LoadMode,
        result: Result<PageResponse<T>, ListSourceError>,
    ) -> LoadOutcome {
        self.armed = false;
        let key = self.key;
        let mut slots = self.cache.lock();
        let slot = PaginatedCollectionCache::<T>::slot(&mut slots, key);

        slot.in_flight = false;
        if slot.generation != self.generation {
            debug!(key = %key, page, "dropping response requested before reset");
            if slot.is_evictable() {
                slots.remove(key);
            } else {
                slot.publish();
            }
            return LoadOutcome::Skipped(SkipReason::Superseded);
        }

        let outcome = match result {
            Ok(response) => {
                if response.is_malformed() {
                    warn!(key = %key, page, "page response lacks pagination meta, treating as last page");
                }
                let received = response.items.len();
                slot.window.merge(page, response, mode);
                debug!(
                    key = %key,
                    page,
                    received,
                    total = slot.window.len(),
                    has_more = slot.window.has_more,
                    "page merged"
                );
                LoadOutcome::Loaded {
                    page,
                    received,
                    has_more: slot.window.has_more,
                }
            }
            Err(err) => {
                warn!(key = %key, page, error = %err, "page load failed");
                slot.window.record_failure(err.to_string());
                LoadOutcome::Failed(err)
            }
        };
        slot.publish();
        outcome
    }
}

impl<T> Drop for InFlightGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut slots = self
            .cache
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get_mut(self.key) {
            slot.in_flight = false;
            slot.publish();
            debug!(key = %self.key, "load abandoned before completion");
        }
    }
}
