//! In-process visibility source.
//!
//! The rendering adapter reports sentinel visibility through
//! [`ChannelVisibilityObserver::report`]; the scroll controller consumes it
//! through [`VisibilityObserverPort`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;
use yh_core::ports::{Visibility, VisibilityError, VisibilityObserverPort};
use yh_core::SentinelId;

#[derive(Default)]
pub struct ChannelVisibilityObserver {
    observers: Mutex<HashMap<SentinelId, mpsc::UnboundedSender<Visibility>>>,
}

impl ChannelVisibilityObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a visibility change for `sentinel`.
    ///
    /// Returns `false` when nothing observes the sentinel, which is the case
    /// for every report after a disconnect.
    pub fn report(&self, sentinel: &SentinelId, visibility: Visibility) -> bool {
        let mut observers = self.lock();
        let delivered = observers
            .get(sentinel)
            .map(|tx| tx.send(visibility).is_ok());
        match delivered {
            Some(true) => true,
            Some(false) => {
                observers.remove(sentinel);
                false
            }
            None => false,
        }
    }

    pub fn is_observed(&self, sentinel: &SentinelId) -> bool {
        self.lock().contains_key(sentinel)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SentinelId, mpsc::UnboundedSender<Visibility>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VisibilityObserverPort for ChannelVisibilityObserver {
    fn observe(
        &self,
        sentinel: &SentinelId,
    ) -> Result<mpsc::UnboundedReceiver<Visibility>, VisibilityError> {
        let mut observers = self.lock();
        if observers.contains_key(sentinel) {
            return Err(VisibilityError::AlreadyObserved(sentinel.clone()));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        observers.insert(sentinel.clone(), tx);
        debug!(sentinel = %sentinel, active = observers.len(), "observing sentinel");
        Ok(rx)
    }

    fn disconnect(&self, sentinel: &SentinelId) {
        let mut observers = self.lock();
        if observers.remove(sentinel).is_some() {
            debug!(sentinel = %sentinel, active = observers.len(), "sentinel disconnected");
        }
    }

    fn active_observers(&self) -> usize {
        self.lock().len()
    }
}
