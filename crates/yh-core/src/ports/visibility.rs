use tokio::sync::mpsc;

use crate::ids::SentinelId;
use crate::ports::errors::VisibilityError;

/// Visibility of an observed sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// "Notify me when element X is visible."
///
/// Both operations are synchronous so an observation can be torn down on
/// unmount without waiting on anything.
///
/// # Behavior
/// - `observe()` registers exactly one observation per sentinel id.
/// - `disconnect()` is idempotent; after it returns no further event is
///   delivered for that sentinel and the receiver sees the channel closed.
pub trait VisibilityObserverPort: Send + Sync {
    fn observe(
        &self,
        sentinel: &SentinelId,
    ) -> Result<mpsc::UnboundedReceiver<Visibility>, VisibilityError>;

    fn disconnect(&self, sentinel: &SentinelId);

    /// Number of observations currently registered.
    fn active_observers(&self) -> usize;
}
