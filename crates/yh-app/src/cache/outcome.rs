use yh_core::ports::ListSourceError;

/// Why a load request did not reach the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another load for the same key is pending.
    InFlight,
    /// The source already reported its last page.
    Exhausted,
    /// The first page is already cached.
    CacheHit,
    /// `limit` outside `1..=max_limit`.
    InvalidLimit,
    /// The key was reset while the request was pending; the response was dropped.
    Superseded,
}

/// Result of one load request.
///
/// Failures are reported here and in the window's `error` field; a load
/// never returns `Err` to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded {
        page: u32,
        received: usize,
        has_more: bool,
    },
    Skipped(SkipReason),
    Failed(ListSourceError),
}

impl LoadOutcome {
    /// True when a request was sent and its response merged.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, LoadOutcome::Skipped(_))
    }
}
