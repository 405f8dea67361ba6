//! Visibility-driven pagination.

mod controller;

pub use controller::{InfiniteScrollController, ScrollError, ScrollState, SentinelHandle};
