//! Shared fixtures for the pagination integration tests.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use tracing_subscriber::EnvFilter;
use yh_core::ports::testing::{page, ScriptedSource};
use yh_core::PageResponse;

static TRACING: OnceLock<()> = OnceLock::new();

pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}

/// Item record used by the pagination tests: `(page, index within page)`.
pub type Item = (u32, u32);

/// Remote feed answering from a script.
pub type FakeFeed = ScriptedSource<Item>;

pub fn scripted_feed() -> Arc<FakeFeed> {
    Arc::new(ScriptedSource::new())
}

/// Feed that parks every request until the test releases it.
pub fn gated_feed() -> Arc<FakeFeed> {
    Arc::new(ScriptedSource::gated())
}

pub fn page_of(page_number: u32, count: u32, total_pages: u32) -> PageResponse<Item> {
    page((0..count).map(|i| (page_number, i)), page_number, total_pages)
}
