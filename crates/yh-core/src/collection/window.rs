use std::sync::Arc;

use super::page::PageResponse;

/// How a freshly fetched page is merged into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Extend the cached items with the page.
    Append,
    /// Replace every cached item with the page.
    Replace,
}

/// Cached pagination state of one collection.
///
/// Mutated only through [`PageWindow::merge`] and [`PageWindow::record_failure`];
/// a reset is a fresh [`PageWindow::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    /// Items in fetch order. Shared so snapshots stay cheap.
    pub items: Arc<Vec<T>>,
    /// Highest page merged so far, `0` when nothing is loaded.
    pub last_loaded_page: u32,
    pub has_more: bool,
    /// Set once a first page completed successfully.
    pub initialized: bool,
    /// Message of the last failed load, cleared by the next success.
    pub error: Option<String>,
}

impl<T> Default for PageWindow<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            last_loaded_page: 0,
            has_more: true,
            initialized: false,
            error: None,
        }
    }
}

impl<T> PageWindow<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page number the next append would request.
    pub fn next_page(&self) -> u32 {
        self.last_loaded_page + 1
    }

    /// True once the source reported its last page.
    pub fn is_exhausted(&self) -> bool {
        !self.has_more
    }

    /// Terminal empty collection: first page loaded, nothing in it, nothing after it.
    pub fn is_empty_collection(&self) -> bool {
        self.initialized && self.items.is_empty() && !self.has_more
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

impl<T: Clone> PageWindow<T> {
    /// Merge `response` as page `page`.
    pub fn merge(&mut self, page: u32, response: PageResponse<T>, mode: LoadMode) {
        let has_more = response.has_more();
        #[cfg(feature = "tracing")]
        if mode == LoadMode::Append && page != self.next_page() {
            tracing::warn!(
                page,
                expected = self.next_page(),
                "appending page out of sequence"
            );
        }
        match mode {
            LoadMode::Append => Arc::make_mut(&mut self.items).extend(response.items),
            LoadMode::Replace => self.items = Arc::new(response.items),
        }
        self.last_loaded_page = page;
        self.has_more = has_more;
        self.initialized = true;
        self.error = None;
    }
}
