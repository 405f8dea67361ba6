//! Rendering-layer view of one collection.

use std::sync::Arc;

use yh_core::PageWindow;

/// What a list renderer needs to draw one collection.
///
/// Published to every subscriber of a key whenever its state changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView<T> {
    pub items: Arc<Vec<T>>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub last_loaded_page: u32,
    pub initialized: bool,
}

impl<T> CollectionView<T> {
    pub fn from_window(window: &PageWindow<T>, loading: bool) -> Self {
        Self {
            items: Arc::clone(&window.items),
            loading,
            error: window.error.clone(),
            has_more: window.has_more,
            last_loaded_page: window.last_loaded_page,
            initialized: window.initialized,
        }
    }
}

impl<T> Default for CollectionView<T> {
    fn default() -> Self {
        Self::from_window(&PageWindow::default(), false)
    }
}
