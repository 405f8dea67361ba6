use serde::{Deserialize, Serialize};

/// Pagination metadata reported by the remote list source.
///
/// Every field is optional on the wire; a missing field is a fact the
/// consumer has to deal with, not a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub items_per_page: Option<u32>,
}

impl PageMeta {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page: Some(current_page),
            total_pages: Some(total_pages),
            total_items: None,
            items_per_page: None,
        }
    }

    /// True when the pagination fields needed to decide `has_more` are present.
    pub fn is_complete(&self) -> bool {
        self.current_page.is_some() && self.total_pages.is_some()
    }
}

/// One page of items as returned by the remote list source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, meta: Option<PageMeta>) -> Self {
        Self { items, meta }
    }

    /// Whether the source has pages after this one.
    ///
    /// Absent `meta`, `currentPage` or `totalPages` means "no more pages" so a
    /// malformed source can never drive an endless pagination loop.
    pub fn has_more(&self) -> bool {
        match &self.meta {
            Some(PageMeta {
                current_page: Some(current),
                total_pages: Some(total),
                ..
            }) => current < total,
            _ => false,
        }
    }

    /// True when the response lacks the pagination fields.
    pub fn is_malformed(&self) -> bool {
        !self.meta.as_ref().is_some_and(PageMeta::is_complete)
    }
}
