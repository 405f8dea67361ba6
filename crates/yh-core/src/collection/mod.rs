//! Paginated collection domain.
//!
//! A collection is one logical list (the home feed, one user's posts). Its
//! cached state is a [`PageWindow`], advanced one page at a time from a
//! [`PageResponse`].

mod key;
mod page;
mod post;
mod window;

pub use key::CollectionKey;
pub use page::{PageMeta, PageResponse};
pub use post::Post;
pub use window::{LoadMode, PageWindow};
