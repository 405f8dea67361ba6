//! YamoHub Feed Application Layer
//!
//! Use cases over the core ports: the shared paginated collection cache and
//! the infinite-scroll controller that drives it.

pub mod cache;
pub mod models;
pub mod scroll;

pub use cache::{LoadOutcome, PaginatedCollectionCache, SkipReason};
pub use models::CollectionView;
pub use scroll::{InfiniteScrollController, ScrollError, ScrollState, SentinelHandle};
