//! Shared paginated collection cache.

mod outcome;
mod paginated_collection_cache;

pub use outcome::{LoadOutcome, SkipReason};
pub use paginated_collection_cache::{PaginatedCollectionCache, DEFAULT_MAX_LIMIT};
