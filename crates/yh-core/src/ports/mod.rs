//! Port interfaces for the application layer
//!
//! Ports define the contract between the pagination use cases and the
//! infrastructure that fetches pages or reports visibility. The use cases
//! only ever see these traits.

pub mod errors;
pub mod list_source;
pub mod visibility;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use errors::{ListSourceError, VisibilityError};
pub use list_source::RemoteListSourcePort;
pub use visibility::{Visibility, VisibilityObserverPort};
