//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Identifier of the user that owns an owner-scoped collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(String);

/// Identifier of a published post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(String);

/// Identifier of one sentinel observation.
///
/// A fresh id is minted every time a sentinel is attached, so a stale
/// visibility report can never reach a newer observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentinelId(String);

impl_id!(OwnerId, PostId, SentinelId);

impl SentinelId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SentinelId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_id_round_trips_through_str() {
        let id: OwnerId = "42".into();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn sentinel_ids_are_unique() {
        assert_ne!(SentinelId::new(), SentinelId::new());
    }
}
