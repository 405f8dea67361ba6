use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::ids::OwnerId;

/// Identifies one logical paginated list.
///
/// Either a singleton collection (`home`) or a collection scoped to an owner
/// (`user:42`). Keys are compared structurally and never affect each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionKey {
    collection: String,
    owner: Option<OwnerId>,
}

impl CollectionKey {
    pub fn singleton(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            owner: None,
        }
    }

    pub fn owned(collection: impl Into<String>, owner: impl Into<OwnerId>) -> Self {
        Self {
            collection: collection.into(),
            owner: Some(owner.into()),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    pub fn is_owner_scoped(&self) -> bool {
        self.owner.is_some()
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{}:{}", self.collection, owner),
            None => write!(f, "{}", self.collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_matches_key_notation() {
        assert_eq!(CollectionKey::singleton("home").to_string(), "home");
        assert_eq!(CollectionKey::owned("user", "42").to_string(), "user:42");
    }

    #[test]
    fn owner_scoped_keys_are_distinct_per_owner() {
        let keys: HashSet<_> = [
            CollectionKey::owned("user", "42"),
            CollectionKey::owned("user", "43"),
            CollectionKey::singleton("user"),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 3);
    }
}
