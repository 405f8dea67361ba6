use std::collections::BTreeMap;

use reqwest::Url;

use yh_core::ports::ListSourceError;
use yh_core::CollectionKey;

const OWNER_PLACEHOLDER: &str = "{owner}";

/// Maps collection names to endpoint path templates.
///
/// Owner-scoped collections use an `{owner}` placeholder, e.g.
/// `/api/users/{owner}/posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    paths: BTreeMap<String, String>,
}

impl EndpointConfig {
    pub fn new(paths: BTreeMap<String, String>) -> Self {
        Self { paths }
    }

    /// v1 defaults of the YamoHub API.
    pub fn defaults() -> Self {
        let paths = [
            ("home", "/api/posts"),
            ("videos", "/api/videos"),
            ("user", "/api/users/{owner}/posts"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect();
        Self { paths }
    }

    /// Defaults overlaid with configured paths.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut config = Self::defaults();
        config
            .paths
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        config
    }

    pub fn path_template(&self, collection: &str) -> Option<&str> {
        self.paths.get(collection).map(String::as_str)
    }

    /// Absolute URL of `key`'s collection endpoint under `base_url`.
    ///
    /// The owner id always lands in a single percent-encoded path segment.
    pub fn resolve(&self, base_url: &str, key: &CollectionKey) -> Result<String, ListSourceError> {
        let template = self
            .path_template(key.collection())
            .ok_or_else(|| ListSourceError::UnknownCollection(key.to_string()))?;

        let owner = match (template.contains(OWNER_PLACEHOLDER), key.owner()) {
            (true, Some(owner)) if is_segment_safe(owner.as_str()) => owner.as_str(),
            (false, None) => "",
            _ => return Err(ListSourceError::UnknownCollection(key.to_string())),
        };

        let mut url = Url::parse(base_url)
            .map_err(|e| ListSourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ListSourceError::InvalidUrl(base_url.to_string()))?;
            segments.pop_if_empty();
            for segment in template.split('/').filter(|s| !s.is_empty()) {
                segments.push(&segment.replace(OWNER_PLACEHOLDER, owner));
            }
        }

        Ok(url.into())
    }
}

/// Dot segments would be normalised away, and an empty one collapses the path.
fn is_segment_safe(owner: &str) -> bool {
    !matches!(owner, "" | "." | "..")
}
