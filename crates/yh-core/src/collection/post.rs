use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{OwnerId, PostId};

/// A published listing as served by the YamoHub feed endpoints.
///
/// Unknown fields are ignored so the record survives additive API changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub author_id: Option<OwnerId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
