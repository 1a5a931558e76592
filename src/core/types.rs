use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored record: field name to JSON value, in declaration order.
pub type Document = serde_json::Map<String, serde_json::Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const CREATED_BY_FIELD: &str = "created_by_uid";
pub const UPDATED_AT_FIELD: &str = "updated_at";
pub const UPDATED_BY_FIELD: &str = "updated_by_uid";
pub const ARCHIVED_AT_FIELD: &str = "archived_at";

/// Fields an update may never overwrite.
pub const PROTECTED_FIELDS: [&str; 3] = [ID_FIELD, CREATED_AT_FIELD, CREATED_BY_FIELD];

/// Identity and audit fields shared by every entity.
///
/// Flattened into each entity so the stored document keeps them at top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl EntityMeta {
    /// Meta for a draft with a caller-chosen ID.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Random lowercase hex token of `len` characters (at most 32).
pub fn new_token(len: usize) -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(len.min(32));
    token
}

/// True when a stored document carries an archive marker.
pub fn document_is_archived(doc: &Document) -> bool {
    doc.get(ARCHIVED_AT_FIELD)
        .map(|value| !value.is_null())
        .unwrap_or(false)
}
