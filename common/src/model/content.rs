use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a submitted content item. Fixed at creation and never changed
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    File,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::File => "file",
        }
    }
}

/// Lifecycle state of a content item. Items are created `Pending`; the bulk
/// processing endpoint moves them to `Processing` and, after a fixed delay,
/// to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Pending,
    Processing,
    Completed,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Processing => "processing",
            ContentStatus::Completed => "completed",
        }
    }
}

/// One submitted URL or uploaded file, as persisted in the content
/// collection.
///
/// `id`, `created_at` and `updated_at` are assigned by the system; `kind` is
/// immutable after creation. File items carry a `storage_ref` pointing into
/// the blob store together with a resolved access `url`; URL items have no
/// `storage_ref` and a `None` size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    /// The URL itself, or the original file name.
    pub name: String,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_ref: Option<String>,
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub status: ContentStatus,
    /// User toggle, stored as-is. Unset until the user touches it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymize: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a content item. Everything the system
/// does not assign itself.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub kind: ContentType,
    pub name: String,
    pub url: Option<String>,
    pub storage_ref: Option<String>,
    pub size: Option<i64>,
    pub mime_type: Option<String>,
    /// Defaults to `Pending` when not set.
    pub status: Option<ContentStatus>,
}

/// Partial update merged into a stored item. Only the lifecycle state, the
/// anonymize flag and the modification timestamp ever change after creation.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub status: Option<ContentStatus>,
    pub anonymize: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentPatch {
    /// Merges the set fields into `item`, leaving everything else untouched.
    pub fn apply(&self, item: &mut ContentItem) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(anonymize) = self.anonymize {
            item.anonymize = Some(anonymize);
        }
        if let Some(updated_at) = self.updated_at {
            item.updated_at = updated_at;
        }
    }
}
