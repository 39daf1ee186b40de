//! Persistence seam for content metadata and uploaded file bytes.
//!
//! The document database and the object-storage bucket are external
//! collaborators; these traits describe exactly the operations the model
//! layer needs from them. The `memory` module provides the in-process
//! implementation used in development mode and by the test suite. A managed
//! backend pair plugs in by implementing the same two traits and handing the
//! instances to `ContentModel` in `main`.

pub mod memory;

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::model::content::{ContentItem, ContentPatch};

use crate::error::StorageError;

/// Metadata attached to an uploaded blob.
#[derive(Debug, Clone)]
pub struct BlobMetadata {
    pub content_type: Option<String>,
    pub original_name: String,
}

/// Document-store operations over the content collection.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Persists a freshly created item under its id.
    async fn insert(&self, item: &ContentItem) -> Result<(), StorageError>;

    /// Fetches one item. Absence is `Ok(None)`, not an error.
    async fn get(&self, id: &str) -> Result<Option<ContentItem>, StorageError>;

    /// Merges `patch` into the stored document and returns the result.
    /// Fails with [`StorageError::NotFound`] when the id is unknown.
    async fn update(&self, id: &str, patch: &ContentPatch) -> Result<ContentItem, StorageError>;

    /// Removes the metadata record.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// All items, most recently created first.
    async fn list_by_created_desc(&self) -> Result<Vec<ContentItem>, StorageError>;
}

/// Object-storage operations over the upload bucket.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads the file at `local_path` to `destination` inside the bucket.
    async fn upload(
        &self,
        local_path: &Path,
        destination: &str,
        metadata: &BlobMetadata,
    ) -> Result<(), StorageError>;

    /// Returns a signed read URL for `path`, valid until `expires`.
    async fn signed_url(&self, path: &str, expires: DateTime<Utc>)
        -> Result<String, StorageError>;

    /// Deletes the blob at `path`.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
