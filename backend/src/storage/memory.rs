//! In-memory persistence used in development mode and by the test suite.
//!
//! Both stores keep their state behind an `Arc<RwLock<..>>` so cloned handles
//! observe the same data, mirroring how a shared backend client would behave.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use common::model::content::{ContentItem, ContentPatch};

use super::{BlobMetadata, BlobStore, ContentStore};
use crate::error::StorageError;

/// Content metadata held in a process-local map.
#[derive(Clone, Default)]
pub struct MemoryContentStore {
    docs: Arc<RwLock<HashMap<String, ContentItem>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn insert(&self, item: &ContentItem) -> Result<(), StorageError> {
        self.docs
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<ContentItem>, StorageError> {
        Ok(self.docs.read().await.get(id).cloned())
    }

    async fn update(&self, id: &str, patch: &ContentPatch) -> Result<ContentItem, StorageError> {
        let mut docs = self.docs.write().await;
        let item = docs
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        patch.apply(item);
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.docs.write().await.remove(id);
        Ok(())
    }

    async fn list_by_created_desc(&self) -> Result<Vec<ContentItem>, StorageError> {
        let docs = self.docs.read().await;
        let mut items: Vec<ContentItem> = docs.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

/// Blob keys tracked without holding any bytes. Development-mode uploads
/// never reach a real bucket, so only the key set matters.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    keys: Arc<RwLock<HashSet<String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        _local_path: &Path,
        destination: &str,
        _metadata: &BlobMetadata,
    ) -> Result<(), StorageError> {
        self.keys.write().await.insert(destination.to_string());
        Ok(())
    }

    async fn signed_url(
        &self,
        path: &str,
        _expires: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        Ok(format!("memory://{path}"))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        // Idempotent: development-mode items reference mock keys that were
        // never uploaded, and deleting those items must still succeed.
        self.keys.write().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use common::model::content::{ContentStatus, ContentType};

    use super::*;

    fn item_at(id: &str, created_at: DateTime<Utc>) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            kind: ContentType::Url,
            name: format!("https://{id}.example.com"),
            url: Some(format!("https://{id}.example.com")),
            storage_ref: None,
            size: None,
            mime_type: None,
            status: ContentStatus::Pending,
            anonymize: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_update_merges_patch_and_keeps_other_fields() {
        let store = MemoryContentStore::new();
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        store.insert(&item_at("a", created)).await.unwrap();

        let touched = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let patch = ContentPatch {
            status: Some(ContentStatus::Processing),
            updated_at: Some(touched),
            ..ContentPatch::default()
        };
        let updated = store.update("a", &patch).await.unwrap();

        assert_eq!(updated.status, ContentStatus::Processing);
        assert_eq!(updated.updated_at, touched);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.name, "https://a.example.com");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryContentStore::new();
        let err = store
            .update("missing", &ContentPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let store = MemoryContentStore::new();
        for (id, hour) in [("old", 8), ("newest", 14), ("mid", 11)] {
            let at = Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap();
            store.insert(&item_at(id, at)).await.unwrap();
        }

        let ids: Vec<String> = store
            .list_by_created_desc()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, vec!["newest", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_blob_delete_is_idempotent() {
        let blobs = MemoryBlobStore::new();
        blobs.delete("uploads/never-uploaded").await.unwrap();
    }
}
