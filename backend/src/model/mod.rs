//! Content model: every operation over the content collection and the
//! upload bucket.
//!
//! The model owns no state of its own; it talks to the persistence pair
//! through the `storage` traits and is constructed once in `main` with
//! explicit handles, so tests can substitute fakes for either store.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::NamedTempFile;
use uuid::Uuid;

use common::model::content::{
    ContentItem, ContentPatch, ContentStatus, ContentType, NewContent,
};

use crate::config::AppConfig;
use crate::error::{ContentError, StorageError};
use crate::storage::{BlobMetadata, BlobStore, ContentStore};

/// An uploaded file handed from the multipart layer to the model.
///
/// `temp` owns the spooled request body; dropping it removes the on-disk
/// copy, so the local temp file disappears once the item is stored (or the
/// upload is rejected).
pub struct UploadedFile {
    /// Original file name as sent by the client.
    pub name: String,
    pub size: i64,
    pub mime_type: Option<String>,
    pub temp: Option<NamedTempFile>,
}

/// Result of a blob upload: the bucket key and the resolved access URL.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub storage_ref: String,
    pub url: String,
}

/// Far-future expiry for signed read URLs.
fn signed_url_expiry() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Strips any path components from a client-supplied file name.
fn base_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
}

fn has_extension(name: &str, ext: &str) -> bool {
    Path::new(name)
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case(ext))
}

#[derive(Clone)]
pub struct ContentModel {
    store: Arc<dyn ContentStore>,
    blobs: Arc<dyn BlobStore>,
    config: Arc<AppConfig>,
}

impl ContentModel {
    pub fn new(
        store: Arc<dyn ContentStore>,
        blobs: Arc<dyn BlobStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            blobs,
            config,
        }
    }

    /// Creates a content item from caller-supplied fields. The id and both
    /// timestamps are assigned here; status defaults to pending. Duplicate
    /// names or URLs are allowed and create separate items.
    pub async fn create_content(&self, new: NewContent) -> Result<ContentItem, ContentError> {
        let now = Utc::now();
        let item = ContentItem {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            name: new.name,
            url: new.url,
            storage_ref: new.storage_ref,
            size: new.size,
            mime_type: new.mime_type,
            status: new.status.unwrap_or(ContentStatus::Pending),
            anonymize: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(&item).await?;
        Ok(item)
    }

    /// All items, most recent first.
    pub async fn get_all_content(&self) -> Result<Vec<ContentItem>, ContentError> {
        Ok(self.store.list_by_created_desc().await?)
    }

    /// Absence is `Ok(None)`; callers decide whether that is an error.
    pub async fn get_content_by_id(&self, id: &str) -> Result<Option<ContentItem>, ContentError> {
        Ok(self.store.get(id).await?)
    }

    /// Merges `patch` into the stored item and refreshes `updated_at`.
    pub async fn update_content(
        &self,
        id: &str,
        mut patch: ContentPatch,
    ) -> Result<ContentItem, ContentError> {
        patch.updated_at = Some(Utc::now());
        self.store.update(id, &patch).await.map_err(|err| match err {
            StorageError::NotFound(id) => ContentError::NotFound(id),
            other => ContentError::Storage(other),
        })
    }

    /// Deletes an item. For file items the blob goes first: a failure there
    /// leaves the metadata record intact, which leaks storage rather than a
    /// dangling reference. No transaction spans the two stores.
    pub async fn delete_content(&self, id: &str) -> Result<(), ContentError> {
        if let Some(item) = self.store.get(id).await? {
            if item.kind == ContentType::File {
                if let Some(storage_ref) = &item.storage_ref {
                    self.blobs.delete(storage_ref).await?;
                }
            }
        }
        self.store.delete(id).await?;
        Ok(())
    }

    /// Creates a URL item. Only the scheme prefix is checked here; structural
    /// validation is left to the extraction layer's callers.
    pub async fn process_url(&self, url: &str) -> Result<ContentItem, ContentError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ContentError::InvalidInput("Invalid URL format".to_string()));
        }

        self.create_content(NewContent {
            kind: ContentType::Url,
            name: url.to_string(),
            url: Some(url.to_string()),
            storage_ref: None,
            size: None,
            mime_type: None,
            status: None,
        })
        .await
    }

    /// Uploads file bytes to the bucket under a collision-resistant key.
    ///
    /// Outside production the upload is short-circuited to a deterministic
    /// emulator-style URL so local runs and tests never need a live bucket.
    pub async fn upload_file_blob(&self, file: &UploadedFile) -> Result<StoredBlob, ContentError> {
        log::info!("Uploading file: {} size: {}", file.name, file.size);

        let storage_ref = format!("uploads/{}-{}", Uuid::new_v4(), base_name(&file.name));

        if !self.config.is_production() {
            let url = format!(
                "http://localhost:9199/v0/b/{}/o/{}?alt=media",
                self.config.storage_bucket,
                urlencoding::encode(&storage_ref),
            );
            return Ok(StoredBlob { storage_ref, url });
        }

        let temp = file.temp.as_ref().ok_or_else(|| {
            ContentError::InvalidInput("Missing uploaded file data".to_string())
        })?;
        let metadata = BlobMetadata {
            content_type: file.mime_type.clone(),
            original_name: file.name.clone(),
        };
        self.blobs
            .upload(temp.path(), &storage_ref, &metadata)
            .await?;
        let url = self.blobs.signed_url(&storage_ref, signed_url_expiry()).await?;

        Ok(StoredBlob { storage_ref, url })
    }

    /// Validates a file, uploads its bytes and creates the file item.
    /// ZIP archives are rejected before any upload is attempted; the local
    /// temp copy is removed when `file` drops.
    pub async fn process_file(&self, file: UploadedFile) -> Result<ContentItem, ContentError> {
        if file.name.trim().is_empty() {
            return Err(ContentError::InvalidInput("Invalid file object".to_string()));
        }
        if has_extension(&file.name, "zip") {
            return Err(ContentError::InvalidInput(
                "ZIP files are not supported".to_string(),
            ));
        }

        let blob = self.upload_file_blob(&file).await?;

        self.create_content(NewContent {
            kind: ContentType::File,
            name: file.name.clone(),
            url: Some(blob.url),
            storage_ref: Some(blob.storage_ref),
            size: Some(file.size),
            mime_type: file.mime_type.clone(),
            status: None,
        })
        .await
    }

    pub async fn update_content_status(
        &self,
        id: &str,
        status: ContentStatus,
    ) -> Result<ContentItem, ContentError> {
        self.update_content(
            id,
            ContentPatch {
                status: Some(status),
                ..ContentPatch::default()
            },
        )
        .await
    }

    pub async fn toggle_anonymize(
        &self,
        id: &str,
        anonymize: bool,
    ) -> Result<ContentItem, ContentError> {
        self.update_content(
            id,
            ContentPatch {
                anonymize: Some(anonymize),
                ..ContentPatch::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures_util::future::join_all;

    use crate::config::DeploymentMode;
    use crate::storage::memory::MemoryContentStore;

    use super::*;

    /// Blob store that records every call, optionally failing deletes.
    #[derive(Default)]
    struct RecordingBlobStore {
        calls: Mutex<Vec<String>>,
        fail_delete: bool,
    }

    #[async_trait::async_trait]
    impl BlobStore for RecordingBlobStore {
        async fn upload(
            &self,
            _local_path: &Path,
            destination: &str,
            _metadata: &BlobMetadata,
        ) -> Result<(), StorageError> {
            self.calls.lock().unwrap().push(format!("upload {destination}"));
            Ok(())
        }

        async fn signed_url(
            &self,
            path: &str,
            _expires: DateTime<Utc>,
        ) -> Result<String, StorageError> {
            Ok(format!("signed://{path}"))
        }

        async fn delete(&self, path: &str) -> Result<(), StorageError> {
            self.calls.lock().unwrap().push(format!("delete {path}"));
            if self.fail_delete {
                return Err(StorageError::Backend("bucket unavailable".to_string()));
            }
            Ok(())
        }
    }

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mode: DeploymentMode::Development,
            storage_bucket: "content-harvester.appspot.com".to_string(),
        })
    }

    fn model_with(
        store: Arc<MemoryContentStore>,
        blobs: Arc<RecordingBlobStore>,
    ) -> ContentModel {
        ContentModel::new(store, blobs, test_config())
    }

    fn dev_model() -> (ContentModel, Arc<MemoryContentStore>, Arc<RecordingBlobStore>) {
        let store = Arc::new(MemoryContentStore::new());
        let blobs = Arc::new(RecordingBlobStore::default());
        (model_with(store.clone(), blobs.clone()), store, blobs)
    }

    fn text_file(name: &str, size: i64) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            size,
            mime_type: Some("text/plain".to_string()),
            temp: None,
        }
    }

    #[tokio::test]
    async fn test_create_content_round_trip() {
        let (model, _, _) = dev_model();
        let created = model
            .create_content(NewContent {
                kind: ContentType::Url,
                name: "https://example.com".to_string(),
                url: Some("https://example.com".to_string()),
                storage_ref: None,
                size: None,
                mime_type: None,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(created.status, ContentStatus::Pending);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = model.get_content_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_content_by_id_absent_is_none() {
        let (model, _, _) = dev_model();
        assert!(model.get_content_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_process_url_rejects_bad_prefix_without_persisting() {
        let (model, _, _) = dev_model();
        let err = model.process_url("not-a-url").await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidInput(msg) if msg == "Invalid URL format"));
        assert!(model.get_all_content().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_url_creates_pending_url_item() {
        let (model, _, _) = dev_model();
        let item = model.process_url("https://example.com/a").await.unwrap();

        assert_eq!(item.kind, ContentType::Url);
        assert_eq!(item.name, "https://example.com/a");
        assert_eq!(item.url.as_deref(), Some("https://example.com/a"));
        assert_eq!(item.size, None);
        assert!(item.storage_ref.is_none());
        assert_eq!(item.status, ContentStatus::Pending);
    }

    #[tokio::test]
    async fn test_process_url_batch_failures_are_isolated() {
        let (model, _, _) = dev_model();
        let inputs = ["https://a.com", "not-a-url", "https://b.com"];
        let results = join_all(inputs.iter().map(|url| model.process_url(url))).await;

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(model.get_all_content().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_process_file_rejects_zip_before_upload() {
        let (model, store, blobs) = dev_model();
        let err = model
            .process_file(text_file("archive.ZIP", 10))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::InvalidInput(msg) if msg == "ZIP files are not supported"));
        assert!(blobs.calls.lock().unwrap().is_empty());
        assert!(store.list_by_created_desc().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_file_rejects_nameless_input() {
        let (model, _, _) = dev_model();
        let err = model.process_file(text_file("  ", 10)).await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidInput(msg) if msg == "Invalid file object"));
    }

    #[tokio::test]
    async fn test_process_file_creates_file_item_with_mock_url() {
        let (model, _, blobs) = dev_model();
        let item = model.process_file(text_file("notes.txt", 42)).await.unwrap();

        assert_eq!(item.kind, ContentType::File);
        assert_eq!(item.name, "notes.txt");
        assert_eq!(item.size, Some(42));
        assert_eq!(item.mime_type.as_deref(), Some("text/plain"));

        let storage_ref = item.storage_ref.expect("file item must carry a storage ref");
        assert!(storage_ref.starts_with("uploads/"));
        assert!(storage_ref.ends_with("-notes.txt"));

        let url = item.url.expect("file item must carry an access url");
        assert!(url.starts_with("http://localhost:9199/v0/b/content-harvester.appspot.com/o/uploads"));
        assert!(url.ends_with("?alt=media"));

        // Development mode never touches the bucket.
        assert!(blobs.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_key_strips_client_path_components() {
        let (model, _, _) = dev_model();
        let blob = model
            .upload_file_blob(&text_file("../../etc/passwd", 1))
            .await
            .unwrap();
        assert!(blob.storage_ref.ends_with("-passwd"));
        assert!(!blob.storage_ref.contains(".."));
    }

    #[tokio::test]
    async fn test_update_content_unknown_id_is_not_found() {
        let (model, _, _) = dev_model();
        let err = model
            .update_content_status("missing", ContentStatus::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_status_and_anonymize_wrappers_touch_only_their_field() {
        let (model, _, _) = dev_model();
        let item = model.process_url("https://example.com").await.unwrap();

        let updated = model
            .update_content_status(&item.id, ContentStatus::Processing)
            .await
            .unwrap();
        assert_eq!(updated.status, ContentStatus::Processing);
        assert_eq!(updated.anonymize, None);
        assert!(updated.updated_at >= item.updated_at);

        let toggled = model.toggle_anonymize(&item.id, true).await.unwrap();
        assert_eq!(toggled.anonymize, Some(true));
        assert_eq!(toggled.status, ContentStatus::Processing);
        assert_eq!(toggled.kind, ContentType::Url);
    }

    #[tokio::test]
    async fn test_delete_file_item_removes_blob_before_metadata() {
        let (model, _, blobs) = dev_model();
        let item = model.process_file(text_file("notes.txt", 42)).await.unwrap();
        let storage_ref = item.storage_ref.clone().unwrap();

        model.delete_content(&item.id).await.unwrap();

        let calls = blobs.calls.lock().unwrap();
        assert_eq!(*calls, vec![format!("delete {storage_ref}")]);
        drop(calls);
        assert!(model.get_content_by_id(&item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_keeps_metadata_when_blob_delete_fails() {
        let store = Arc::new(MemoryContentStore::new());
        let blobs = Arc::new(RecordingBlobStore {
            fail_delete: true,
            ..RecordingBlobStore::default()
        });
        let model = model_with(store.clone(), blobs.clone());

        let item = model.process_file(text_file("notes.txt", 42)).await.unwrap();
        let err = model.delete_content(&item.id).await.unwrap_err();

        assert!(matches!(err, ContentError::Storage(StorageError::Backend(_))));
        // Metadata must survive so the failure stays recoverable.
        assert!(model.get_content_by_id(&item.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_url_item_never_touches_blob_store() {
        let (model, _, blobs) = dev_model();
        let item = model.process_url("https://example.com").await.unwrap();

        model.delete_content(&item.id).await.unwrap();

        assert!(blobs.calls.lock().unwrap().is_empty());
        assert!(model.get_all_content().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_content_orders_newest_first() {
        let (model, _, _) = dev_model();
        for url in ["https://first.com", "https://second.com", "https://third.com"] {
            model.process_url(url).await.unwrap();
        }

        let names: Vec<String> = model
            .get_all_content()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(
            names,
            vec!["https://third.com", "https://second.com", "https://first.com"]
        );
    }
}
