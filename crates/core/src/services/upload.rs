//! Upload service.
//!
//! Files are written to the configured [`StorageBackend`] and recorded in the
//! `upload` table. They are served back by their generated file name.

use std::sync::Arc;

use chrono::Utc;
use obf_common::{AppError, AppResult, IdGenerator, StorageBackend, generate_storage_key};
use obf_db::entities::upload;
use obf_db::repositories::UploadRepository;
use sea_orm::Set;
use tracing::{info, warn};

/// Exact MIME types accepted besides `image/*` and `audio/*`.
const ACCEPTED_DOCUMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Whether files of `mime_type` may be uploaded.
#[must_use]
pub fn is_accepted_mime(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("image/")
        || essence.starts_with("audio/")
        || ACCEPTED_DOCUMENT_TYPES.contains(&essence.as_str())
}

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub alt: Option<String>,
}

/// Service for stored files.
#[derive(Clone)]
pub struct UploadService {
    upload_repo: UploadRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
}

impl UploadService {
    /// Create a new upload service.
    #[must_use]
    pub fn new(upload_repo: UploadRepository, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            upload_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// Store a file under `scope` and record it.
    pub async fn store(&self, file: NewUpload, scope: &str) -> AppResult<upload::Model> {
        if file.data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if !is_accepted_mime(&file.content_type) {
            return Err(AppError::BadRequest(format!(
                "Unsupported file type: {}",
                file.content_type
            )));
        }

        let key = generate_storage_key(scope, &file.original_name);
        let filename = key.rsplit('/').next().unwrap_or(&key).to_string();

        let stored = self
            .storage
            .upload(&key, &file.data, &file.content_type)
            .await?;

        let model = upload::ActiveModel {
            id: Set(self.id_gen.generate()),
            filename: Set(filename),
            original_name: Set(file.original_name),
            mime_type: Set(stored.content_type),
            size: Set(i64::try_from(stored.size).unwrap_or(i64::MAX)),
            md5: Set(stored.md5),
            storage_key: Set(stored.key),
            url: Set(stored.url),
            alt: Set(file.alt),
            created_at: Set(Utc::now()),
        };

        match self.upload_repo.create(model).await {
            Ok(upload) => {
                info!(upload_id = %upload.id, filename = %upload.filename, "File uploaded");
                Ok(upload)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned file");
                }
                Err(e)
            }
        }
    }

    /// Record and bytes of a stored file.
    pub async fn fetch(&self, filename: &str) -> AppResult<(upload::Model, Vec<u8>)> {
        let upload = self
            .upload_repo
            .find_by_filename(filename)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File {filename}")))?;

        let data = self.storage.download(&upload.storage_key).await?;
        Ok((upload, data))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use obf_common::UploadedFile;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory storage backend.
    #[derive(Default)]
    pub struct MemoryStorage {
        pub files: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl StorageBackend for MemoryStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<UploadedFile> {
            self.files
                .lock()
                .unwrap()
                .insert(key.to_string(), data.to_vec());
            Ok(UploadedFile {
                key: key.to_string(),
                url: self.public_url(key),
                size: data.len() as u64,
                content_type: content_type.to_string(),
                md5: format!("{:x}", md5::compute(data)),
            })
        }

        async fn download(&self, key: &str) -> AppResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("File {key}")))
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.files.lock().unwrap().remove(key);
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("/api/uploads/file/{}", key.rsplit('/').next().unwrap_or(key))
        }

        async fn exists(&self, key: &str) -> AppResult<bool> {
            Ok(self.files.lock().unwrap().contains_key(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn stored_row(filename: &str, key: &str) -> upload::Model {
        upload::Model {
            id: "u1".to_string(),
            filename: filename.to_string(),
            original_name: "cv.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 3,
            md5: "0".repeat(32),
            storage_key: key.to_string(),
            url: format!("/api/uploads/file/{filename}"),
            alt: None,
            created_at: Utc::now(),
        }
    }

    fn pdf() -> NewUpload {
        NewUpload {
            original_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: b"%PD".to_vec(),
            alt: Some("Resume - Asha Rao".to_string()),
        }
    }

    #[test]
    fn test_accepted_mime_types() {
        assert!(is_accepted_mime("image/webp"));
        assert!(is_accepted_mime("audio/mpeg"));
        assert!(is_accepted_mime("application/pdf"));
        assert!(is_accepted_mime("Application/MSWord"));
        assert!(is_accepted_mime(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
        assert!(!is_accepted_mime("application/zip"));
        assert!(!is_accepted_mime("text/html"));
    }

    #[tokio::test]
    async fn test_store_writes_file_and_row() {
        let storage = Arc::new(MemoryStorage::default());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_row("1_abc.pdf", "resumes/2025/01/01/1_abc.pdf")]]);
        let service = UploadService::new(UploadRepository::new(Arc::new(db.into_connection())), storage.clone());

        let upload = service.store(pdf(), "resumes").await.unwrap();

        assert_eq!(upload.filename, "1_abc.pdf");
        assert_eq!(storage.files.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_file() {
        let storage = Arc::new(MemoryStorage::default());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("disk full".to_string())]);
        let service = UploadService::new(UploadRepository::new(Arc::new(db.into_connection())), storage.clone());

        assert!(service.store(pdf(), "resumes").await.is_err());
        assert!(storage.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_files() {
        let service = UploadService::new(
            UploadRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
            Arc::new(MemoryStorage::default()),
        );

        let zip = NewUpload {
            content_type: "application/zip".to_string(),
            ..pdf()
        };
        assert!(matches!(service.store(zip, "uploads").await, Err(AppError::BadRequest(_))));

        let empty = NewUpload {
            data: Vec::new(),
            ..pdf()
        };
        assert!(matches!(service.store(empty, "uploads").await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_fetch_reads_bytes_by_filename() {
        let storage = Arc::new(MemoryStorage::default());
        storage
            .files
            .lock()
            .unwrap()
            .insert("uploads/2025/01/01/1_abc.pdf".to_string(), b"%PD".to_vec());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_row("1_abc.pdf", "uploads/2025/01/01/1_abc.pdf")]])
            .append_query_results([Vec::<upload::Model>::new()]);
        let service = UploadService::new(UploadRepository::new(Arc::new(db.into_connection())), storage);

        let (upload, data) = service.fetch("1_abc.pdf").await.unwrap();
        assert_eq!(upload.mime_type, "application/pdf");
        assert_eq!(data, b"%PD");

        assert!(matches!(service.fetch("missing.pdf").await, Err(AppError::NotFound(_))));
    }
}
