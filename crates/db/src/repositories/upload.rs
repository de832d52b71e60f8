//! Upload repository.

use std::sync::Arc;

use crate::entities::{Upload, upload};
use obf_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Repository for stored files.
#[derive(Clone)]
pub struct UploadRepository {
    db: Arc<DatabaseConnection>,
}

impl UploadRepository {
    /// Create a new upload repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert an upload record.
    pub async fn create(&self, model: upload::ActiveModel) -> AppResult<upload::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an upload by its public file name.
    pub async fn find_by_filename(&self, filename: &str) -> AppResult<Option<upload::Model>> {
        Upload::find()
            .filter(upload::Column::Filename.eq(filename))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find uploads by ID.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<upload::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Upload::find()
            .filter(upload::Column::Id.is_in(ids.iter().cloned()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_filename() {
        let stored = upload::Model {
            id: "u1".to_string(),
            filename: "1_abc.pdf".to_string(),
            original_name: "cv.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 8,
            md5: "0".repeat(32),
            storage_key: "resumes/2025/01/01/1_abc.pdf".to_string(),
            url: "/api/uploads/file/1_abc.pdf".to_string(),
            alt: None,
            created_at: Utc::now(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored]])
                .into_connection(),
        );

        let repo = UploadRepository::new(db);
        let found = repo.find_by_filename("1_abc.pdf").await.unwrap().unwrap();
        assert_eq!(found.storage_key, "resumes/2025/01/01/1_abc.pdf");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = UploadRepository::new(db);
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }
}
