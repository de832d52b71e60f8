//! Job repository.

use std::sync::Arc;

use crate::entities::{Job, job};
use obf_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Repository for job postings.
#[derive(Clone)]
pub struct JobRepository {
    db: Arc<DatabaseConnection>,
}

impl JobRepository {
    /// Create a new job repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a job by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<job::Model>> {
        Job::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count published jobs.
    pub async fn count_published(&self) -> AppResult<u64> {
        Job::find()
            .filter(job::Column::Status.eq(job::JobStatus::Published))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List published jobs, lowest display order first.
    pub async fn find_published(&self, limit: u64, offset: u64) -> AppResult<Vec<job::Model>> {
        Job::find()
            .filter(job::Column::Status.eq(job::JobStatus::Published))
            .order_by(job::Column::DisplayOrder, Order::Asc)
            .order_by(job::Column::CreatedAt, Order::Asc)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Highest display order in use, if any job exists.
    pub async fn max_display_order(&self) -> AppResult<Option<i32>> {
        let top = Job::find()
            .order_by(job::Column::DisplayOrder, Order::Desc)
            .limit(1)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(top.map(|job| job.display_order))
    }

    /// Insert a job.
    pub async fn create(&self, model: job::ActiveModel) -> AppResult<job::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a job.
    pub async fn update(&self, model: job::ActiveModel) -> AppResult<job::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a job. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Job::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn create_test_job(id: &str, display_order: i32) -> job::Model {
        job::Model {
            id: id.to_string(),
            title: "Research Associate".to_string(),
            location_type: job::LocationType::Hybrid,
            location_type_other: None,
            location: "New Delhi (IN)".to_string(),
            notification_emails: "hiring@example.com".to_string(),
            the_role: json!({"root": {"type": "root", "children": []}}),
            what_you_do: json!({"root": {"type": "root", "children": []}}),
            what_were_looking_for: json!({"root": {"type": "root", "children": []}}),
            preferred_experience: None,
            life_at_obf: None,
            how_to_apply: None,
            extra_sections: json!([]),
            status: job::JobStatus::Published,
            display_order,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_published_returns_page() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_job("a", 1), create_test_job("b", 2)]])
                .into_connection(),
        );

        let repo = JobRepository::new(db);
        let jobs = repo.find_published(10, 0).await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].display_order, 1);
    }

    #[tokio::test]
    async fn test_count_published() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = JobRepository::new(db);
        assert_eq!(repo.count_published().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_max_display_order() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_job("a", 7)]])
                .append_query_results([Vec::<job::Model>::new()])
                .into_connection(),
        );

        let repo = JobRepository::new(db);
        assert_eq!(repo.max_display_order().await.unwrap(), Some(7));
        assert_eq!(repo.max_display_order().await.unwrap(), None);
    }
}
