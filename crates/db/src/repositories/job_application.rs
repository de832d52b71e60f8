//! Job application repository.

use std::sync::Arc;

use crate::entities::{JobApplication, job_application};
use obf_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
};

/// Repository for job applications.
#[derive(Clone)]
pub struct JobApplicationRepository {
    db: Arc<DatabaseConnection>,
}

impl JobApplicationRepository {
    /// Create a new job application repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert an application.
    pub async fn create(
        &self,
        model: job_application::ActiveModel,
    ) -> AppResult<job_application::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Applications for a job, newest first.
    pub async fn find_by_job(&self, job_id: &str) -> AppResult<Vec<job_application::Model>> {
        JobApplication::find()
            .filter(job_application::Column::JobId.eq(job_id))
            .order_by(job_application::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
