//! Analytics event repository.

use std::sync::Arc;

use crate::entities::analytics_event;
use obf_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection};

/// Repository for tracked events.
#[derive(Clone)]
pub struct AnalyticsRepository {
    db: Arc<DatabaseConnection>,
}

impl AnalyticsRepository {
    /// Create a new analytics repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record an event.
    pub async fn create(
        &self,
        model: analytics_event::ActiveModel,
    ) -> AppResult<analytics_event::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
