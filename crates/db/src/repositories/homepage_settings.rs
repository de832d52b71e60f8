//! Homepage settings repository.

use std::sync::Arc;

use crate::entities::{HomepageSettings, homepage_settings};
use obf_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect, SqlErr,
};

/// Primary key of the single homepage settings row.
pub const HOMEPAGE_SETTINGS_ID: &str = "homepage";

/// Repository for the homepage settings row.
#[derive(Clone)]
pub struct HomepageSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl HomepageSettingsRepository {
    /// Create a new homepage settings repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the settings row.
    ///
    /// Any row counts, not only the one under [`HOMEPAGE_SETTINGS_ID`].
    pub async fn find(&self) -> AppResult<Option<homepage_settings::Model>> {
        HomepageSettings::find()
            .limit(1)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether a settings row exists.
    pub async fn exists(&self) -> AppResult<bool> {
        Ok(self.find().await?.is_some())
    }

    /// Insert the settings row.
    ///
    /// Fails with [`AppError::Conflict`] when the row already exists.
    pub async fn insert(
        &self,
        model: homepage_settings::ActiveModel,
    ) -> AppResult<homepage_settings::Model> {
        model.insert(self.db.as_ref()).await.map_err(insert_error)
    }

    /// Update the settings row.
    pub async fn update(
        &self,
        model: homepage_settings::ActiveModel,
    ) -> AppResult<homepage_settings::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete every settings row. Returns the number of rows removed.
    pub async fn delete(&self) -> AppResult<u64> {
        let result = HomepageSettings::delete_many()
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

fn insert_error(e: DbErr) -> AppError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AppError::Conflict("Homepage settings already exist".to_string())
    } else {
        AppError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn settings() -> homepage_settings::Model {
        homepage_settings::Model {
            id: HOMEPAGE_SETTINGS_ID.to_string(),
            title: "Homepage Settings".to_string(),
            intro_heading: Some("India In The 21st Century".to_string()),
            intro_content: None,
            audio_enabled: true,
            audio_file: None,
            audio_name: None,
            coming_soon_label: None,
            coming_soon_heading: None,
            coming_soon_cards: None,
            share_vision_label: None,
            share_vision_heading: None,
            share_vision_description: None,
            share_vision_button_text: None,
            share_vision_button_link: None,
            address: None,
            social_networks: None,
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_exists_when_row_present() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[settings()]])
                .into_connection(),
        );

        let repo = HomepageSettingsRepository::new(db);
        assert!(repo.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_when_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<homepage_settings::Model>::new()])
                .into_connection(),
        );

        let repo = HomepageSettingsRepository::new(db);
        assert!(!repo.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_find_surfaces_database_errors() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );

        let repo = HomepageSettingsRepository::new(db);
        assert!(matches!(repo.find().await, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_insert_returns_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[settings()]])
                .into_connection(),
        );

        let repo = HomepageSettingsRepository::new(db);
        let model = homepage_settings::ActiveModel {
            id: Set(HOMEPAGE_SETTINGS_ID.to_string()),
            title: Set("Homepage Settings".to_string()),
            ..Default::default()
        };

        let inserted = repo.insert(model).await.unwrap();
        assert_eq!(inserted.id, HOMEPAGE_SETTINGS_ID);
    }

    #[tokio::test]
    async fn test_delete_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = HomepageSettingsRepository::new(db);
        assert_eq!(repo.delete().await.unwrap(), 1);
    }
}
