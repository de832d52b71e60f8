//! Team repository.

use std::sync::Arc;

use crate::entities::{Team, team};
use obf_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Team members returned by a listing at most.
const MAX_TEAM_MEMBERS: u64 = 100;

/// Repository for team members.
#[derive(Clone)]
pub struct TeamRepository {
    db: Arc<DatabaseConnection>,
}

impl TeamRepository {
    /// Create a new team repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a team member by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<team::Model>> {
        Team::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Active team members, lowest display order first.
    pub async fn find_active(&self) -> AppResult<Vec<team::Model>> {
        Team::find()
            .filter(team::Column::Status.eq(team::TeamStatus::Active))
            .order_by(team::Column::DisplayOrder, Order::Asc)
            .order_by(team::Column::CreatedAt, Order::Asc)
            .limit(MAX_TEAM_MEMBERS)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Highest display order in use, if any member exists.
    pub async fn max_display_order(&self) -> AppResult<Option<i32>> {
        let top = Team::find()
            .order_by(team::Column::DisplayOrder, Order::Desc)
            .limit(1)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(top.map(|member| member.display_order))
    }

    /// Insert a team member.
    pub async fn create(&self, model: team::ActiveModel) -> AppResult<team::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a team member.
    pub async fn update(&self, model: team::ActiveModel) -> AppResult<team::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a team member. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Team::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
