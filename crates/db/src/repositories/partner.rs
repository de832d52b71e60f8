//! Partner repository.

use std::sync::Arc;

use crate::entities::{Partner, partner};
use obf_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, Order, QueryOrder, QuerySelect,
};

/// Partners returned by a listing at most.
const MAX_PARTNERS: u64 = 100;

/// Repository for partners.
#[derive(Clone)]
pub struct PartnerRepository {
    db: Arc<DatabaseConnection>,
}

impl PartnerRepository {
    /// Create a new partner repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All partners in display order.
    pub async fn find_all(&self) -> AppResult<Vec<partner::Model>> {
        Partner::find()
            .order_by(partner::Column::DisplayOrder, Order::Asc)
            .order_by(partner::Column::CreatedAt, Order::Asc)
            .limit(MAX_PARTNERS)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a partner.
    pub async fn create(&self, model: partner::ActiveModel) -> AppResult<partner::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a partner. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Partner::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
