//! Upload entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A file stored through the configured storage backend.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "upload")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Public file name; the last segment of the storage key.
    #[sea_orm(unique)]
    pub filename: String,

    /// Name the file was uploaded with.
    pub original_name: String,

    pub mime_type: String,

    pub size: i64,

    pub md5: String,

    pub storage_key: String,

    pub url: String,

    #[sea_orm(nullable)]
    pub alt: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
