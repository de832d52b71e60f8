//! Partner entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A partner organisation listed on the partners page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(nullable)]
    pub full_name: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Uploaded logo.
    #[sea_orm(nullable)]
    pub image_id: Option<String>,

    /// Logo served from the static site, preferred over `image_id`.
    #[sea_orm(nullable)]
    pub image_static_path: Option<String>,

    #[sea_orm(nullable)]
    pub website: Option<String>,

    /// Ascending display order.
    pub display_order: i32,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::upload::Entity",
        from = "Column::ImageId",
        to = "super::upload::Column::Id",
        on_delete = "SetNull"
    )]
    Image,
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
