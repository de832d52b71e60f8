//! Team member entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a team member is shown on the site.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// A team member or advisor profile.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Job title or position.
    pub role: String,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub bio: Option<Json>,

    /// Profile image upload.
    #[sea_orm(nullable)]
    pub image_id: Option<String>,

    #[sea_orm(nullable)]
    pub linked_in: Option<String>,

    #[sea_orm(nullable)]
    pub twitter: Option<String>,

    #[sea_orm(nullable)]
    pub email: Option<String>,

    pub status: TeamStatus,

    pub display_on_home: bool,

    /// Lower numbers are listed first.
    pub display_order: i32,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
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
