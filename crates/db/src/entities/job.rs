//! Job posting entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Where the job is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[sea_orm(string_value = "onsite")]
    Onsite,
    #[sea_orm(string_value = "remote")]
    Remote,
    #[sea_orm(string_value = "hybrid")]
    Hybrid,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Publication state of a job.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "unpublished")]
    #[default]
    Unpublished,
}

/// A job posting shown on the careers page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    pub location_type: LocationType,

    /// Free-text location type when `location_type` is `Other`.
    #[sea_orm(nullable)]
    pub location_type_other: Option<String>,

    pub location: String,

    /// Addresses receiving applications, comma or newline separated.
    #[sea_orm(column_type = "Text")]
    pub notification_emails: String,

    // Rich-text sections
    #[sea_orm(column_type = "JsonBinary")]
    pub the_role: Json,

    #[sea_orm(column_type = "JsonBinary")]
    pub what_you_do: Json,

    #[sea_orm(column_type = "JsonBinary")]
    pub what_were_looking_for: Json,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub preferred_experience: Option<Json>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub life_at_obf: Option<Json>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub how_to_apply: Option<Json>,

    /// Up to four `{ title, description }` sections.
    #[sea_orm(column_type = "JsonBinary")]
    pub extra_sections: Json,

    pub status: JobStatus,

    /// Lower numbers are listed first.
    pub display_order: i32,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_application::Entity")]
    Applications,
}

impl Related<super::job_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
