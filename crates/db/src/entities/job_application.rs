//! Job application entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review state of an application.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
    #[sea_orm(string_value = "shortlisted")]
    Shortlisted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// An application submitted through the careers page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub job_id: String,

    /// Job title at the time of application.
    pub job_title: String,

    pub full_name: String,

    pub email: String,

    #[sea_orm(nullable)]
    pub contact_number: Option<String>,

    #[sea_orm(nullable)]
    pub notice_period: Option<String>,

    #[sea_orm(nullable)]
    pub current_location: Option<String>,

    #[sea_orm(nullable)]
    pub current_company: Option<String>,

    #[sea_orm(nullable)]
    pub portfolio_url: Option<String>,

    /// Uploaded resume, if the upload succeeded.
    #[sea_orm(nullable)]
    pub resume_id: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,

    pub status: ApplicationStatus,

    /// Internal reviewer notes.
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id",
        on_delete = "Cascade"
    )]
    Job,
    #[sea_orm(
        belongs_to = "super::upload::Entity",
        from = "Column::ResumeId",
        to = "super::upload::Column::Id",
        on_delete = "SetNull"
    )]
    Resume,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resume.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
