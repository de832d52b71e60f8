//! Homepage settings entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The single homepage settings row.
///
/// Rich-text columns and the embedded card and social-network lists are
/// stored as JSON. Rows written before rich text was enforced may hold
/// plain strings in the rich-text columns.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "homepage_settings")]
pub struct Model {
    /// Always [`crate::repositories::HOMEPAGE_SETTINGS_ID`].
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Admin label.
    pub title: String,

    // Intro
    #[sea_orm(nullable)]
    pub intro_heading: Option<String>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub intro_content: Option<Json>,

    // Audio
    pub audio_enabled: bool,

    /// Asset reference: a path, URL or upload object.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub audio_file: Option<Json>,

    #[sea_orm(nullable)]
    pub audio_name: Option<String>,

    // Coming soon
    #[sea_orm(nullable)]
    pub coming_soon_label: Option<String>,

    #[sea_orm(nullable)]
    pub coming_soon_heading: Option<String>,

    /// Ordered card list.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub coming_soon_cards: Option<Json>,

    // Share vision
    #[sea_orm(nullable)]
    pub share_vision_label: Option<String>,

    #[sea_orm(nullable)]
    pub share_vision_heading: Option<String>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub share_vision_description: Option<Json>,

    #[sea_orm(nullable)]
    pub share_vision_button_text: Option<String>,

    #[sea_orm(nullable)]
    pub share_vision_button_link: Option<String>,

    // Footer
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub social_networks: Option<Json>,

    // SEO
    #[sea_orm(nullable)]
    pub seo_title: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub seo_description: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub seo_keywords: Option<String>,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
