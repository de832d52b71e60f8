//! Homepage settings service.
//!
//! The homepage is configured through a single settings document. Writes
//! pass through two hooks before they reach the database:
//!
//! - `before_validate`: the singleton check for creates, and title defaulting
//! - `before_change`: rich-text normalization of the intro, the share-vision
//!   description and every card description
//!
//! Reads normalize the same fields again, since rows written before rich
//! text was enforced may still hold plain strings.

use chrono::{DateTime, Utc};
use obf_common::{Actor, AppError, AppResult};
use obf_db::entities::homepage_settings;
use obf_db::repositories::{HOMEPAGE_SETTINGS_ID, HomepageSettingsRepository};
use obf_richtext::{RichText, normalize};
use sea_orm::Set;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

use super::asset_url::{resolve_url, resolve_url_or};
use super::homepage_defaults as defaults;
use super::singleton_guard::{
    RetryPolicy, SINGLETON_VIOLATION, SingletonGuard, WriteOperation,
};

const fn default_true() -> bool {
    true
}

/// A "coming soon" card as stored in the settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComingSoonCard {
    #[serde(default)]
    pub title: String,
    #[serde(default = "RichText::empty")]
    pub description: RichText,
    /// Asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub text_color: String,
    /// Asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<Value>,
}

/// A footer social-network link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialNetwork {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ascending display order.
    #[serde(default)]
    pub order: i32,
}

/// The stored settings document, read-path normalized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageSettings {
    pub id: String,
    pub title: String,
    pub intro_heading: Option<String>,
    pub intro_content: RichText,
    pub audio_enabled: bool,
    pub audio_file: Option<Value>,
    pub audio_name: Option<String>,
    pub coming_soon_label: Option<String>,
    pub coming_soon_heading: Option<String>,
    pub coming_soon_cards: Vec<ComingSoonCard>,
    pub share_vision_label: Option<String>,
    pub share_vision_heading: Option<String>,
    pub share_vision_description: RichText,
    pub share_vision_button_text: Option<String>,
    pub share_vision_button_link: Option<String>,
    pub address: Option<String>,
    pub social_networks: Vec<SocialNetwork>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HomepageSettings {
    /// Read-path normalization of a stored row.
    #[must_use]
    pub fn from_model(model: homepage_settings::Model) -> Self {
        Self {
            intro_content: normalize(model.intro_content.unwrap_or(Value::Null)),
            share_vision_description: normalize(
                model.share_vision_description.unwrap_or(Value::Null),
            ),
            coming_soon_cards: read_list(model.coming_soon_cards.as_ref(), "comingSoonCards")
                .unwrap_or_default(),
            social_networks: read_list(model.social_networks.as_ref(), "socialNetworks")
                .unwrap_or_default(),
            id: model.id,
            title: model.title,
            intro_heading: model.intro_heading,
            audio_enabled: model.audio_enabled,
            audio_file: model.audio_file,
            audio_name: model.audio_name,
            coming_soon_label: model.coming_soon_label,
            coming_soon_heading: model.coming_soon_heading,
            share_vision_label: model.share_vision_label,
            share_vision_heading: model.share_vision_heading,
            share_vision_button_text: model.share_vision_button_text,
            share_vision_button_link: model.share_vision_button_link,
            address: model.address,
            seo_title: model.seo_title,
            seo_description: model.seo_description,
            seo_keywords: model.seo_keywords,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A card as rendered by the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCard {
    pub title: String,
    pub description: RichText,
    /// Resolved image path, or empty.
    pub image: String,
    pub background_color: String,
    pub text_color: String,
    pub background_image: Option<String>,
}

impl From<ComingSoonCard> for PublicCard {
    fn from(card: ComingSoonCard) -> Self {
        Self {
            image: resolve_url(card.image.as_ref()).unwrap_or_default(),
            background_image: resolve_url(card.background_image.as_ref()),
            background_color: non_empty_or(Some(card.background_color), defaults::CARD_BACKGROUND_COLOR),
            text_color: non_empty_or(Some(card.text_color), defaults::CARD_TEXT_COLOR),
            title: card.title,
            description: card.description,
        }
    }
}

/// The payload of the public homepage endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHomepage {
    pub intro_heading: String,
    pub intro_content: RichText,
    pub audio_enabled: bool,
    pub audio_url: String,
    pub audio_name: String,
    pub coming_soon_label: String,
    pub coming_soon_heading: String,
    pub coming_soon_cards: Vec<PublicCard>,
    pub share_vision_label: String,
    pub share_vision_heading: String,
    pub share_vision_description: RichText,
    pub share_vision_button_text: String,
    pub share_vision_button_link: String,
    pub address: String,
    /// Enabled entries only, ascending by order.
    pub social_networks: Vec<SocialNetwork>,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
}

impl PublicHomepage {
    /// Build the public payload from a stored row, filling gaps with defaults.
    #[must_use]
    pub fn from_model(model: homepage_settings::Model) -> Self {
        let intro_content = present(model.intro_content)
            .map_or_else(|| defaults::INTRO_CONTENT.clone(), normalize);
        let share_vision_description = present(model.share_vision_description)
            .map_or_else(|| defaults::SHARE_VISION_DESCRIPTION.clone(), normalize);

        let coming_soon_cards =
            match read_list::<ComingSoonCard>(model.coming_soon_cards.as_ref(), "comingSoonCards") {
                Some(cards) => cards.into_iter().map(PublicCard::from).collect(),
                None => defaults::CARDS.clone(),
            };

        let mut social_networks: Vec<SocialNetwork> =
            read_list(model.social_networks.as_ref(), "socialNetworks")
                .unwrap_or_else(|| defaults::SOCIAL_NETWORKS.clone());
        social_networks.retain(|network| network.enabled);
        social_networks.sort_by_key(|network| network.order);

        Self {
            intro_heading: non_empty_or(model.intro_heading, defaults::INTRO_HEADING),
            intro_content,
            audio_enabled: model.audio_enabled,
            audio_url: resolve_url_or(model.audio_file.as_ref(), defaults::AUDIO_URL),
            audio_name: non_empty_or(model.audio_name, defaults::AUDIO_NAME),
            coming_soon_label: non_empty_or(model.coming_soon_label, defaults::COMING_SOON_LABEL),
            coming_soon_heading: non_empty_or(
                model.coming_soon_heading,
                defaults::COMING_SOON_HEADING,
            ),
            coming_soon_cards,
            share_vision_label: non_empty_or(model.share_vision_label, defaults::SHARE_VISION_LABEL),
            share_vision_heading: non_empty_or(
                model.share_vision_heading,
                defaults::SHARE_VISION_HEADING,
            ),
            share_vision_description,
            share_vision_button_text: non_empty_or(
                model.share_vision_button_text,
                defaults::SHARE_VISION_BUTTON_TEXT,
            ),
            share_vision_button_link: non_empty_or(
                model.share_vision_button_link,
                defaults::SHARE_VISION_BUTTON_LINK,
            ),
            address: non_empty_or(model.address, defaults::ADDRESS),
            social_networks,
            seo_title: model.seo_title.unwrap_or_default(),
            seo_description: model.seo_description.unwrap_or_default(),
            seo_keywords: model.seo_keywords.unwrap_or_default(),
        }
    }
}

/// A card supplied by an editor.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    /// Rich text, or a legacy plain string.
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[validate(length(max = 32))]
    pub background_color: Option<String>,
    #[validate(length(max = 32))]
    pub text_color: Option<String>,
    #[serde(default)]
    pub background_image: Option<Value>,
}

impl From<CardInput> for ComingSoonCard {
    fn from(input: CardInput) -> Self {
        Self {
            title: input.title,
            description: normalize(input.description.unwrap_or(Value::Null)),
            image: present(input.image),
            background_color: input
                .background_color
                .unwrap_or_else(|| defaults::CARD_BACKGROUND_COLOR.to_string()),
            text_color: input
                .text_color
                .unwrap_or_else(|| defaults::CARD_TEXT_COLOR.to_string()),
            background_image: present(input.background_image),
        }
    }
}

/// A social-network link supplied by an editor.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SocialNetworkInput {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 1024))]
    pub url: String,
    pub enabled: Option<bool>,
    pub order: Option<i32>,
}

impl From<SocialNetworkInput> for SocialNetwork {
    fn from(input: SocialNetworkInput) -> Self {
        Self {
            name: input.name,
            url: input.url,
            enabled: input.enabled.unwrap_or(true),
            order: input.order.unwrap_or(0),
        }
    }
}

/// Fields supplied on create, update or save. Absent fields are left alone.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HomepageSettingsInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(max = 512))]
    pub intro_heading: Option<String>,
    pub intro_content: Option<Value>,
    pub audio_enabled: Option<bool>,
    pub audio_file: Option<Value>,
    #[validate(length(max = 256))]
    pub audio_name: Option<String>,
    #[validate(length(max = 256))]
    pub coming_soon_label: Option<String>,
    #[validate(length(max = 256))]
    pub coming_soon_heading: Option<String>,
    #[validate(nested)]
    pub coming_soon_cards: Option<Vec<CardInput>>,
    #[validate(length(max = 256))]
    pub share_vision_label: Option<String>,
    #[validate(length(max = 512))]
    pub share_vision_heading: Option<String>,
    pub share_vision_description: Option<Value>,
    #[validate(length(max = 256))]
    pub share_vision_button_text: Option<String>,
    #[validate(length(max = 1024))]
    pub share_vision_button_link: Option<String>,
    pub address: Option<String>,
    #[validate(nested)]
    pub social_networks: Option<Vec<SocialNetworkInput>>,
    #[validate(length(max = 512))]
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
}

/// Service for the homepage settings document.
#[derive(Clone)]
pub struct HomepageSettingsService {
    repo: HomepageSettingsRepository,
    guard: SingletonGuard,
}

impl HomepageSettingsService {
    /// Create a new homepage settings service.
    #[must_use]
    pub fn new(repo: HomepageSettingsRepository, retry: RetryPolicy) -> Self {
        let guard = SingletonGuard::new(Arc::new(repo.clone()), retry);
        Self { repo, guard }
    }

    /// Whether `actor` may create the settings document right now.
    pub async fn can_create(&self, actor: Option<&Actor>) -> bool {
        self.guard.authorize_create(actor).await
    }

    /// The stored document, if one exists.
    pub async fn get(&self) -> AppResult<Option<HomepageSettings>> {
        Ok(self.repo.find().await?.map(HomepageSettings::from_model))
    }

    /// Create the settings document.
    pub async fn create(
        &self,
        actor: Option<&Actor>,
        mut input: HomepageSettingsInput,
    ) -> AppResult<HomepageSettings> {
        let actor = actor.ok_or(AppError::Unauthorized)?;

        if !self.guard.authorize_create(Some(actor)).await {
            return Err(AppError::Validation(SINGLETON_VIOLATION.to_string()));
        }

        self.before_validate(&mut input, WriteOperation::Create).await?;
        input.validate()?;

        let title = input
            .title
            .take()
            .unwrap_or_else(|| defaults::TITLE.to_string());
        let mut row = new_row(title);
        before_change(&mut row, input)?;

        let model = self.repo.insert(row).await.map_err(singleton_conflict)?;

        info!(actor = %actor.name, "Homepage settings created");
        Ok(HomepageSettings::from_model(model))
    }

    /// Update the existing settings document.
    pub async fn update(
        &self,
        actor: Option<&Actor>,
        mut input: HomepageSettingsInput,
    ) -> AppResult<HomepageSettings> {
        let actor = actor.ok_or(AppError::Unauthorized)?;

        let existing = self
            .repo
            .find()
            .await?
            .ok_or_else(|| AppError::NotFound("Homepage settings".to_string()))?;

        self.before_validate(&mut input, WriteOperation::Update).await?;
        input.validate()?;

        let mut row: homepage_settings::ActiveModel = existing.into();
        before_change(&mut row, input)?;
        row.updated_at = Set(Some(Utc::now()));

        let model = self.repo.update(row).await?;

        info!(actor = %actor.name, "Homepage settings updated");
        Ok(HomepageSettings::from_model(model))
    }

    /// Update the document, creating it first when none exists.
    ///
    /// Returns the document and whether it was created.
    pub async fn save(
        &self,
        actor: Option<&Actor>,
        input: HomepageSettingsInput,
    ) -> AppResult<(HomepageSettings, bool)> {
        if actor.is_none() {
            return Err(AppError::Unauthorized);
        }

        if self.repo.find().await?.is_some() {
            Ok((self.update(actor, input).await?, false))
        } else {
            Ok((self.create(actor, input).await?, true))
        }
    }

    /// Delete the document. Admins only.
    pub async fn delete(&self, actor: Option<&Actor>) -> AppResult<()> {
        let actor = actor.ok_or(AppError::Unauthorized)?;
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can delete homepage settings".to_string(),
            ));
        }

        if self.repo.delete().await? == 0 {
            return Err(AppError::NotFound("Homepage settings".to_string()));
        }

        warn!(actor = %actor.name, "Homepage settings deleted, defaults are served");
        Ok(())
    }

    /// The public homepage payload. Never fails.
    pub async fn public_view(&self) -> PublicHomepage {
        match self.repo.find().await {
            Ok(Some(model)) => PublicHomepage::from_model(model),
            Ok(None) => defaults::PUBLIC_HOMEPAGE.clone(),
            Err(e) => {
                error!(error = %e, "Failed to load homepage settings, serving defaults");
                defaults::PUBLIC_HOMEPAGE.clone()
            }
        }
    }

    async fn before_validate(
        &self,
        input: &mut HomepageSettingsInput,
        operation: WriteOperation,
    ) -> AppResult<()> {
        self.guard.enforce_on_validate(operation).await?;

        if operation == WriteOperation::Create && input.title.as_deref().is_none_or(str::is_empty) {
            input.title = Some(defaults::TITLE.to_string());
        }
        Ok(())
    }
}

/// Report a rejected second insert as the singleton violation.
fn singleton_conflict(e: AppError) -> AppError {
    match e {
        AppError::Conflict(_) => AppError::Validation(SINGLETON_VIOLATION.to_string()),
        other => other,
    }
}

/// A fresh row carrying the field defaults.
fn new_row(title: String) -> homepage_settings::ActiveModel {
    homepage_settings::ActiveModel {
        id: Set(HOMEPAGE_SETTINGS_ID.to_string()),
        title: Set(title),
        intro_heading: Set(Some(defaults::INTRO_HEADING.to_string())),
        intro_content: Set(None),
        audio_enabled: Set(true),
        audio_file: Set(None),
        audio_name: Set(Some(defaults::AUDIO_NAME.to_string())),
        coming_soon_label: Set(Some(defaults::COMING_SOON_LABEL.to_string())),
        coming_soon_heading: Set(Some(defaults::COMING_SOON_HEADING.to_string())),
        coming_soon_cards: Set(None),
        share_vision_label: Set(Some(defaults::SHARE_VISION_LABEL.to_string())),
        share_vision_heading: Set(Some(defaults::SHARE_VISION_HEADING.to_string())),
        share_vision_description: Set(None),
        share_vision_button_text: Set(Some(defaults::SHARE_VISION_BUTTON_TEXT.to_string())),
        share_vision_button_link: Set(Some(defaults::SHARE_VISION_BUTTON_LINK.to_string())),
        address: Set(Some(defaults::ADDRESS.to_string())),
        social_networks: Set(None),
        seo_title: Set(None),
        seo_description: Set(None),
        seo_keywords: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
}

/// Copy supplied fields onto `row`, normalizing rich text on the way.
fn before_change(
    row: &mut homepage_settings::ActiveModel,
    input: HomepageSettingsInput,
) -> AppResult<()> {
    if let Some(title) = input.title {
        row.title = Set(title);
    }
    if let Some(intro_heading) = input.intro_heading {
        row.intro_heading = Set(Some(intro_heading));
    }
    if let Some(intro_content) = input.intro_content {
        row.intro_content = Set(Some(normalize(intro_content).into_value()));
    }
    if let Some(audio_enabled) = input.audio_enabled {
        row.audio_enabled = Set(audio_enabled);
    }
    if let Some(audio_file) = input.audio_file {
        row.audio_file = Set(present(Some(audio_file)));
    }
    if let Some(audio_name) = input.audio_name {
        row.audio_name = Set(Some(audio_name));
    }
    if let Some(label) = input.coming_soon_label {
        row.coming_soon_label = Set(Some(label));
    }
    if let Some(heading) = input.coming_soon_heading {
        row.coming_soon_heading = Set(Some(heading));
    }
    if let Some(cards) = input.coming_soon_cards {
        let cards: Vec<ComingSoonCard> = cards.into_iter().map(ComingSoonCard::from).collect();
        row.coming_soon_cards = Set(Some(to_json(&cards)?));
    }
    if let Some(label) = input.share_vision_label {
        row.share_vision_label = Set(Some(label));
    }
    if let Some(heading) = input.share_vision_heading {
        row.share_vision_heading = Set(Some(heading));
    }
    if let Some(description) = input.share_vision_description {
        row.share_vision_description = Set(Some(normalize(description).into_value()));
    }
    if let Some(text) = input.share_vision_button_text {
        row.share_vision_button_text = Set(Some(text));
    }
    if let Some(link) = input.share_vision_button_link {
        row.share_vision_button_link = Set(Some(link));
    }
    if let Some(address) = input.address {
        row.address = Set(Some(address));
    }
    if let Some(networks) = input.social_networks {
        let networks: Vec<SocialNetwork> =
            networks.into_iter().map(SocialNetwork::from).collect();
        row.social_networks = Set(Some(to_json(&networks)?));
    }
    if let Some(seo_title) = input.seo_title {
        row.seo_title = Set(Some(seo_title));
    }
    if let Some(seo_description) = input.seo_description {
        row.seo_description = Set(Some(seo_description));
    }
    if let Some(seo_keywords) = input.seo_keywords {
        row.seo_keywords = Set(Some(seo_keywords));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

/// Parse a stored list, dropping entries that do not parse.
///
/// `None` when the list is absent or not an array.
fn read_list<T: DeserializeOwned>(value: Option<&Value>, field: &'static str) -> Option<Vec<T>> {
    let items = match value? {
        Value::Null => return None,
        Value::Array(items) => items,
        _ => {
            warn!(field, "Stored list is not an array, ignoring it");
            return None;
        }
    };

    let parsed = items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(field, error = %e, "Dropping malformed stored entry");
                None
            }
        })
        .collect();

    Some(parsed)
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}
