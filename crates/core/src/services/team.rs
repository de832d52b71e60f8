//! Team and advisor profiles.

use chrono::{DateTime, Utc};
use obf_common::{Actor, AppError, AppResult, IdGenerator};
use obf_db::entities::team::{self, TeamStatus};
use obf_db::entities::upload;
use obf_db::repositories::{TeamRepository, UploadRepository};
use obf_richtext::{RichText, normalize};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use super::asset_url::resolve_url;

/// Profile image as served to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamImage {
    pub url: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl TeamImage {
    /// Resolve an upload to the URL it is served from.
    #[must_use]
    pub fn from_upload(upload: &upload::Model) -> Option<Self> {
        let reference = serde_json::to_value(upload).ok();
        resolve_url(reference.as_ref()).map(|url| Self {
            url,
            filename: upload.filename.clone(),
            alt: upload.alt.clone(),
        })
    }
}

/// A team member with a canonical bio and resolved image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberView {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: Option<RichText>,
    pub image: Option<TeamImage>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub email: Option<String>,
    pub status: TeamStatus,
    pub display_on_home: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TeamMemberView {
    fn new(model: team::Model, image: Option<&upload::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
            bio: model.bio.map(normalize),
            image: image.and_then(TeamImage::from_upload),
            linked_in: model.linked_in,
            twitter: model.twitter,
            email: model.email,
            status: model.status,
            display_on_home: model.display_on_home,
            display_order: model.display_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Input for adding a team member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1, max = 256))]
    pub role: String,
    pub bio: Option<Value>,
    /// Profile image upload.
    #[validate(length(min = 1))]
    pub image_id: String,
    #[validate(length(max = 1024))]
    pub linked_in: Option<String>,
    #[validate(length(max = 1024))]
    pub twitter: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: TeamStatus,
    #[serde(default)]
    pub display_on_home: bool,
    /// Absent places the member after every existing one.
    pub display_order: Option<i32>,
}

/// Input for updating a team member. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub role: Option<String>,
    pub bio: Option<Value>,
    #[validate(length(min = 1))]
    pub image_id: Option<String>,
    #[validate(length(max = 1024))]
    pub linked_in: Option<String>,
    #[validate(length(max = 1024))]
    pub twitter: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub status: Option<TeamStatus>,
    pub display_on_home: Option<bool>,
    pub display_order: Option<i32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Service for team members and advisors.
#[derive(Clone)]
pub struct TeamService {
    team_repo: TeamRepository,
    upload_repo: UploadRepository,
    id_gen: IdGenerator,
}

impl TeamService {
    /// Create a new team service.
    #[must_use]
    pub const fn new(team_repo: TeamRepository, upload_repo: UploadRepository) -> Self {
        Self {
            team_repo,
            upload_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Active advisors in display order, with images resolved.
    pub async fn list_advisors(&self) -> AppResult<Vec<TeamMemberView>> {
        let members = self.team_repo.find_active().await?;

        let image_ids: Vec<String> = members
            .iter()
            .filter_map(|member| member.image_id.clone())
            .collect();
        let uploads = self.upload_repo.find_by_ids(&image_ids).await?;

        Ok(members
            .into_iter()
            .map(|member| {
                let image = member
                    .image_id
                    .as_ref()
                    .and_then(|id| uploads.iter().find(|upload| &upload.id == id));
                TeamMemberView::new(member, image)
            })
            .collect())
    }

    /// Add a team member. Admins only.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateTeamMemberInput,
    ) -> AppResult<TeamMemberView> {
        actor.require_admin("manage the team")?;
        let input = CreateTeamMemberInput {
            email: non_blank(input.email),
            linked_in: non_blank(input.linked_in),
            twitter: non_blank(input.twitter),
            ..input
        };
        input.validate()?;

        let image = self.require_upload(&input.image_id).await?;

        let display_order = match input.display_order {
            Some(order) => order,
            None => self
                .team_repo
                .max_display_order()
                .await?
                .unwrap_or(0)
                .saturating_add(1),
        };

        let model = team::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            role: Set(input.role),
            bio: Set(input.bio.map(|bio| normalize(bio).into_value())),
            image_id: Set(Some(input.image_id)),
            linked_in: Set(input.linked_in),
            twitter: Set(input.twitter),
            email: Set(input.email),
            status: Set(input.status),
            display_on_home: Set(input.display_on_home),
            display_order: Set(display_order),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let member = self.team_repo.create(model).await?;
        info!(member_id = %member.id, actor = %actor.name, "Team member created");
        Ok(TeamMemberView::new(member, Some(&image)))
    }

    /// Update a team member. Admins only.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        input: UpdateTeamMemberInput,
    ) -> AppResult<TeamMemberView> {
        actor.require_admin("manage the team")?;
        input.validate()?;

        let existing = self
            .team_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

        let image_id = input.image_id.clone().or_else(|| existing.image_id.clone());
        let image = match &image_id {
            Some(image_id) => Some(self.require_upload(image_id).await?),
            None => None,
        };

        let mut model: team::ActiveModel = existing.into();

        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(role) = input.role {
            model.role = Set(role);
        }
        if let Some(bio) = input.bio {
            model.bio = Set(Some(normalize(bio).into_value()));
        }
        if input.image_id.is_some() {
            model.image_id = Set(image_id);
        }
        if let Some(linked_in) = input.linked_in {
            model.linked_in = Set(non_blank(Some(linked_in)));
        }
        if let Some(twitter) = input.twitter {
            model.twitter = Set(non_blank(Some(twitter)));
        }
        if let Some(email) = input.email {
            model.email = Set(non_blank(Some(email)));
        }
        if let Some(status) = input.status {
            model.status = Set(status);
        }
        if let Some(display_on_home) = input.display_on_home {
            model.display_on_home = Set(display_on_home);
        }
        if let Some(display_order) = input.display_order {
            model.display_order = Set(display_order);
        }
        model.updated_at = Set(Some(Utc::now()));

        let member = self.team_repo.update(model).await?;
        info!(member_id = %member.id, actor = %actor.name, "Team member updated");
        Ok(TeamMemberView::new(member, image.as_ref()))
    }

    /// Remove a team member. Admins only.
    pub async fn delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        actor.require_admin("manage the team")?;

        if !self.team_repo.delete(id).await? {
            return Err(AppError::NotFound("Team member not found".to_string()));
        }

        info!(member_id = %id, actor = %actor.name, "Team member deleted");
        Ok(())
    }

    async fn require_upload(&self, image_id: &str) -> AppResult<upload::Model> {
        self.upload_repo
            .find_by_ids(&[image_id.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Validation(format!("Unknown upload {image_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obf_common::ActorRole;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn test_upload(id: &str, filename: &str) -> upload::Model {
        upload::Model {
            id: id.to_string(),
            filename: filename.to_string(),
            original_name: filename.to_string(),
            mime_type: "image/jpeg".to_string(),
            size: 10,
            md5: "0".repeat(32),
            storage_key: format!("uploads/2025/01/01/{filename}"),
            url: format!("/api/uploads/file/{filename}"),
            alt: Some("portrait".to_string()),
            created_at: Utc::now(),
        }
    }

    fn test_member(id: &str, image_id: Option<&str>, display_order: i32) -> team::Model {
        team::Model {
            id: id.to_string(),
            name: "Asha Rao".to_string(),
            role: "Advisor".to_string(),
            bio: Some(json!("Economist\nAuthor")),
            image_id: image_id.map(ToString::to_string),
            linked_in: None,
            twitter: None,
            email: None,
            status: TeamStatus::Active,
            display_on_home: true,
            display_order,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn create_input() -> CreateTeamMemberInput {
        CreateTeamMemberInput {
            name: "Asha Rao".to_string(),
            role: "Advisor".to_string(),
            bio: None,
            image_id: "u1".to_string(),
            linked_in: Some("  ".to_string()),
            twitter: None,
            email: Some(String::new()),
            status: TeamStatus::Active,
            display_on_home: false,
            display_order: None,
        }
    }

    fn service(db: Arc<DatabaseConnection>) -> TeamService {
        TeamService::new(TeamRepository::new(db.clone()), UploadRepository::new(db))
    }

    fn admin() -> Actor {
        Actor::new("root", ActorRole::Admin)
    }

    #[test]
    fn test_known_upload_uses_static_path() {
        let image = TeamImage::from_upload(&test_upload("u1", "events.webp")).unwrap();
        assert_eq!(image.url, "/images/events.webp");

        let image = TeamImage::from_upload(&test_upload("u2", "asha.jpg")).unwrap();
        assert_eq!(image.url, "/api/uploads/file/asha.jpg");
        assert_eq!(image.alt.as_deref(), Some("portrait"));
    }

    #[tokio::test]
    async fn test_list_advisors_resolves_images_and_bios() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_member("t1", Some("u1"), 1),
                    test_member("t2", None, 2),
                ]])
                .append_query_results([[test_upload("u1", "asha.jpg")]])
                .into_connection(),
        );

        let advisors = service(db).list_advisors().await.unwrap();

        assert_eq!(advisors.len(), 2);
        assert_eq!(
            advisors[0].image.as_ref().map(|i| i.url.as_str()),
            Some("/api/uploads/file/asha.jpg")
        );
        assert!(advisors[1].image.is_none());

        let bio = advisors[0].bio.as_ref().unwrap();
        assert_eq!(bio.as_value()["root"]["children"].as_array().unwrap().len(), 2);
        assert_eq!(bio.to_plain_text(), "Economist\nAuthor");
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let err = service(db)
            .create(&Actor::new("writer", ActorRole::Editor), create_input())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_upload() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<upload::Model>::new()])
                .into_connection(),
        );

        let err = service(db).create(&admin(), create_input()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let input = CreateTeamMemberInput {
            email: Some("not-an-address".to_string()),
            ..create_input()
        };
        let err = service(db).create(&admin(), input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_appends_after_highest_order() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_upload("u1", "asha.jpg")]])
                .append_query_results([[test_member("t0", None, 41)]])
                .append_query_results([[test_member("t1", Some("u1"), 42)]])
                .into_connection(),
        );
        let service = service(Arc::clone(&db));

        let view = service.create(&admin(), create_input()).await.unwrap();
        assert_eq!(view.display_order, 42);
        assert_eq!(view.image.map(|i| i.filename), Some("asha.jpg".to_string()));

        drop(service);
        let log = format!("{:?}", Arc::try_unwrap(db).unwrap().into_transaction_log());
        assert!(log.contains("Int(Some(42))"));
    }

    #[tokio::test]
    async fn test_display_order_does_not_overflow() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_upload("u1", "asha.jpg")]])
                .append_query_results([[test_member("t0", None, i32::MAX)]])
                .append_query_results([[test_member("t1", Some("u1"), i32::MAX)]])
                .into_connection(),
        );

        let view = service(db).create(&admin(), create_input()).await.unwrap();
        assert_eq!(view.display_order, i32::MAX);
    }

    #[tokio::test]
    async fn test_update_normalizes_bio() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_member("t1", Some("u1"), 1)]])
                .append_query_results([[test_upload("u1", "asha.jpg")]])
                .append_query_results([[test_member("t1", Some("u1"), 1)]])
                .into_connection(),
        );
        let service = service(Arc::clone(&db));

        let input = UpdateTeamMemberInput {
            bio: Some(json!("Former diplomat\nBoard member")),
            ..UpdateTeamMemberInput::default()
        };
        service.update(&admin(), "t1", input).await.unwrap();

        drop(service);
        let log = format!("{:?}", Arc::try_unwrap(db).unwrap().into_transaction_log());
        assert!(log.contains(r#"String("Former diplomat")"#));
        assert!(log.contains(r#"String("Board member")"#));
        assert!(!log.contains(r"Former diplomat\nBoard member"));
    }

    #[tokio::test]
    async fn test_update_unknown_member_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<team::Model>::new()])
                .into_connection(),
        );

        let err = service(db)
            .update(&admin(), "missing", UpdateTeamMemberInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
