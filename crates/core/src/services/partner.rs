//! Partner service.

use std::collections::HashMap;

use chrono::Utc;
use obf_common::{Actor, AppError, AppResult, IdGenerator};
use obf_db::entities::{partner, upload};
use obf_db::repositories::{PartnerRepository, UploadRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use super::asset_url::static_asset_path;

/// Image of a partner as served to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A partner as listed on the public site.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPartner {
    pub id: String,
    pub name: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub order: i32,
    pub image: Option<PartnerImage>,
}

/// Input for creating a partner.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(max = 256))]
    pub full_name: Option<String>,
    #[validate(length(max = 4000))]
    pub bio: Option<String>,
    /// Uploaded image.
    pub image_id: Option<String>,
    /// Path of an image shipped with the static site; wins over `image_id`.
    #[validate(length(max = 512))]
    pub image_static_path: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    pub order: i32,
}

/// Choose the image a partner is shown with.
///
/// A static path wins; otherwise the upload is used, moved to its static-site
/// path when its file name is a known one.
#[must_use]
pub fn partner_image(
    image_static_path: Option<&str>,
    upload: Option<&upload::Model>,
) -> Option<PartnerImage> {
    if let Some(path) = image_static_path.filter(|p| !p.is_empty()) {
        let url = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        return Some(PartnerImage {
            url,
            filename: None,
            alt: None,
        });
    }

    upload.map(|upload| PartnerImage {
        url: static_asset_path(&upload.filename)
            .map_or_else(|| upload.url.clone(), ToString::to_string),
        filename: Some(upload.filename.clone()),
        alt: upload.alt.clone(),
    })
}

/// Service for partners.
#[derive(Clone)]
pub struct PartnerService {
    partner_repo: PartnerRepository,
    upload_repo: UploadRepository,
    id_gen: IdGenerator,
}

impl PartnerService {
    /// Create a new partner service.
    #[must_use]
    pub const fn new(partner_repo: PartnerRepository, upload_repo: UploadRepository) -> Self {
        Self {
            partner_repo,
            upload_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All partners in display order, with resolved images.
    pub async fn list_public(&self) -> AppResult<Vec<PublicPartner>> {
        let partners = self.partner_repo.find_all().await?;

        let image_ids: Vec<String> = partners
            .iter()
            .filter_map(|partner| partner.image_id.clone())
            .collect();
        let uploads: HashMap<String, upload::Model> = self
            .upload_repo
            .find_by_ids(&image_ids)
            .await?
            .into_iter()
            .map(|upload| (upload.id.clone(), upload))
            .collect();

        Ok(partners
            .into_iter()
            .map(|partner| {
                let image = partner_image(
                    partner.image_static_path.as_deref(),
                    partner.image_id.as_ref().and_then(|id| uploads.get(id)),
                );
                PublicPartner {
                    id: partner.id,
                    name: partner.name,
                    full_name: partner.full_name,
                    bio: partner.bio,
                    website: partner.website,
                    order: partner.display_order,
                    image,
                }
            })
            .collect())
    }

    /// Create a partner.
    pub async fn create(&self, actor: &Actor, input: CreatePartnerInput) -> AppResult<partner::Model> {
        let input = CreatePartnerInput {
            website: input.website.filter(|w| !w.trim().is_empty()),
            ..input
        };
        input.validate()?;

        if let Some(image_id) = &input.image_id {
            let found = self
                .upload_repo
                .find_by_ids(std::slice::from_ref(image_id))
                .await?;
            if found.is_empty() {
                return Err(AppError::Validation(format!("Unknown upload {image_id}")));
            }
        }

        let model = partner::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            full_name: Set(input.full_name),
            bio: Set(input.bio),
            image_id: Set(input.image_id),
            image_static_path: Set(input.image_static_path),
            website: Set(input.website),
            display_order: Set(input.order),
            created_at: Set(Utc::now()),
        };

        let partner = self.partner_repo.create(model).await?;
        info!(partner_id = %partner.id, actor = %actor.name, "Partner created");
        Ok(partner)
    }

    /// Delete a partner.
    pub async fn delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        if !self.partner_repo.delete(id).await? {
            return Err(AppError::NotFound("Partner not found".to_string()));
        }

        info!(partner_id = %id, actor = %actor.name, "Partner deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obf_common::ActorRole;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_upload(id: &str, filename: &str) -> upload::Model {
        upload::Model {
            id: id.to_string(),
            filename: filename.to_string(),
            original_name: filename.to_string(),
            mime_type: "image/webp".to_string(),
            size: 10,
            md5: "0".repeat(32),
            storage_key: format!("uploads/2025/01/01/{filename}"),
            url: format!("/api/uploads/file/{filename}"),
            alt: Some("logo".to_string()),
            created_at: Utc::now(),
        }
    }

    fn test_partner(id: &str, image_id: Option<&str>, static_path: Option<&str>) -> partner::Model {
        partner::Model {
            id: id.to_string(),
            name: "IAMAI".to_string(),
            full_name: None,
            bio: None,
            image_id: image_id.map(ToString::to_string),
            image_static_path: static_path.map(ToString::to_string),
            website: None,
            display_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_static_path_wins() {
        let upload = test_upload("u1", "iamai.webp");
        let image = partner_image(Some("images/partners/x.png"), Some(&upload)).unwrap();
        assert_eq!(image.url, "/images/partners/x.png");
    }

    #[test]
    fn test_known_upload_is_rewritten() {
        let image = partner_image(None, Some(&test_upload("u1", "T9L.webp"))).unwrap();
        assert_eq!(image.url, "/images/partners/t9l.jpg");
        assert_eq!(image.filename.as_deref(), Some("T9L.webp"));

        let other = partner_image(Some(""), Some(&test_upload("u2", "acme.png"))).unwrap();
        assert_eq!(other.url, "/api/uploads/file/acme.png");

        assert!(partner_image(None, None).is_none());
    }

    #[tokio::test]
    async fn test_list_public_resolves_images() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_partner("p1", Some("u1"), None),
                    test_partner("p2", None, Some("/images/partners/custom.png")),
                    test_partner("p3", None, None),
                ]])
                .append_query_results([[test_upload("u1", "iamai.webp")]])
                .into_connection(),
        );
        let service = PartnerService::new(PartnerRepository::new(db.clone()), UploadRepository::new(db));

        let partners = service.list_public().await.unwrap();
        let urls: Vec<Option<&str>> = partners
            .iter()
            .map(|p| p.image.as_ref().map(|i| i.url.as_str()))
            .collect();
        assert_eq!(
            urls,
            vec![
                Some("/images/partners/iamai.jpg"),
                Some("/images/partners/custom.png"),
                None,
            ]
        );
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_upload() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<upload::Model>::new()])
                .into_connection(),
        );
        let service = PartnerService::new(PartnerRepository::new(db.clone()), UploadRepository::new(db));

        let input = CreatePartnerInput {
            name: "Acme".to_string(),
            full_name: None,
            bio: None,
            image_id: Some("missing".to_string()),
            image_static_path: None,
            website: None,
            order: 1,
        };
        let err = service
            .create(&Actor::new("editor", ActorRole::Editor), input)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
