//! Job posting service.

use chrono::{DateTime, Utc};
use obf_common::{Actor, AppError, AppResult, IdGenerator};
use obf_db::entities::job::{self, JobStatus, LocationType};
use obf_db::repositories::JobRepository;
use obf_richtext::{RichText, normalize};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use validator::{Validate, ValidateEmail, ValidationError};

/// Page size when none is requested.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Extra titled sections a job may carry.
pub const MAX_EXTRA_SECTIONS: usize = 4;

/// Paginated listing envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub total_pages: u64,
    pub page: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl<T> Page<T> {
    /// Wrap one page of `docs` out of `total_docs`.
    #[must_use]
    pub fn new(docs: Vec<T>, total_docs: u64, page: u64, limit: u64) -> Self {
        let total_pages = total_docs.div_ceil(limit.max(1)).max(1);
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;

        Self {
            docs,
            total_docs,
            total_pages,
            page,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then_some(page + 1),
            prev_page: has_prev_page.then(|| page - 1),
        }
    }
}

/// Query parameters of a paginated listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Page number (from 1) and clamped page size.
    #[must_use]
    pub fn resolve(self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }
}

/// A titled free-form section of a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtraSection {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[serde(default = "RichText::empty")]
    pub description: RichText,
}

/// A job posting, read-path normalized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: String,
    pub title: String,
    pub location_type: LocationType,
    pub location_type_other: Option<String>,
    pub location: String,
    /// Omitted from public responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_emails: Option<String>,
    pub the_role: RichText,
    pub what_you_do: RichText,
    pub what_were_looking_for: RichText,
    pub preferred_experience: Option<RichText>,
    #[serde(rename = "lifeAtOBF")]
    pub life_at_obf: Option<RichText>,
    pub how_to_apply: Option<RichText>,
    pub extra_sections: Vec<ExtraSection>,
    pub status: JobStatus,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobView {
    /// Admin view, including notification addresses.
    #[must_use]
    pub fn admin(model: job::Model) -> Self {
        let emails = model.notification_emails.clone();
        Self {
            notification_emails: Some(emails),
            ..Self::public(model)
        }
    }

    /// Public view.
    #[must_use]
    pub fn public(model: job::Model) -> Self {
        Self {
            extra_sections: read_extra_sections(&model.id, model.extra_sections),
            id: model.id,
            title: model.title,
            location_type: model.location_type,
            location_type_other: model.location_type_other,
            location: model.location,
            notification_emails: None,
            the_role: normalize(model.the_role),
            what_you_do: normalize(model.what_you_do),
            what_were_looking_for: normalize(model.what_were_looking_for),
            preferred_experience: model.preferred_experience.map(normalize),
            life_at_obf: model.life_at_obf.map(normalize),
            how_to_apply: model.how_to_apply.map(normalize),
            status: model.status,
            display_order: model.display_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn read_extra_sections(job_id: &str, value: Value) -> Vec<ExtraSection> {
    match serde_json::from_value(value) {
        Ok(sections) => sections,
        Err(e) => {
            warn!(job_id, error = %e, "Ignoring malformed extra sections");
            Vec::new()
        }
    }
}

/// Input for creating a job.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    pub location_type: LocationType,
    #[validate(length(max = 128))]
    pub location_type_other: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub location: String,
    #[validate(custom(function = "validate_notification_emails"))]
    pub notification_emails: String,
    pub the_role: Value,
    pub what_you_do: Value,
    pub what_were_looking_for: Value,
    pub preferred_experience: Option<Value>,
    #[serde(rename = "lifeAtOBF")]
    pub life_at_obf: Option<Value>,
    pub how_to_apply: Option<Value>,
    #[validate(nested)]
    #[serde(default)]
    pub extra_sections: Vec<ExtraSection>,
    #[serde(default)]
    pub status: JobStatus,
    /// Zero or absent places the job after every existing one.
    pub display_order: Option<i32>,
}

/// Input for updating a job. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    pub location_type: Option<LocationType>,
    #[validate(length(max = 128))]
    pub location_type_other: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub location: Option<String>,
    #[validate(custom(function = "validate_notification_emails"))]
    pub notification_emails: Option<String>,
    pub the_role: Option<Value>,
    pub what_you_do: Option<Value>,
    pub what_were_looking_for: Option<Value>,
    pub preferred_experience: Option<Value>,
    #[serde(rename = "lifeAtOBF")]
    pub life_at_obf: Option<Value>,
    pub how_to_apply: Option<Value>,
    #[validate(nested)]
    pub extra_sections: Option<Vec<ExtraSection>>,
    pub status: Option<JobStatus>,
    pub display_order: Option<i32>,
}

/// Split a notification address list on commas and newlines.
#[must_use]
pub fn split_emails(list: &str) -> Vec<String> {
    list.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn validate_notification_emails(list: &str) -> Result<(), ValidationError> {
    let emails = split_emails(list);
    if emails.is_empty() || emails.iter().any(|email| !email.validate_email()) {
        return Err(ValidationError::new("notification_emails"));
    }
    Ok(())
}

fn require_other_location(
    location_type: LocationType,
    location_type_other: Option<&str>,
) -> AppResult<()> {
    if location_type == LocationType::Other && location_type_other.is_none_or(str::is_empty) {
        return Err(AppError::Validation(
            "locationTypeOther is required when locationType is other".to_string(),
        ));
    }
    Ok(())
}

/// Service for job postings.
#[derive(Clone)]
pub struct JobService {
    job_repo: JobRepository,
    id_gen: IdGenerator,
}

impl JobService {
    /// Create a new job service.
    #[must_use]
    pub const fn new(job_repo: JobRepository) -> Self {
        Self {
            job_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// One page of published jobs, lowest display order first.
    pub async fn list_published(&self, query: PageQuery) -> AppResult<Page<JobView>> {
        let (page, limit) = query.resolve();
        let total = self.job_repo.count_published().await?;
        let offset = (page - 1).saturating_mul(limit);
        let jobs = if offset < total {
            self.job_repo.find_published(limit, offset).await?
        } else {
            Vec::new()
        };

        Ok(Page::new(
            jobs.into_iter().map(JobView::public).collect(),
            total,
            page,
            limit,
        ))
    }

    /// A published job by ID.
    pub async fn get_published(&self, id: &str) -> AppResult<JobView> {
        self.job_repo
            .find_by_id(id)
            .await?
            .filter(|job| job.status == JobStatus::Published)
            .map(JobView::public)
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    /// Any job by ID, including unpublished ones.
    pub async fn get(&self, id: &str) -> AppResult<job::Model> {
        self.job_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    /// Create a job. Admins only.
    pub async fn create(&self, actor: &Actor, input: CreateJobInput) -> AppResult<JobView> {
        actor.require_admin("create jobs")?;
        input.validate()?;
        require_other_location(input.location_type, input.location_type_other.as_deref())?;

        let display_order = match input.display_order.filter(|order| *order != 0) {
            Some(order) => order,
            None => self
                .job_repo
                .max_display_order()
                .await?
                .unwrap_or(0)
                .saturating_add(1),
        };

        let model = job::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            location_type: Set(input.location_type),
            location_type_other: Set(input.location_type_other),
            location: Set(input.location),
            notification_emails: Set(input.notification_emails),
            the_role: Set(normalize(input.the_role).into_value()),
            what_you_do: Set(normalize(input.what_you_do).into_value()),
            what_were_looking_for: Set(normalize(input.what_were_looking_for).into_value()),
            preferred_experience: Set(input.preferred_experience.map(normalized)),
            life_at_obf: Set(input.life_at_obf.map(normalized)),
            how_to_apply: Set(input.how_to_apply.map(normalized)),
            extra_sections: Set(sections_json(&input.extra_sections)?),
            status: Set(input.status),
            display_order: Set(display_order),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let job = self.job_repo.create(model).await?;
        info!(job_id = %job.id, actor = %actor.name, "Job created");
        Ok(JobView::admin(job))
    }

    /// Update a job. Admins only.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        input: UpdateJobInput,
    ) -> AppResult<JobView> {
        actor.require_admin("update jobs")?;
        input.validate()?;

        let existing = self.get(id).await?;
        require_other_location(
            input.location_type.unwrap_or(existing.location_type),
            input
                .location_type_other
                .as_deref()
                .or(existing.location_type_other.as_deref()),
        )?;

        let mut model: job::ActiveModel = existing.into();

        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(location_type) = input.location_type {
            model.location_type = Set(location_type);
        }
        if let Some(other) = input.location_type_other {
            model.location_type_other = Set(Some(other));
        }
        if let Some(location) = input.location {
            model.location = Set(location);
        }
        if let Some(emails) = input.notification_emails {
            model.notification_emails = Set(emails);
        }
        if let Some(value) = input.the_role {
            model.the_role = Set(normalized(value));
        }
        if let Some(value) = input.what_you_do {
            model.what_you_do = Set(normalized(value));
        }
        if let Some(value) = input.what_were_looking_for {
            model.what_were_looking_for = Set(normalized(value));
        }
        if let Some(value) = input.preferred_experience {
            model.preferred_experience = Set(Some(normalized(value)));
        }
        if let Some(value) = input.life_at_obf {
            model.life_at_obf = Set(Some(normalized(value)));
        }
        if let Some(value) = input.how_to_apply {
            model.how_to_apply = Set(Some(normalized(value)));
        }
        if let Some(sections) = input.extra_sections {
            model.extra_sections = Set(sections_json(&sections)?);
        }
        if let Some(status) = input.status {
            model.status = Set(status);
        }
        if let Some(display_order) = input.display_order {
            model.display_order = Set(display_order);
        }
        model.updated_at = Set(Some(Utc::now()));

        let job = self.job_repo.update(model).await?;
        info!(job_id = %job.id, actor = %actor.name, "Job updated");
        Ok(JobView::admin(job))
    }

    /// Delete a job and its applications. Admins only.
    pub async fn delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        actor.require_admin("delete jobs")?;

        if !self.job_repo.delete(id).await? {
            return Err(AppError::NotFound("Job not found".to_string()));
        }

        info!(job_id = %id, actor = %actor.name, "Job deleted");
        Ok(())
    }
}

fn normalized(value: Value) -> Value {
    normalize(value).into_value()
}

fn sections_json(sections: &[ExtraSection]) -> AppResult<Value> {
    if sections.len() > MAX_EXTRA_SECTIONS {
        return Err(AppError::Validation(format!(
            "At most {MAX_EXTRA_SECTIONS} extra sections are allowed"
        )));
    }
    serde_json::to_value(sections).map_err(|e| AppError::Internal(e.to_string()))
}
