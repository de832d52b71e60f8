//! Job application service.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use obf_common::{Actor, AppError, AppResult, IdGenerator};
use obf_db::entities::job_application::{self, ApplicationStatus};
use obf_db::entities::{job, upload};
use obf_db::repositories::{JobApplicationRepository, JobRepository};
use obf_richtext::html_escape;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::ValidateEmail;

use super::email::{Mailer, OutgoingEmail};
use super::job::split_emails;
use super::upload::{NewUpload, UploadService};

/// Storage scope of uploaded resumes.
const RESUME_SCOPE: &str = "resumes";

/// An application received from the careers page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub job_id: String,
    pub full_name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub notice_period: Option<String>,
    pub current_location: Option<String>,
    pub current_company: Option<String>,
    pub portfolio_url: Option<String>,
    #[serde(skip)]
    pub resume: Option<NewUpload>,
}

/// Reply to a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    pub success: bool,
    pub message: String,
    pub application_id: String,
}

/// An application as shown to admins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub full_name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub notice_period: Option<String>,
    pub current_location: Option<String>,
    pub current_company: Option<String>,
    pub portfolio_url: Option<String>,
    pub resume_id: Option<String>,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<job_application::Model> for ApplicationView {
    fn from(model: job_application::Model) -> Self {
        Self {
            id: model.id,
            job_id: model.job_id,
            job_title: model.job_title,
            full_name: model.full_name,
            email: model.email,
            contact_number: model.contact_number,
            notice_period: model.notice_period,
            current_location: model.current_location,
            current_company: model.current_company,
            portfolio_url: model.portfolio_url,
            resume_id: model.resume_id,
            status: model.status,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

/// Service for job applications.
#[derive(Clone)]
pub struct JobApplicationService {
    application_repo: JobApplicationRepository,
    job_repo: JobRepository,
    uploads: UploadService,
    mailer: Arc<dyn Mailer>,
    id_gen: IdGenerator,
}

impl JobApplicationService {
    /// Create a new job application service.
    #[must_use]
    pub fn new(
        application_repo: JobApplicationRepository,
        job_repo: JobRepository,
        uploads: UploadService,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            application_repo,
            job_repo,
            uploads,
            mailer,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record an application.
    ///
    /// A failed resume upload or notification mail is logged and does not
    /// fail the submission.
    pub async fn apply(&self, submission: ApplicationSubmission) -> AppResult<ApplicationReceipt> {
        let job_id = submission.job_id.trim();
        let full_name = submission.full_name.trim();
        let email = submission.email.trim();

        if job_id.is_empty() || full_name.is_empty() || email.is_empty() {
            return Err(AppError::BadRequest(
                "Missing required fields: jobId, fullName, and email are required".to_string(),
            ));
        }
        if !email.validate_email() {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }

        let job = self
            .job_repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        let resume = match submission.resume {
            Some(file) if !file.data.is_empty() => self.store_resume(file, full_name).await,
            _ => None,
        };

        let model = job_application::ActiveModel {
            id: Set(self.id_gen.generate()),
            job_id: Set(job.id.clone()),
            job_title: Set(job.title.clone()),
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            contact_number: Set(non_blank(submission.contact_number)),
            notice_period: Set(non_blank(submission.notice_period)),
            current_location: Set(non_blank(submission.current_location)),
            current_company: Set(non_blank(submission.current_company)),
            portfolio_url: Set(non_blank(submission.portfolio_url)),
            resume_id: Set(resume.as_ref().map(|upload| upload.id.clone())),
            cover_letter: Set(None),
            status: Set(ApplicationStatus::Pending),
            notes: Set(None),
            created_at: Set(Utc::now()),
        };

        let application = self.application_repo.create(model).await?;
        info!(application_id = %application.id, job_id = %job.id, "Job application received");

        self.notify(&job, &application, resume.as_ref()).await;

        Ok(ApplicationReceipt {
            success: true,
            message: "Application submitted successfully".to_string(),
            application_id: application.id,
        })
    }

    /// Applications for a job, newest first. Admins only.
    pub async fn list_for_job(&self, actor: &Actor, job_id: &str) -> AppResult<Vec<ApplicationView>> {
        actor.require_admin("view job applications")?;

        if self.job_repo.find_by_id(job_id).await?.is_none() {
            return Err(AppError::NotFound("Job not found".to_string()));
        }

        let applications = self.application_repo.find_by_job(job_id).await?;
        Ok(applications.into_iter().map(ApplicationView::from).collect())
    }

    async fn store_resume(&self, mut file: NewUpload, full_name: &str) -> Option<upload::Model> {
        file.alt = Some(format!("Resume - {full_name}"));

        match self.uploads.store(file, RESUME_SCOPE).await {
            Ok(upload) => Some(upload),
            Err(e) => {
                warn!(error = %e, "Resume upload failed, continuing without it");
                None
            }
        }
    }

    async fn notify(
        &self,
        job: &job::Model,
        application: &job_application::Model,
        resume: Option<&upload::Model>,
    ) {
        let recipients = split_emails(&job.notification_emails);
        if recipients.is_empty() {
            return;
        }

        let email = render_notification(job, application, resume, recipients);
        if let Err(e) = self.mailer.send(email).await {
            warn!(application_id = %application.id, error = %e, "Failed to send application notification");
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn render_notification(
    job: &job::Model,
    application: &job_application::Model,
    resume: Option<&upload::Model>,
    recipients: Vec<String>,
) -> OutgoingEmail {
    let rows = [
        ("Full Name", Some(application.full_name.as_str())),
        ("Email", Some(application.email.as_str())),
        ("Contact Number", application.contact_number.as_deref()),
        ("Notice Period", application.notice_period.as_deref()),
        ("Current Location", application.current_location.as_deref()),
        ("Current Company", application.current_company.as_deref()),
        ("Portfolio", application.portfolio_url.as_deref()),
        ("Resume", resume.map(|upload| upload.url.as_str())),
    ];

    let mut html = format!(
        "<h1>New application: {}</h1><table>",
        html_escape(&job.title)
    );
    let mut text = format!("New application: {}\n\n", job.title);
    for (label, value) in rows {
        let Some(value) = value else { continue };
        let _ = write!(
            html,
            "<tr><td><strong>{label}</strong></td><td>{}</td></tr>",
            html_escape(value)
        );
        let _ = writeln!(text, "{label}: {value}");
    }
    html.push_str("</table>");

    OutgoingEmail {
        to: recipients,
        subject: format!("New application for {} from {}", job.title, application.full_name),
        html,
        text,
        reply_to: Some(application.email.clone()),
    }
}
