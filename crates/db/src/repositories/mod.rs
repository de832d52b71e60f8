//! Data access repositories.

mod analytics;
mod homepage_settings;
mod job;
mod job_application;
mod partner;
mod team;
mod upload;

pub use analytics::AnalyticsRepository;
pub use homepage_settings::{HOMEPAGE_SETTINGS_ID, HomepageSettingsRepository};
pub use job::JobRepository;
pub use job_application::JobApplicationRepository;
pub use partner::PartnerRepository;
pub use team::TeamRepository;
pub use upload::UploadRepository;
