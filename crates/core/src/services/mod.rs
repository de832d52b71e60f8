//! Business logic services.

#![allow(missing_docs)]

pub mod analytics;
pub mod asset_url;
pub mod contact;
pub mod email;
pub mod homepage_defaults;
pub mod homepage_settings;
pub mod job;
pub mod job_application;
pub mod partner;
pub mod singleton_guard;
pub mod team;
pub mod upload;

pub use analytics::{AnalyticsService, ClientInfo, TrackEventInput};
pub use asset_url::{UPLOADS_ROUTE, resolve_url, resolve_url_or, static_asset_path};
pub use contact::{ContactService, ContactSubmission};
pub use email::{EmailService, Mailer, OutgoingEmail};
pub use homepage_settings::{
    CardInput, ComingSoonCard, HomepageSettings, HomepageSettingsInput, HomepageSettingsService,
    PublicCard, PublicHomepage, SocialNetwork, SocialNetworkInput,
};
pub use job::{CreateJobInput, ExtraSection, JobService, JobView, Page, PageQuery, UpdateJobInput};
pub use job_application::{
    ApplicationReceipt, ApplicationSubmission, ApplicationView, JobApplicationService,
};
pub use partner::{CreatePartnerInput, PartnerImage, PartnerService, PublicPartner};
pub use singleton_guard::{
    Occupancy, RetryPolicy, SINGLETON_VIOLATION, SingletonGuard, SingletonStore, WriteOperation,
};
pub use team::{
    CreateTeamMemberInput, TeamImage, TeamMemberView, TeamService, UpdateTeamMemberInput,
};
pub use upload::{NewUpload, UploadService, is_accepted_mime};
