//! Database entities.

#![allow(missing_docs)]

pub mod analytics_event;
pub mod homepage_settings;
pub mod job;
pub mod job_application;
pub mod partner;
pub mod team;
pub mod upload;

pub use analytics_event::Entity as AnalyticsEvent;
pub use homepage_settings::Entity as HomepageSettings;
pub use job::Entity as Job;
pub use job_application::Entity as JobApplication;
pub use partner::Entity as Partner;
pub use team::Entity as Team;
pub use upload::Entity as Upload;
