//! API endpoints.

mod analytics;
mod contact;
mod homepage_settings;
mod jobs;
mod partners;
mod public;
mod team;
mod uploads;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/public", public::router())
        .nest("/homepage-settings", homepage_settings::router())
        .nest("/jobs", jobs::router())
        .nest("/partners", partners::router())
        .nest("/team", team::router())
        .nest("/contact-us", contact::router())
        .nest("/analytics", analytics::router())
        .nest("/uploads", uploads::router())
}
