//! API middleware.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use obf_common::config::AdminConfig;
use obf_common::{Actor, Config, StorageBackend};
use obf_core::{
    AnalyticsService, ContactService, HomepageSettingsService, JobApplicationService, JobService,
    Mailer, PartnerService, RetryPolicy, TeamService, UploadService,
};
use obf_db::repositories::{
    AnalyticsRepository, HomepageSettingsRepository, JobApplicationRepository, JobRepository,
    PartnerRepository, TeamRepository, UploadRepository,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub homepage_settings_service: HomepageSettingsService,
    pub job_service: JobService,
    pub job_application_service: JobApplicationService,
    pub partner_service: PartnerService,
    pub team_service: TeamService,
    pub upload_service: UploadService,
    pub contact_service: ContactService,
    pub analytics_service: AnalyticsService,
    pub tokens: Arc<TokenRegistry>,
}

impl AppState {
    /// Wire every service to the given connection, storage and mailer.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        storage: Arc<dyn StorageBackend>,
        mailer: Arc<dyn Mailer>,
        config: &Config,
    ) -> Self {
        let upload_repo = UploadRepository::new(Arc::clone(&db));
        let job_repo = JobRepository::new(Arc::clone(&db));

        let upload_service = UploadService::new(upload_repo.clone(), storage);
        let contact_recipients = config
            .email
            .as_ref()
            .map(|email| email.contact_recipients.clone())
            .unwrap_or_default();

        Self {
            homepage_settings_service: HomepageSettingsService::new(
                HomepageSettingsRepository::new(Arc::clone(&db)),
                RetryPolicy::from_config(&config.homepage),
            ),
            job_service: JobService::new(job_repo.clone()),
            job_application_service: JobApplicationService::new(
                JobApplicationRepository::new(Arc::clone(&db)),
                job_repo,
                upload_service.clone(),
                Arc::clone(&mailer),
            ),
            partner_service: PartnerService::new(
                PartnerRepository::new(Arc::clone(&db)),
                upload_repo.clone(),
            ),
            team_service: TeamService::new(TeamRepository::new(Arc::clone(&db)), upload_repo),
            upload_service,
            contact_service: ContactService::new(mailer, contact_recipients),
            analytics_service: AnalyticsService::new(AnalyticsRepository::new(db)),
            tokens: Arc::new(TokenRegistry::from_config(&config.admin)),
        }
    }
}

/// Bearer tokens and the actors they stand for.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    actors: HashMap<String, Actor>,
}

impl TokenRegistry {
    /// Build the registry from the `admin.tokens` configuration.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        let mut actors = HashMap::new();
        for entry in &config.tokens {
            if entry.token.trim().is_empty() {
                warn!(actor = %entry.name, "Ignoring admin token entry with an empty token");
                continue;
            }
            actors.insert(entry.token.clone(), Actor::new(entry.name.clone(), entry.role));
        }
        Self { actors }
    }

    /// The actor a token belongs to.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Actor> {
        self.actors.get(token).cloned()
    }
}

/// Authentication middleware.
///
/// Places the [`Actor`] behind a known bearer token in the request
/// extensions. Requests without one proceed anonymously.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(header::AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.tokens.resolve(token.trim()) {
            Some(actor) => {
                debug!(actor = %actor.name, "Request authenticated");
                req.extensions_mut().insert(actor);
            }
            None => debug!("Unknown bearer token, continuing anonymously"),
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use obf_common::ActorRole;
    use obf_common::config::AdminToken;

    #[test]
    fn test_registry_resolves_configured_tokens() {
        let registry = TokenRegistry::from_config(&AdminConfig {
            tokens: vec![
                AdminToken {
                    token: "s3cret".to_string(),
                    name: "ops".to_string(),
                    role: ActorRole::Admin,
                },
                AdminToken {
                    token: "  ".to_string(),
                    name: "blank".to_string(),
                    role: ActorRole::Admin,
                },
            ],
        });

        assert_eq!(registry.resolve("s3cret").map(|a| a.name), Some("ops".to_string()));
        assert!(registry.resolve("  ").is_none());
        assert!(registry.resolve("other").is_none());
    }
}
