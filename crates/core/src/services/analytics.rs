//! Page analytics.

use chrono::Utc;
use obf_common::{AppResult, IdGenerator};
use obf_db::entities::analytics_event;
use obf_db::repositories::AnalyticsRepository;
use sea_orm::Set;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use validator::Validate;

/// An event reported by the site.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventInput {
    #[validate(length(min = 1, max = 128))]
    pub event_type: String,
    #[validate(length(max = 2048))]
    pub page: Option<String>,
    #[validate(length(max = 2048))]
    pub referrer: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

/// Facts about the reporting client taken from the request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Service recording analytics events.
#[derive(Clone)]
pub struct AnalyticsService {
    analytics_repo: AnalyticsRepository,
    id_gen: IdGenerator,
}

impl AnalyticsService {
    /// Create a new analytics service.
    #[must_use]
    pub const fn new(analytics_repo: AnalyticsRepository) -> Self {
        Self {
            analytics_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record an event.
    pub async fn track(&self, input: TrackEventInput, client: ClientInfo) -> AppResult<()> {
        input.validate()?;

        let model = analytics_event::ActiveModel {
            id: Set(self.id_gen.generate()),
            event_type: Set(input.event_type),
            page: Set(input.page),
            referrer: Set(input.referrer),
            user_agent: Set(client.user_agent),
            ip: Set(client.ip),
            metadata: Set(Value::Object(input.metadata.unwrap_or_default())),
            created_at: Set(Utc::now()),
        };

        let event = self.analytics_repo.create(model).await?;
        debug!(event_id = %event.id, event_type = %event.event_type, "Analytics event tracked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obf_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn stored_event() -> analytics_event::Model {
        analytics_event::Model {
            id: "e1".to_string(),
            event_type: "page_view".to_string(),
            page: Some("/".to_string()),
            referrer: None,
            user_agent: Some("curl/8".to_string()),
            ip: Some("203.0.113.7".to_string()),
            metadata: json!({}),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_track_event() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_event()]])
            .into_connection();
        let service = AnalyticsService::new(AnalyticsRepository::new(Arc::new(db)));

        let input: TrackEventInput =
            serde_json::from_value(json!({"eventType": "page_view", "page": "/"})).unwrap();
        let client = ClientInfo {
            user_agent: Some("curl/8".to_string()),
            ip: Some("203.0.113.7".to_string()),
        };

        assert!(service.track(input, client).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_event_type_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = AnalyticsService::new(AnalyticsRepository::new(Arc::new(db)));

        let input: TrackEventInput = serde_json::from_value(json!({"eventType": ""})).unwrap();
        assert!(matches!(
            service.track(input, ClientInfo::default()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_metadata_must_be_an_object() {
        let result: Result<TrackEventInput, _> =
            serde_json::from_value(json!({"eventType": "click", "metadata": [1, 2]}));
        assert!(result.is_err());
    }
}
