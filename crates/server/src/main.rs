//! One Big Future site backend entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use obf_api::{AppState, auth_middleware, router as api_router};
use obf_common::{Config, LocalStorage, StorageBackend, StorageConfig};
use obf_core::EmailService;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Build the storage backend named by the configuration.
fn storage_backend(config: &StorageConfig) -> Result<Arc<dyn StorageBackend>, String> {
    match config {
        StorageConfig::Local {
            base_path,
            base_url,
        } => {
            info!(path = %base_path.display(), "Using local file storage");
            Ok(Arc::new(LocalStorage::new(
                base_path.clone(),
                base_url.clone(),
            )))
        }
        #[cfg(feature = "s3")]
        StorageConfig::S3 {
            endpoint,
            bucket,
            region,
            access_key_id,
            secret_access_key,
            public_url,
            prefix,
        } => {
            info!(bucket = %bucket, "Using S3 storage");
            Ok(Arc::new(obf_common::S3Storage::new(
                endpoint,
                bucket.clone(),
                region,
                access_key_id,
                secret_access_key,
                public_url.clone(),
                prefix.clone(),
            )))
        }
        #[cfg(not(feature = "s3"))]
        StorageConfig::S3 { .. } => {
            Err("S3 storage is configured but the server was built without the s3 feature".to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "obf=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting One Big Future backend...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = obf_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    obf_db::migrate(&db).await?;
    info!("Migrations completed");

    let storage = storage_backend(&config.storage)?;

    let email_service = EmailService::new(config.email.as_ref())?;
    if !email_service.is_enabled() {
        warn!("Email is not configured; contact form and application notifications will fail");
    }

    if config.admin.tokens.is_empty() {
        warn!("No admin tokens configured; editing endpoints are unreachable");
    }

    let state = AppState::new(Arc::new(db), storage, Arc::new(email_service), &config);

    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}
