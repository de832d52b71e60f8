//! Application configuration.

use serde::Deserialize;
use std::path::Path;

use crate::actor::ActorRole;
use crate::storage::StorageConfig;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Outgoing mail configuration. Mail is disabled when absent.
    #[serde(default)]
    pub email: Option<EmailSettings>,
    /// Administrative access configuration.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Homepage settings behaviour.
    #[serde(default)]
    pub homepage: HomepageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of the site.
    pub url: String,
    /// Maximum accepted request body for multipart uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// SMTP settings for notification mail.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    /// SMTP relay host.
    pub host: String,
    /// SMTP port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Recipients of contact form submissions.
    #[serde(default = "default_contact_recipients")]
    pub contact_recipients: Vec<String>,
}

/// Administrative access configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Static bearer tokens accepted for administrative requests.
    #[serde(default)]
    pub tokens: Vec<AdminToken>,
}

/// A bearer token bound to a named actor.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    /// The bearer token value.
    pub token: String,
    /// Display name of the actor.
    pub name: String,
    /// Role granted to the actor.
    #[serde(default)]
    pub role: ActorRole,
}

/// Homepage settings behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct HomepageConfig {
    /// How many times the singleton existence check is attempted before failing open.
    #[serde(default = "default_existence_check_attempts")]
    pub existence_check_attempts: u32,
    /// Initial backoff between existence check attempts, doubled after each failure.
    #[serde(default = "default_existence_check_backoff_ms")]
    pub existence_check_backoff_ms: u64,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            existence_check_attempts: default_existence_check_attempts(),
            existence_check_backoff_ms: default_existence_check_backoff_ms(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "hello@t9l.com".to_string()
}

fn default_from_name() -> String {
    "T9L Venture".to_string()
}

fn default_contact_recipients() -> Vec<String> {
    vec!["arun@t9l.com".to_string()]
}

const fn default_existence_check_attempts() -> u32 {
    3
}

const fn default_existence_check_backoff_ms() -> u64 {
    50
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `OBF_ENV`)
    /// 3. Environment variables with `OBF_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("OBF_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("OBF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("OBF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .and_then(config::Config::try_deserialize)
            .unwrap()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = from_toml(
            r#"
            [server]
            url = "https://onebigfuture.in"

            [database]
            url = "postgres://localhost/obf"
            "#,
        );

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.homepage.existence_check_attempts, 3);
        assert!(config.email.is_none());
        assert!(config.admin.tokens.is_empty());
        assert!(matches!(config.storage, StorageConfig::Local { .. }));
    }

    #[test]
    fn test_admin_tokens_and_s3_storage() {
        let config = from_toml(
            r#"
            [server]
            url = "https://onebigfuture.in"

            [database]
            url = "postgres://localhost/obf"

            [storage]
            backend = "s3"
            endpoint = "https://s3.ap-south-1.amazonaws.com"
            bucket = "obf-uploads"
            region = "ap-south-1"
            access_key_id = "key"
            secret_access_key = "secret"

            [[admin.tokens]]
            token = "t0k3n"
            name = "Editor"
            role = "editor"
            "#,
        );

        assert_eq!(config.admin.tokens.len(), 1);
        assert_eq!(config.admin.tokens[0].role, ActorRole::Editor);
        assert!(matches!(config.storage, StorageConfig::S3 { .. }));
    }
}
