pub mod models;
pub mod serializers;
pub mod urls;
pub mod views;

use anyhow::{bail, Result};
use fynd_ai::AiClient;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub ai: AiClient,
}

/// Runtime configuration, read from the environment once at process start.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Required: the process refuses to start without it.
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Allowed cross-origin request sources; `*` means any.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if gemini_api_key.trim().is_empty() {
            bail!("GEMINI_API_KEY is not set");
        }

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://reviews.db?mode=rwc".into());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            gemini_api_key,
            gemini_model,
            cors_origins,
        })
    }
}

/// Ensure DB schema is up-to-date (calls migration crate).
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<()> {
    use migration::Migrator;
    use sea_orm_migration::migrator::MigratorTrait;
    Migrator::up(db, None).await?;
    Ok(())
}
