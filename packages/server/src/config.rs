use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use uuid::Uuid;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Process-wide default principal used in the minimal-trust deployment.
    /// Injected explicitly at startup rather than baked in as a global.
    pub default_owner_id: Uuid,
    pub storage_root: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            llm_api_key: env::var("LLM_API_KEY").context("LLM_API_KEY must be set")?,
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            default_owner_id: env::var("DEFAULT_OWNER_ID")
                .context("DEFAULT_OWNER_ID must be set")?
                .parse()
                .context("DEFAULT_OWNER_ID must be a valid UUID")?,
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".to_string()),
        })
    }
}
