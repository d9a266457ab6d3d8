use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://jobtracker.db?mode=rwc";
const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LLM_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openrouter_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    /// Upper bound on a whole request body, multipart uploads included.
    pub max_upload_bytes: usize,
    pub cors_origin: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:3000"),
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration for router tests: in-memory database, no real LLM endpoint.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            openrouter_api_key: "test-key".to_string(),
            llm_base_url: "http://127.0.0.1:9".to_string(),
            llm_model: "test/model".to_string(),
            llm_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
            cors_origin: "http://localhost:3000".to_string(),
            port: 8000,
            rust_log: "debug".to_string(),
        }
    }
}
