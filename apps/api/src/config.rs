use anyhow::{Context, Result};

/// Application configuration loaded from environment variables, assembled
/// once at startup and passed by reference — no ambient global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub audit_log_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            audit_log_path: std::env::var("AUDIT_LOG_PATH")
                .unwrap_or_else(|_| "audit.jsonl".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
