//! Configuration module for the journal backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "./data/journal.sqlite";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_GENERATION_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GENERATION_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding the admin routes
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Keep data in memory only; nothing survives a restart
    pub ephemeral: bool,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Credential for the draft generation service
    pub generation_api_key: Option<String>,
    /// Model used for draft generation
    pub generation_model: String,
    /// Base URL of the generation REST API
    pub generation_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = non_empty_var("SERENE_API_PSK");

        let db_path = env::var("SERENE_DB_PATH")
            .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
            .into();

        let ephemeral = env::var("SERENE_EPHEMERAL")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let bind_addr = parse_bind_addr(env::var("SERENE_BIND_ADDR").ok());

        let log_level = env::var("SERENE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let generation_api_key =
            non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"));

        let generation_model = env::var("SERENE_GENERATION_MODEL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());

        let generation_url = env::var("SERENE_GENERATION_URL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_URL.to_string());

        Self {
            api_psk,
            db_path,
            ephemeral,
            bind_addr,
            log_level,
            generation_api_key,
            generation_model,
            generation_url,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bind_addr(raw: Option<String>) -> SocketAddr {
    let default: SocketAddr = ([127, 0, 0, 1], 8080).into();
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid SERENE_BIND_ADDR {:?}, falling back to {}",
                raw,
                DEFAULT_BIND_ADDR
            );
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("SERENE_API_PSK");
        env::remove_var("SERENE_DB_PATH");
        env::remove_var("SERENE_EPHEMERAL");
        env::remove_var("SERENE_BIND_ADDR");
        env::remove_var("SERENE_LOG_LEVEL");
        env::remove_var("SERENE_GENERATION_MODEL");
        env::remove_var("SERENE_GENERATION_URL");

        let config = Config::from_env();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert!(!config.ephemeral);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.generation_model, DEFAULT_GENERATION_MODEL);
        assert_eq!(config.generation_url, DEFAULT_GENERATION_URL);
    }

    #[test]
    fn test_invalid_bind_addr_falls_back() {
        let addr = parse_bind_addr(Some("not-an-address".to_string()));
        assert_eq!(addr.to_string(), DEFAULT_BIND_ADDR);

        let addr = parse_bind_addr(Some("0.0.0.0:9000".to_string()));
        assert_eq!(addr.to_string(), "0.0.0.0:9000");
    }
}
