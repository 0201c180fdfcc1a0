//! Environment-driven configuration

use std::env;

/// Runtime configuration, read from the environment with sensible defaults
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key; empty means the server cannot call the real API
    pub anthropic_api_key: String,
    /// Model identifier for the Messages API
    pub anthropic_model: String,
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Chunk overlap in characters
    pub chunk_overlap: usize,
    /// Maximum search hits returned per tool call
    pub max_results: usize,
    /// Exchanges retained per session
    pub max_history: usize,
    /// Directory of course documents loaded at startup
    pub docs_path: String,
    /// Port the server binds on 127.0.0.1
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment (after `.env` loading)
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            anthropic_model: env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-5".to_string()),
            chunk_size: parse_env("CHUNK_SIZE", 800),
            chunk_overlap: parse_env("CHUNK_OVERLAP", 100),
            max_results: parse_env("MAX_RESULTS", 5),
            max_history: parse_env("MAX_HISTORY", 2),
            docs_path: env::var("DOCS_PATH").unwrap_or_else(|_| "./docs".to_string()),
            port: parse_env("PORT", 8000),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
