use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub embeddings: EmbeddingsConfig,
    pub scrape: ScrapeConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

/// Outbound fetch settings for the scrape path.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Settings for the Ollama generate endpoint used to answer queries.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PAGEMIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PAGEMIND_PORT", 3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:pagemind.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
            },
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "BAAI/bge-small-en-v1.5".to_string()),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", 384),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", 32),
            },
            scrape: ScrapeConfig {
                user_agent: env::var("SCRAPE_USER_AGENT")
                    .unwrap_or_else(|_| "Mozilla/5.0".to_string()),
                timeout_secs: parse_env_or("SCRAPE_TIMEOUT", 30),
            },
            llm: LlmConfig {
                model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "qwen3:0.6b".to_string()),
                base_url: env::var("OLLAMA_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                timeout_secs: parse_env_or("OLLAMA_TIMEOUT", 300),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
