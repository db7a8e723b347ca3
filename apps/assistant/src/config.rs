use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "mistral.mistral-7b-instruct-v0:2";
pub const DEFAULT_EMBEDDING_MODEL_ID: &str = "amazon.titan-embed-text-v2:0";
pub const DEFAULT_VECTOR_STORE_PATH: &str = "./chroma_db";
pub const DEFAULT_COLLECTION: &str = "ai_candidates";

/// Application configuration loaded from environment variables.
/// Only the port and numeric tuning knobs can fail to parse; everything else has a default
/// or is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    /// Secrets Manager bundle holding the AWS keys. Takes precedence over the raw env vars.
    pub aws_secret_name: Option<String>,
    pub model_id: String,
    pub embedding_model_id: String,
    pub vector_store_path: PathBuf,
    pub collection_name: String,
    pub retriever_k: usize,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub redis_url: Option<String>,
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let session_ttl_secs = or("SESSION_TTL_SECS", "3600")
            .parse::<u64>()
            .context("SESSION_TTL_SECS must be a positive integer")?;
        ensure!(session_ttl_secs > 0, "SESSION_TTL_SECS must be greater than zero");

        Ok(Config {
            aws_region: or("AWS_REGION", DEFAULT_REGION),
            aws_access_key_id: get("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            aws_secret_name: get("AWS_SECRET_NAME"),
            model_id: or("BEDROCK_MODEL_ID", DEFAULT_MODEL_ID),
            embedding_model_id: or("BEDROCK_EMBEDDING_MODEL_ID", DEFAULT_EMBEDDING_MODEL_ID),
            vector_store_path: PathBuf::from(or("CHROMA_DB_PATH", DEFAULT_VECTOR_STORE_PATH)),
            collection_name: or("VECTOR_COLLECTION", DEFAULT_COLLECTION),
            retriever_k: or("RETRIEVER_K", "4")
                .parse::<usize>()
                .context("RETRIEVER_K must be a non-negative integer")?,
            llm_max_tokens: or("LLM_MAX_TOKENS", "512")
                .parse::<u32>()
                .context("LLM_MAX_TOKENS must be a non-negative integer")?,
            llm_temperature: or("LLM_TEMPERATURE", "0.5")
                .parse::<f32>()
                .context("LLM_TEMPERATURE must be a number")?,
            redis_url: get("REDIS_URL"),
            session_ttl_secs,
            port: or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.model_id, "mistral.mistral-7b-instruct-v0:2");
        assert_eq!(config.embedding_model_id, "amazon.titan-embed-text-v2:0");
        assert_eq!(config.vector_store_path, PathBuf::from("./chroma_db"));
        assert_eq!(config.collection_name, "ai_candidates");
        assert_eq!(config.retriever_k, 4);
        assert_eq!(config.port, 8080);
        assert!(config.aws_access_key_id.is_none());
        assert!(config.aws_secret_name.is_none());
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("BEDROCK_MODEL_ID", "mistral.mixtral-8x7b-instruct-v0:1"),
            ("AWS_SECRET_NAME", "hiring/bedrock"),
            ("PORT", "3000"),
            ("REDIS_URL", "redis://localhost:6379"),
        ])
        .unwrap();
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.model_id, "mistral.mixtral-8x7b-instruct-v0:1");
        assert_eq!(config.aws_secret_name.as_deref(), Some("hiring/bedrock"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("AWS_ACCESS_KEY_ID", "  "), ("AWS_REGION", "")]).unwrap();
        assert!(config.aws_access_key_id.is_none());
        assert_eq!(config.aws_region, "us-east-1");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_zero_session_ttl_is_rejected() {
        let err = config_from(&[("SESSION_TTL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let config = config_from(&[("SESSION_TTL_SECS", "1")]).unwrap();
        assert_eq!(config.session_ttl_secs, 1);
    }
}
