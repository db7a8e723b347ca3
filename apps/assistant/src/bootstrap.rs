//! Startup wiring: AWS credentials, the Bedrock client, and the vector store handle.
//!
//! Credentials come from, in order:
//! 1. a Secrets Manager bundle named by `AWS_SECRET_NAME`,
//! 2. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`,
//! 3. the SDK default provider chain.
//!
//! Any failure here aborts startup.

use anyhow::{anyhow, Context, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_bedrockruntime::config::Credentials;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::retrieval::vector_store::VectorStore;

const PROVIDER_NAME: &str = "assistant-static";

/// AWS key pair as stored in the Secrets Manager bundle.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SecretBundle {
    #[serde(rename = "AWS_ACCESS_KEY_ID")]
    pub access_key_id: String,
    #[serde(rename = "AWS_SECRET_ACCESS_KEY")]
    pub secret_access_key: String,
    #[serde(rename = "AWS_SESSION_TOKEN", default)]
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    SecretsManager(String),
    Environment,
    DefaultChain,
}

pub fn credential_source(config: &Config) -> CredentialSource {
    match (
        &config.aws_secret_name,
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
    ) {
        (Some(name), _, _) => CredentialSource::SecretsManager(name.clone()),
        (None, Some(_), Some(_)) => CredentialSource::Environment,
        _ => CredentialSource::DefaultChain,
    }
}

pub fn parse_secret_bundle(secret: &str) -> Result<SecretBundle> {
    let bundle: SecretBundle =
        serde_json::from_str(secret).context("Secret bundle is not valid credential JSON")?;
    if bundle.access_key_id.trim().is_empty() || bundle.secret_access_key.trim().is_empty() {
        return Err(anyhow!("Secret bundle has empty AWS credentials"));
    }
    Ok(bundle)
}

/// Builds the SDK config used for Bedrock calls.
pub async fn load_sdk_config(config: &Config) -> Result<SdkConfig> {
    let region = Region::new(config.aws_region.clone());
    let loader = aws_config::defaults(BehaviorVersion::latest()).region(region.clone());

    let source = credential_source(config);
    let loader = match &source {
        CredentialSource::SecretsManager(name) => {
            let bundle = fetch_secret_bundle(name, region).await?;
            loader.credentials_provider(Credentials::new(
                bundle.access_key_id,
                bundle.secret_access_key,
                bundle.session_token,
                None,
                PROVIDER_NAME,
            ))
        }
        CredentialSource::Environment => loader.credentials_provider(Credentials::new(
            config.aws_access_key_id.clone().unwrap_or_default(),
            config.aws_secret_access_key.clone().unwrap_or_default(),
            None,
            None,
            PROVIDER_NAME,
        )),
        CredentialSource::DefaultChain => {
            warn!("No AWS credentials configured; falling back to the SDK default provider chain");
            loader
        }
    };

    info!("AWS credentials source: {:?} (region {})", source, config.aws_region);
    Ok(loader.load().await)
}

async fn fetch_secret_bundle(name: &str, region: Region) -> Result<SecretBundle> {
    info!("Fetching AWS credentials from Secrets Manager secret '{name}'");
    let sdk = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    let client = aws_sdk_secretsmanager::Client::new(&sdk);

    let output = client
        .get_secret_value()
        .secret_id(name)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to fetch secret '{name}': {}", DisplayErrorContext(&e)))?;

    let secret = output
        .secret_string()
        .ok_or_else(|| anyhow!("Secret '{name}' has no string value"))?;
    parse_secret_bundle(secret).with_context(|| format!("Invalid secret '{name}'"))
}

pub fn open_vector_store(config: &Config) -> Result<VectorStore> {
    VectorStore::open(&config.vector_store_path, &config.collection_name).with_context(|| {
        format!(
            "Failed to open vector store at {}",
            config.vector_store_path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    #[test]
    fn test_secret_name_takes_precedence() {
        let c = config(&[
            ("AWS_SECRET_NAME", "prod/bedrock"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "shh"),
        ]);
        assert_eq!(
            credential_source(&c),
            CredentialSource::SecretsManager("prod/bedrock".into())
        );
    }

    #[test]
    fn test_env_keys_need_both_halves() {
        let both = config(&[("AWS_ACCESS_KEY_ID", "AKIA"), ("AWS_SECRET_ACCESS_KEY", "shh")]);
        assert_eq!(credential_source(&both), CredentialSource::Environment);

        let half = config(&[("AWS_ACCESS_KEY_ID", "AKIA")]);
        assert_eq!(credential_source(&half), CredentialSource::DefaultChain);
    }

    #[test]
    fn test_parse_secret_bundle() {
        let bundle = parse_secret_bundle(
            r#"{"AWS_ACCESS_KEY_ID": "AKIA123", "AWS_SECRET_ACCESS_KEY": "s3cr3t"}"#,
        )
        .unwrap();
        assert_eq!(bundle.access_key_id, "AKIA123");
        assert_eq!(bundle.secret_access_key, "s3cr3t");
        assert!(bundle.session_token.is_none());
    }

    #[test]
    fn test_parse_secret_bundle_rejects_missing_or_empty_keys() {
        assert!(parse_secret_bundle(r#"{"AWS_ACCESS_KEY_ID": "AKIA123"}"#).is_err());
        assert!(parse_secret_bundle(
            r#"{"AWS_ACCESS_KEY_ID": " ", "AWS_SECRET_ACCESS_KEY": "x"}"#
        )
        .is_err());
        assert!(parse_secret_bundle("not json").is_err());
    }

    #[test]
    fn test_open_vector_store_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("db");
        let dir_str = dir.to_string_lossy().to_string();
        let c = config(&[("CHROMA_DB_PATH", dir_str.as_str())]);
        let store = open_vector_store(&c).unwrap();
        assert!(store.is_empty());
        assert!(dir.is_dir());
    }
}
