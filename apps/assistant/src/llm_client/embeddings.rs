//! Embeddings — Titan text embeddings on Bedrock.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LlmError;

/// Maps text to a dense vector. Used by the retriever for query embedding.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanRequest<'a> {
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResponse {
    embedding: Vec<f32>,
    input_text_token_count: Option<u32>,
}

#[derive(Clone)]
pub struct BedrockEmbeddings {
    client: Client,
    model_id: String,
}

impl BedrockEmbeddings {
    pub fn new(client: Client, model_id: String) -> Self {
        Self { client, model_id }
    }
}

#[async_trait]
impl Embedder for BedrockEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let body = serde_json::to_vec(&TitanRequest { input_text: text })?;

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| LlmError::Sdk(DisplayErrorContext(&e).to_string()))?;

        parse_embedding(output.body().as_ref())
    }
}

pub fn parse_embedding(body: &[u8]) -> Result<Vec<f32>, LlmError> {
    let response: TitanResponse = serde_json::from_slice(body)?;
    if response.embedding.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    debug!(
        "Embedding: dims={}, input_tokens={:?}",
        response.embedding.len(),
        response.input_text_token_count
    );
    Ok(response.embedding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titan_request_uses_camel_case() {
        let json = serde_json::to_value(TitanRequest { input_text: "rust" }).unwrap();
        assert_eq!(json["inputText"], "rust");
    }

    #[test]
    fn test_parse_embedding() {
        let body = br#"{"embedding":[0.1,0.2,0.3],"inputTextTokenCount":2}"#;
        assert_eq!(parse_embedding(body).unwrap(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_embedding_rejects_empty_vector() {
        let body = br#"{"embedding":[]}"#;
        assert!(matches!(parse_embedding(body), Err(LlmError::EmptyContent)));
    }
}
