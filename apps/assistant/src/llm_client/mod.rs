/// LLM Client — the single point of entry for all Bedrock model calls.
///
/// No other module may call Bedrock directly. Text generation goes through `TextModel`,
/// embeddings through `Embedder`; handlers only ever see the traits so tests can swap in
/// stubs.
use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod embeddings;
pub mod prompts;

pub use embeddings::{BedrockEmbeddings, Embedder};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Bedrock request failed: {0}")]
    Sdk(String),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// An opaque prompt → text function.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model_id(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct MistralRequest {
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct MistralResponse {
    pub outputs: Vec<MistralOutput>,
}

#[derive(Debug, Deserialize)]
pub struct MistralOutput {
    pub text: String,
    pub stop_reason: Option<String>,
}

impl MistralResponse {
    /// Text of the first output, if it carries any non-whitespace content.
    pub fn text(&self) -> Option<&str> {
        self.outputs
            .first()
            .map(|o| o.text.as_str())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Text completion against a Mistral instruct model hosted on Bedrock.
#[derive(Clone)]
pub struct BedrockLlm {
    client: Client,
    model_id: String,
    max_tokens: u32,
    temperature: f32,
}

impl BedrockLlm {
    pub fn new(client: Client, model_id: String, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            model_id,
            max_tokens,
            temperature,
        }
    }

    fn request_body(&self, prompt: &str) -> Result<Vec<u8>, LlmError> {
        let body = MistralRequest {
            prompt: prompts::instruct(prompt),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        Ok(serde_json::to_vec(&body)?)
    }
}

#[async_trait]
impl TextModel for BedrockLlm {
    /// One InvokeModel call, no retry. Blocks until Bedrock answers.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(self.request_body(prompt)?))
            .send()
            .await
            .map_err(|e| LlmError::Sdk(DisplayErrorContext(&e).to_string()))?;

        let text = parse_completion(output.body().as_ref())?;
        debug!(
            "LLM call succeeded: model={}, prompt_chars={}, answer_chars={}",
            self.model_id,
            prompt.len(),
            text.len()
        );
        Ok(text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Extracts the answer text from a raw Mistral InvokeModel response body.
pub fn parse_completion(body: &[u8]) -> Result<String, LlmError> {
    let response: MistralResponse = serde_json::from_slice(body)?;
    if let Some(reason) = response.outputs.first().and_then(|o| o.stop_reason.as_deref()) {
        debug!("Mistral stop_reason={reason}");
    }
    response
        .text()
        .map(str::to_string)
        .ok_or(LlmError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_takes_first_output() {
        let body = br#"{"outputs":[{"text":"1. What is Rust?","stop_reason":"stop"},{"text":"ignored"}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "1. What is Rust?");
    }

    #[test]
    fn test_parse_completion_empty_outputs() {
        let body = br#"{"outputs":[]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_parse_completion_whitespace_only_is_empty() {
        let body = br#"{"outputs":[{"text":"  \n ","stop_reason":"length"}]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_parse_completion_malformed_json() {
        assert!(matches!(
            parse_completion(b"<html>oops</html>"),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn test_request_body_wraps_prompt_in_instruct_tags() {
        let body = MistralRequest {
            prompt: prompts::instruct("Hello"),
            max_tokens: 512,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["prompt"], "<s>[INST] Hello [/INST]");
        assert_eq!(json["max_tokens"], 512);
    }
}
