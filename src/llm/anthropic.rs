//! Anthropic Claude client.

use super::{
    GenerationError, GenerationRequest, GenerationResult, GenerationSource, LlmHttpConfig,
    PromptProvider, ProviderId, TokenUsage, build_http_client, classify_send_error, instructions,
};
use crate::analysis::Analysis;
use serde::{Deserialize, Serialize};

/// Anthropic Claude generation client.
pub struct AnthropicClient {
    /// API key.
    api_key: Option<String>,
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl AnthropicClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.anthropic.com/v1";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "claude-3-5-sonnet-20241022";

    /// Token budget for generated prompts.
    const MAX_TOKENS: u32 = 4000;

    /// Sampling temperature.
    const TEMPERATURE: f32 = 0.7;

    /// Creates a new Anthropic client.
    ///
    /// A missing `ANTHROPIC_API_KEY` is not an error here; the client is
    /// simply reported unavailable and fails with a missing-credential
    /// error at call time.
    #[must_use]
    pub fn new() -> Self {
        let api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        Self {
            api_key,
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            client: build_http_client(LlmHttpConfig::from_env()),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets HTTP client timeouts for provider requests.
    #[must_use]
    pub fn with_http_config(mut self, config: LlmHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Makes one request to the Messages API.
    fn request(
        &self,
        system: String,
        user: String,
    ) -> Result<(String, TokenUsage), GenerationError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(GenerationError::MissingCredential {
                provider: ProviderId::Anthropic,
            })?;

        tracing::info!(provider = "anthropic", model = %self.model, "Making LLM request");

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: Self::MAX_TOKENS,
            temperature: Self::TEMPERATURE,
            system,
            messages: vec![Message {
                role: "user".to_string(),
                content: user,
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.endpoint))
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| classify_send_error(ProviderId::Anthropic, &e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                provider = "anthropic",
                model = %self.model,
                status = %status,
                body = %body,
                "LLM API returned error status"
            );
            return Err(GenerationError::HttpError {
                status: status.as_u16(),
                message: body,
            });
        }

        let response: MessagesResponse =
            response
                .json()
                .map_err(|e| GenerationError::MalformedResponse {
                    cause: e.to_string(),
                })?;

        // Extract text from first content block
        let text = response
            .content
            .first()
            .and_then(|block| {
                if block.block_type == "text" {
                    Some(block.text.clone())
                } else {
                    None
                }
            })
            .ok_or_else(|| GenerationError::MalformedResponse {
                cause: "No text content in response".to_string(),
            })?;

        let usage = response.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
            reported_tokens: Some(u.output_tokens),
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        });

        Ok((text, usage))
    }
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptProvider for AnthropicClient {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        analysis: &Analysis,
    ) -> Result<GenerationResult, GenerationError> {
        let system = instructions::system_instruction(request.mode);
        let user = instructions::user_instruction(&request.idea, request.mode);

        let (text, usage) = self.request(system, user)?;

        Ok(GenerationResult::new(
            text,
            GenerationSource::Provider(ProviderId::Anthropic),
            usage,
            analysis.clone(),
        ))
    }
}

/// Request to the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

/// A message in the conversation.
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Response from the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

/// A content block in the response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

/// Token usage counters in the response.
#[derive(Debug, Deserialize)]
struct MessagesUsage {
    #[serde(default)]
    input_tokens: usize,
    #[serde(default)]
    output_tokens: usize,
}
