//! `OpenAI` client.

use super::{
    GenerationError, GenerationRequest, GenerationResult, GenerationSource, LlmHttpConfig,
    PromptProvider, ProviderId, TokenUsage, build_http_client, classify_send_error, instructions,
};
use crate::analysis::Analysis;
use serde::{Deserialize, Serialize};

/// `OpenAI` generation client.
pub struct OpenAiClient {
    /// API key.
    api_key: Option<String>,
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl OpenAiClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.openai.com/v1";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";

    /// Token budget for generated prompts.
    const MAX_TOKENS: u32 = 4000;

    /// Sampling temperature.
    const TEMPERATURE: f32 = 0.7;

    /// Creates a new `OpenAI` client.
    ///
    /// A missing `OPENAI_API_KEY` is not an error here; the client is
    /// simply reported unavailable and fails with a missing-credential
    /// error at call time.
    #[must_use]
    pub fn new() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").ok();
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

    /// Checks if the model is a reasoning-family model.
    ///
    /// These use `max_completion_tokens` instead of `max_tokens` and only
    /// support the default temperature.
    fn is_reasoning_model(&self) -> bool {
        self.model.starts_with("gpt-5")
            || self.model.starts_with("o1")
            || self.model.starts_with("o3")
    }

    /// Makes one request to the Chat Completions API.
    fn request(
        &self,
        system: String,
        user: String,
    ) -> Result<(String, TokenUsage), GenerationError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(GenerationError::MissingCredential {
                provider: ProviderId::OpenAi,
            })?;

        tracing::info!(provider = "openai", model = %self.model, "Making LLM request");

        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system,
            },
            ChatMessage {
                role: "user".to_string(),
                content: user,
            },
        ];

        let request = if self.is_reasoning_model() {
            ChatCompletionRequest {
                model: self.model.clone(),
                messages,
                max_tokens: None,
                max_completion_tokens: Some(Self::MAX_TOKENS),
                temperature: None,
            }
        } else {
            ChatCompletionRequest {
                model: self.model.clone(),
                messages,
                max_tokens: Some(Self::MAX_TOKENS),
                max_completion_tokens: None,
                temperature: Some(Self::TEMPERATURE),
            }
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| classify_send_error(ProviderId::OpenAi, &e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                provider = "openai",
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

        let response: ChatCompletionResponse =
            response
                .json()
                .map_err(|e| GenerationError::MalformedResponse {
                    cause: e.to_string(),
                })?;

        // Extract content from first choice
        let text = response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| GenerationError::MalformedResponse {
                cause: "No choices in response".to_string(),
            })?;

        let usage = response.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
            reported_tokens: Some(u.total_tokens),
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok((text, usage))
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptProvider for OpenAiClient {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
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
            GenerationSource::Provider(ProviderId::OpenAi),
            usage,
            analysis.clone(),
        ))
    }
}

/// Request to the Chat Completions API.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    /// Token limit for GPT-4 and earlier models.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Token limit for reasoning models.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// A message in the chat.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from the Chat Completions API.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

/// A choice in the response.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Token usage counters in the response.
#[derive(Debug, Deserialize)]
struct CompletionUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
    #[serde(default)]
    total_tokens: usize,
}
