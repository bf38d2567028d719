//! Remote generation client abstraction.
//!
//! Provides a unified interface for the external text-generation providers
//! plus the shared request/result types the orchestrator works with.

mod anthropic;
mod instructions;
mod openai;

pub use anthropic::AnthropicClient;
pub use instructions::{system_instruction, user_instruction};
pub use openai::OpenAiClient;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error as ThisError;

use crate::analysis::Analysis;

/// The external providers promptforge can delegate generation to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Anthropic Claude.
    Anthropic,
    /// `OpenAI` GPT.
    OpenAi,
}

impl ProviderId {
    /// The canonical provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    /// Parses a provider name; unknown names yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Some(Self::Anthropic),
            "openai" | "gpt" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The specialization a focused prompt is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    /// Versatile general-purpose assistant.
    #[default]
    General,
    /// Software development.
    Coding,
    /// UI/UX design.
    Design,
    /// System architecture.
    Architecture,
    /// Problem diagnosis.
    Debugging,
}

impl FocusArea {
    /// The canonical focus-area name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Coding => "coding",
            Self::Design => "design",
            Self::Architecture => "architecture",
            Self::Debugging => "debugging",
        }
    }

    /// Parses a focus-area name; unrecognized names fall back to general.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "coding" => Self::Coding,
            "design" => Self::Design,
            "architecture" => Self::Architecture,
            "debugging" => Self::Debugging,
            _ => Self::General,
        }
    }
}

/// How much prompt to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "focus_area")]
pub enum GenerationMode {
    /// The full multi-section prompt.
    Comprehensive,
    /// A shorter prompt specialized for one focus area.
    Focused(FocusArea),
}

impl GenerationMode {
    /// The canonical mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Focused(_) => "focused",
        }
    }
}

/// A single generation request as received from the caller.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Free-text description of what the user wants built.
    pub idea: String,
    /// Requested prompt shape.
    pub mode: GenerationMode,
    /// Provider to try first, when the caller has a preference.
    pub preferred_provider: Option<ProviderId>,
}

/// Where the final prompt text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationSource {
    /// A remote provider produced the text.
    Provider(ProviderId),
    /// The local template assembler produced the text.
    TemplateFallback,
}

impl GenerationSource {
    /// The canonical source label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider(id) => id.as_str(),
            Self::TemplateFallback => "template-fallback",
        }
    }

    /// Whether the text came from a remote provider.
    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl Serialize for GenerationSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Token usage as reported by a provider, when available.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    /// Provider-reported total or output token count, if any.
    pub reported_tokens: Option<usize>,
    /// Tokens consumed by the request, 0 when not reported.
    pub input_tokens: usize,
    /// Tokens produced by the response, 0 when not reported.
    pub output_tokens: usize,
}

/// Metadata attached to every generation result.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationMetadata {
    /// When the prompt was generated.
    pub generated_at: DateTime<Utc>,
    /// Provider name or `"template-fallback"`.
    pub source: GenerationSource,
    /// Length of the prompt text in bytes; always equals `prompt.len()`.
    pub prompt_length: usize,
    /// Provider-reported token count, or `ceil(prompt_length / 4)`.
    pub estimated_tokens: usize,
    /// Tokens consumed by the request, 0 when unavailable.
    pub input_tokens: usize,
    /// Tokens produced by the response, 0 when unavailable.
    pub output_tokens: usize,
}

/// The sole value returned to callers: prompt text plus metadata.
///
/// Built whole from exactly one of a successful remote call or the local
/// template path, never a merge of both.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    /// The generated prompt text.
    pub prompt: String,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
    /// The classifier output the prompt was built from.
    pub analysis: Analysis,
}

impl GenerationResult {
    /// Builds a result envelope, deriving the length and token estimate
    /// from the prompt text so the round-trip invariant holds.
    #[must_use]
    pub fn new(
        prompt: String,
        source: GenerationSource,
        usage: TokenUsage,
        analysis: Analysis,
    ) -> Self {
        let prompt_length = prompt.len();
        let estimated_tokens = usage
            .reported_tokens
            .unwrap_or_else(|| estimate_tokens(prompt_length));
        Self {
            prompt,
            metadata: GenerationMetadata {
                generated_at: Utc::now(),
                source,
                prompt_length,
                estimated_tokens,
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            },
            analysis,
        }
    }

    /// Whether the prompt came from a remote provider.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.metadata.source.is_remote()
    }
}

/// Rough token estimate used when a provider reports no usage data.
#[must_use]
pub const fn estimate_tokens(prompt_length: usize) -> usize {
    prompt_length.div_ceil(4)
}

/// Failure taxonomy for a single remote client call.
///
/// Surfaced to the orchestrator, which recovers from every kind by
/// falling back to the local templates; these never reach the caller.
#[derive(Debug, ThisError)]
pub enum GenerationError {
    /// No credential is configured for the provider.
    ///
    /// Checked before any network attempt; client construction itself
    /// always succeeds.
    #[error("{provider} credential not configured")]
    MissingCredential {
        /// The provider missing its credential.
        provider: ProviderId,
    },

    /// The provider returned a non-success HTTP status.
    #[error("provider returned status {status}: {message}")]
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Response body or status message.
        message: String,
    },

    /// The request never reached the provider.
    ///
    /// Covers connectivity failures and cross-origin-style rejections,
    /// which are indistinguishable from inside the calling environment.
    /// The orchestrator treats this class as systemic and skips the
    /// secondary provider.
    #[error("provider unreachable: {cause}")]
    NetworkUnreachable {
        /// Transport-level cause.
        cause: String,
    },

    /// The provider responded but the expected text field was absent.
    #[error("malformed provider response: {cause}")]
    MalformedResponse {
        /// Parse-level cause.
        cause: String,
    },
}

impl GenerationError {
    /// Whether this failure class makes every remote provider unusable.
    #[must_use]
    pub const fn is_systemic(&self) -> bool {
        matches!(self, Self::NetworkUnreachable { .. })
    }
}

/// Trait for remote generation providers.
pub trait PromptProvider: Send + Sync {
    /// The provider identity.
    fn id(&self) -> ProviderId;

    /// Whether a credential is configured.
    ///
    /// Absence means the provider is skipped, not that it errors.
    fn is_available(&self) -> bool;

    /// Generates a prompt for the request.
    ///
    /// Issues exactly one network call; retry policy belongs to the
    /// orchestrator.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] describing the precise failure kind.
    fn generate(
        &self,
        request: &GenerationRequest,
        analysis: &Analysis,
    ) -> Result<GenerationResult, GenerationError>;
}

/// HTTP client configuration for provider requests.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::HttpConfig) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("PROMPTFORGE_LLM_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("PROMPTFORGE_LLM_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for provider requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build LLM HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Classifies a transport-level send failure.
///
/// Connectivity, DNS, TLS, and timeout failures are all reported as
/// [`GenerationError::NetworkUnreachable`]; from this side of the socket
/// they are indistinguishable and equally systemic.
pub(crate) fn classify_send_error(provider: ProviderId, err: &reqwest::Error) -> GenerationError {
    let error_kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_request() {
        "request"
    } else {
        "unknown"
    };
    tracing::error!(
        provider = provider.as_str(),
        error = %err,
        error_kind = error_kind,
        "LLM request failed before a response was received"
    );
    GenerationError::NetworkUnreachable {
        cause: format!("{error_kind} error: {err}"),
    }
}
