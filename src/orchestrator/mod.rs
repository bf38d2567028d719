//! Generation orchestration.
//!
//! Runs a request through the remote providers in preference order and
//! falls back to the local template assembler whenever the remote path is
//! unusable. Every code path terminates in a well-formed
//! [`GenerationResult`]; provider failures are logged, never surfaced.
//!
//! Per request: at most two remote attempts. A systemic failure on the
//! primary (unreachable network) skips the secondary entirely, since it
//! would fail the same way.

use crate::analysis::{Analysis, analyze};
use crate::assembler;
use crate::config::ForgeConfig;
use crate::llm::{
    AnthropicClient, GenerationMode, GenerationRequest, GenerationResult, GenerationSource,
    LlmHttpConfig, OpenAiClient, PromptProvider, ProviderId, TokenUsage,
};

/// Reports whether the runtime currently has network connectivity.
///
/// Injected rather than read from ambient state so the orchestrator stays
/// testable without environment simulation. When offline, remote attempts
/// are skipped outright; an attempt would only fail with the same outcome.
pub trait Connectivity: Send + Sync {
    /// Whether remote providers are worth attempting.
    fn is_online(&self) -> bool;
}

/// Default connectivity source: assume online and let the transport layer
/// report unreachability.
pub struct AssumeOnline;

impl Connectivity for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Connectivity source that always reports offline, forcing local
/// template assembly.
pub struct Offline;

impl Connectivity for Offline {
    fn is_online(&self) -> bool {
        false
    }
}

/// Orchestrates remote generation with local template fallback.
pub struct GenerationOrchestrator {
    /// Registered clients, in fixed registration order.
    providers: Vec<Box<dyn PromptProvider>>,
    /// Connectivity source consulted before any remote attempt.
    connectivity: Box<dyn Connectivity>,
}

impl GenerationOrchestrator {
    /// Creates an orchestrator over the given clients.
    ///
    /// The order of `providers` is the registration order used for
    /// default preference and secondary selection.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn PromptProvider>>) -> Self {
        Self {
            providers,
            connectivity: Box::new(AssumeOnline),
        }
    }

    /// Builds an orchestrator with both stock clients from configuration.
    ///
    /// Anthropic registers first, `OpenAI` second.
    #[must_use]
    pub fn from_config(config: &ForgeConfig) -> Self {
        let http = LlmHttpConfig::from_config(&config.http).with_env_overrides();

        let mut anthropic = AnthropicClient::new().with_http_config(http);
        if let Some(ref api_key) = config.anthropic.api_key {
            anthropic = anthropic.with_api_key(api_key);
        }
        if let Some(ref model) = config.anthropic.model {
            anthropic = anthropic.with_model(model);
        }
        if let Some(ref base_url) = config.anthropic.base_url {
            anthropic = anthropic.with_endpoint(base_url);
        }

        let mut openai = OpenAiClient::new().with_http_config(http);
        if let Some(ref api_key) = config.openai.api_key {
            openai = openai.with_api_key(api_key);
        }
        if let Some(ref model) = config.openai.model {
            openai = openai.with_model(model);
        }
        if let Some(ref base_url) = config.openai.base_url {
            openai = openai.with_endpoint(base_url);
        }

        Self::new(vec![Box::new(anthropic), Box::new(openai)])
    }

    /// Replaces the connectivity source.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Box<dyn Connectivity>) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Returns the clients with a configured credential, in registration
    /// order. An empty list is valid and means remote generation is
    /// skipped for every request.
    #[must_use]
    pub fn available_providers(&self) -> Vec<&dyn PromptProvider> {
        self.providers
            .iter()
            .map(|provider| provider.as_ref())
            .filter(|provider| provider.is_available())
            .collect()
    }

    /// Orders the available clients for one request.
    ///
    /// A caller-named preferred provider moves to the front when
    /// available. Otherwise the default is a fixed priority table, not a
    /// capability score: comprehensive mode keeps registration order,
    /// focused mode leads with `OpenAI` when it is configured.
    fn provider_order(&self, request: &GenerationRequest) -> Vec<&dyn PromptProvider> {
        let available = self.available_providers();

        let lead = request.preferred_provider.map_or_else(
            || match request.mode {
                GenerationMode::Comprehensive => None,
                GenerationMode::Focused(_) => Some(ProviderId::OpenAi),
            },
            Some,
        );

        let Some(lead) = lead else {
            return available;
        };

        let mut ordered: Vec<&dyn PromptProvider> = Vec::with_capacity(available.len());
        ordered.extend(available.iter().filter(|p| p.id() == lead).copied());
        ordered.extend(available.iter().filter(|p| p.id() != lead).copied());
        ordered
    }

    /// Generates a prompt for the request.
    ///
    /// Never fails: remote errors of any kind degrade to the locally
    /// assembled template prompt.
    #[must_use]
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let analysis = analyze(&request.idea);

        if !self.connectivity.is_online() {
            tracing::info!(
                mode = request.mode.as_str(),
                "Offline; skipping remote providers"
            );
            return self.fallback(request, analysis);
        }

        let order = self.provider_order(request);
        let Some(primary) = order.first() else {
            tracing::debug!("No provider credentials configured; using template fallback");
            return self.fallback(request, analysis);
        };

        match primary.generate(request, &analysis) {
            Ok(result) => return result,
            Err(err) if err.is_systemic() => {
                // The secondary is reachable the same way; do not burn a
                // second attempt on it.
                tracing::warn!(
                    provider = primary.id().as_str(),
                    error = %err,
                    "Primary provider unreachable; falling back to templates"
                );
                return self.fallback(request, analysis);
            },
            Err(err) => {
                tracing::warn!(
                    provider = primary.id().as_str(),
                    error = %err,
                    "Primary provider failed"
                );
            },
        }

        if let Some(secondary) = order.get(1) {
            match secondary.generate(request, &analysis) {
                Ok(result) => return result,
                Err(err) => {
                    tracing::warn!(
                        provider = secondary.id().as_str(),
                        error = %err,
                        "Secondary provider failed; falling back to templates"
                    );
                },
            }
        }

        self.fallback(request, analysis)
    }

    /// Builds the locally assembled result.
    fn fallback(&self, request: &GenerationRequest, analysis: Analysis) -> GenerationResult {
        let prompt = match request.mode {
            GenerationMode::Comprehensive => {
                assembler::assemble_comprehensive(&request.idea, &analysis)
            },
            GenerationMode::Focused(focus) => {
                assembler::assemble_focused(&request.idea, &analysis, focus)
            },
        };

        GenerationResult::new(
            prompt,
            GenerationSource::TemplateFallback,
            TokenUsage::default(),
            analysis,
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::llm::{FocusArea, GenerationError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Scripted provider for orchestration tests.
    struct ScriptedProvider {
        id: ProviderId,
        available: bool,
        outcome: fn() -> Result<String, GenerationError>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(
            id: ProviderId,
            available: bool,
            outcome: fn() -> Result<String, GenerationError>,
        ) -> Self {
            Self {
                id,
                available,
                outcome,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl PromptProvider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn generate(
            &self,
            _request: &GenerationRequest,
            analysis: &Analysis,
        ) -> Result<GenerationResult, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)().map(|text| {
                GenerationResult::new(
                    text,
                    GenerationSource::Provider(self.id),
                    TokenUsage::default(),
                    analysis.clone(),
                )
            })
        }
    }

    // Arc wrapper lets tests keep a handle on call counters after the
    // provider moves into the orchestrator.
    impl PromptProvider for Arc<ScriptedProvider> {
        fn id(&self) -> ProviderId {
            self.as_ref().id()
        }

        fn is_available(&self) -> bool {
            self.as_ref().is_available()
        }

        fn generate(
            &self,
            request: &GenerationRequest,
            analysis: &Analysis,
        ) -> Result<GenerationResult, GenerationError> {
            self.as_ref().generate(request, analysis)
        }
    }

    fn request(mode: GenerationMode) -> GenerationRequest {
        GenerationRequest {
            idea: "Build a simple website".to_string(),
            mode,
            preferred_provider: None,
        }
    }

    fn http_error() -> Result<String, GenerationError> {
        Err(GenerationError::HttpError {
            status: 500,
            message: "server error".to_string(),
        })
    }

    fn unreachable() -> Result<String, GenerationError> {
        Err(GenerationError::NetworkUnreachable {
            cause: "connect error".to_string(),
        })
    }

    fn success() -> Result<String, GenerationError> {
        Ok("remote prompt".to_string())
    }

    #[test]
    fn test_no_providers_uses_template_fallback() {
        let orchestrator = GenerationOrchestrator::new(Vec::new());
        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));

        assert!(!result.is_remote());
        assert_eq!(result.metadata.source, GenerationSource::TemplateFallback);
        assert!(result.prompt.contains("Build a simple website"));
    }

    #[test]
    fn test_primary_success_returns_remote_result() {
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(ScriptedProvider::new(ProviderId::Anthropic, true, success)),
            Box::new(ScriptedProvider::new(ProviderId::OpenAi, true, success)),
        ]);

        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));
        assert!(result.is_remote());
        assert_eq!(
            result.metadata.source,
            GenerationSource::Provider(ProviderId::Anthropic)
        );
        assert_eq!(result.prompt, "remote prompt");
        assert_eq!(result.metadata.prompt_length, result.prompt.len());
    }

    #[test]
    fn test_http_error_tries_exactly_one_secondary() {
        let primary = Arc::new(ScriptedProvider::new(ProviderId::Anthropic, true, http_error));
        let secondary = Arc::new(ScriptedProvider::new(ProviderId::OpenAi, true, http_error));
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(Arc::clone(&primary)),
            Box::new(Arc::clone(&secondary)),
        ]);

        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));
        assert_eq!(result.metadata.source, GenerationSource::TemplateFallback);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_secondary_recovers_from_http_error() {
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(ScriptedProvider::new(ProviderId::Anthropic, true, http_error)),
            Box::new(ScriptedProvider::new(ProviderId::OpenAi, true, success)),
        ]);

        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));
        assert_eq!(
            result.metadata.source,
            GenerationSource::Provider(ProviderId::OpenAi)
        );
    }

    #[test]
    fn test_network_unreachable_skips_secondary() {
        let primary = Arc::new(ScriptedProvider::new(ProviderId::Anthropic, true, unreachable));
        let secondary = Arc::new(ScriptedProvider::new(ProviderId::OpenAi, true, success));
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(Arc::clone(&primary)),
            Box::new(Arc::clone(&secondary)),
        ]);

        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));
        assert_eq!(result.metadata.source, GenerationSource::TemplateFallback);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unavailable_providers_are_skipped() {
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(ScriptedProvider::new(ProviderId::Anthropic, false, success)),
            Box::new(ScriptedProvider::new(ProviderId::OpenAi, true, success)),
        ]);

        assert_eq!(orchestrator.available_providers().len(), 1);

        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));
        assert_eq!(
            result.metadata.source,
            GenerationSource::Provider(ProviderId::OpenAi)
        );
    }

    #[test]
    fn test_focused_mode_prefers_openai() {
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(ScriptedProvider::new(ProviderId::Anthropic, true, success)),
            Box::new(ScriptedProvider::new(ProviderId::OpenAi, true, success)),
        ]);

        let result =
            orchestrator.generate(&request(GenerationMode::Focused(FocusArea::Coding)));
        assert_eq!(
            result.metadata.source,
            GenerationSource::Provider(ProviderId::OpenAi)
        );
    }

    #[test]
    fn test_preferred_provider_moves_to_front() {
        let orchestrator = GenerationOrchestrator::new(vec![
            Box::new(ScriptedProvider::new(ProviderId::Anthropic, true, success)),
            Box::new(ScriptedProvider::new(ProviderId::OpenAi, true, success)),
        ]);

        let mut req = request(GenerationMode::Comprehensive);
        req.preferred_provider = Some(ProviderId::OpenAi);

        let result = orchestrator.generate(&req);
        assert_eq!(
            result.metadata.source,
            GenerationSource::Provider(ProviderId::OpenAi)
        );
    }

    #[test]
    fn test_offline_gate_skips_remote_entirely() {
        struct Offline;
        impl Connectivity for Offline {
            fn is_online(&self) -> bool {
                false
            }
        }

        let orchestrator = GenerationOrchestrator::new(vec![Box::new(ScriptedProvider::new(
            ProviderId::Anthropic,
            true,
            success,
        ))])
        .with_connectivity(Box::new(Offline));

        let result = orchestrator.generate(&request(GenerationMode::Comprehensive));
        assert_eq!(result.metadata.source, GenerationSource::TemplateFallback);
    }

    #[test]
    fn test_focused_fallback_uses_focused_assembly() {
        let orchestrator = GenerationOrchestrator::new(Vec::new());
        let result =
            orchestrator.generate(&request(GenerationMode::Focused(FocusArea::Coding)));

        assert!(result.prompt.starts_with("You are an expert software developer."));
        assert!(!result.prompt.contains("# Comprehensive AI Assistant Prompt"));
    }
}
