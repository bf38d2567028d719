//! `generate` command implementation.

use std::path::PathBuf;

use crate::config::ForgeConfig;
use crate::llm::{FocusArea, GenerationMode, GenerationRequest, ProviderId};
use crate::orchestrator::{GenerationOrchestrator, Offline};
use crate::{Error, Result};

/// Generates a system prompt for an idea and prints or saves it.
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    /// The idea text.
    pub idea: String,
    /// Mode name: "comprehensive" or "focused".
    pub mode: String,
    /// Focus area for focused mode; unrecognized names fall back to general.
    pub focus: Option<String>,
    /// Provider to try first.
    pub provider: Option<String>,
    /// Skip remote providers entirely.
    pub offline: bool,
    /// Write the prompt to this file instead of stdout.
    pub output: Option<PathBuf>,
    /// Emit the whole result envelope as JSON.
    pub json: bool,
}

impl GenerateCommand {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty idea, an unknown mode or provider
    /// name, or a failed output write. Provider failures are not errors;
    /// they degrade to the template fallback inside the orchestrator.
    pub fn run(&self, config: &ForgeConfig) -> Result<()> {
        let request = self.build_request()?;

        let mut orchestrator = GenerationOrchestrator::from_config(config);
        if self.offline {
            orchestrator = orchestrator.with_connectivity(Box::new(Offline));
        }

        let result = orchestrator.generate(&request);

        if self.json {
            let rendered =
                serde_json::to_string_pretty(&result).map_err(|e| Error::OperationFailed {
                    operation: "render_result_json".to_string(),
                    cause: e.to_string(),
                })?;
            return self.emit(&rendered);
        }

        self.emit(&result.prompt)?;

        // Summary goes to stderr so stdout stays a clean prompt artifact.
        eprintln!(
            "source: {} | {} chars | ~{} tokens",
            result.metadata.source.as_str(),
            result.metadata.prompt_length,
            result.metadata.estimated_tokens,
        );
        if !result.analysis.domains.is_empty() {
            let domains: Vec<&str> = result
                .analysis
                .domains
                .iter()
                .map(|d| d.as_str())
                .collect();
            eprintln!(
                "domains: {} | complexity: {}",
                domains.join(", "),
                result.analysis.complexity.as_str(),
            );
        }

        Ok(())
    }

    /// Validates the flags into a pipeline request.
    fn build_request(&self) -> Result<GenerationRequest> {
        if self.idea.trim().is_empty() {
            return Err(Error::InvalidInput("idea must not be empty".to_string()));
        }

        let mode = match self.mode.to_lowercase().as_str() {
            "comprehensive" => GenerationMode::Comprehensive,
            "focused" => {
                let focus = self
                    .focus
                    .as_deref()
                    .map_or(FocusArea::General, FocusArea::parse);
                GenerationMode::Focused(focus)
            },
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown mode '{other}' (expected comprehensive or focused)"
                )));
            },
        };

        let preferred_provider = match self.provider.as_deref() {
            None => None,
            Some(name) => Some(ProviderId::parse(name).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown provider '{name}' (expected anthropic or openai)"
                ))
            })?),
        };

        Ok(GenerationRequest {
            idea: self.idea.clone(),
            mode,
            preferred_provider,
        })
    }

    /// Writes text to the output file, or stdout when no file is set.
    fn emit(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                std::fs::write(path, text).map_err(|e| Error::OperationFailed {
                    operation: "write_output_file".to_string(),
                    cause: e.to_string(),
                })?;
                eprintln!("wrote {} bytes to {}", text.len(), path.display());
                Ok(())
            },
            None => {
                println!("{text}");
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn command(idea: &str, mode: &str) -> GenerateCommand {
        GenerateCommand {
            idea: idea.to_string(),
            mode: mode.to_string(),
            focus: None,
            provider: None,
            offline: true,
            output: None,
            json: false,
        }
    }

    #[test]
    fn test_empty_idea_rejected() {
        let cmd = command("   ", "comprehensive");
        assert!(matches!(
            cmd.build_request(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let cmd = command("an idea", "terse");
        assert!(matches!(
            cmd.build_request(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_focused_mode_parses_focus() {
        let mut cmd = command("an idea", "focused");
        cmd.focus = Some("coding".to_string());
        let request = cmd.build_request().unwrap();
        assert_eq!(request.mode, GenerationMode::Focused(FocusArea::Coding));
    }

    #[test]
    fn test_focused_mode_defaults_to_general() {
        let cmd = command("an idea", "focused");
        let request = cmd.build_request().unwrap();
        assert_eq!(request.mode, GenerationMode::Focused(FocusArea::General));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut cmd = command("an idea", "comprehensive");
        cmd.provider = Some("gemini".to_string());
        assert!(matches!(
            cmd.build_request(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_provider_aliases_accepted() {
        let mut cmd = command("an idea", "comprehensive");
        cmd.provider = Some("claude".to_string());
        let request = cmd.build_request().unwrap();
        assert_eq!(request.preferred_provider, Some(ProviderId::Anthropic));
    }

    #[test]
    fn test_offline_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");

        let mut cmd = command("Build a simple website", "comprehensive");
        cmd.output = Some(path.clone());
        cmd.run(&ForgeConfig::default()).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Build a simple website"));
    }
}
