//! # Promptforge
//!
//! Combined system-prompt generator for AI coding assistants.
//!
//! Promptforge turns a free-text project idea into a ready-to-use AI
//! system prompt. It classifies the idea against static keyword tables,
//! assembles a prompt from curated template fragments, and can optionally
//! delegate generation to a remote LLM provider, falling back to the local
//! templates whenever the remote path is unusable.
//!
//! ## Pipeline
//!
//! - Classifier ([`analysis`]): domains, complexity tier, technologies
//! - Template library ([`templates`]): constant prose fragments
//! - Assembler ([`assembler`]): deterministic local prompt construction
//! - Remote clients ([`llm`]): Anthropic and `OpenAI` integrations
//! - Orchestrator ([`orchestrator`]): provider ordering and fallback
//!
//! ## Example
//!
//! ```rust,ignore
//! use promptforge::config::ForgeConfig;
//! use promptforge::llm::{GenerationMode, GenerationRequest};
//! use promptforge::orchestrator::GenerationOrchestrator;
//!
//! let orchestrator = GenerationOrchestrator::from_config(&ForgeConfig::load_default());
//! let result = orchestrator.generate(&GenerationRequest {
//!     idea: "Build a simple website".to_string(),
//!     mode: GenerationMode::Comprehensive,
//!     preferred_provider: None,
//! });
//! println!("{}", result.prompt);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod analysis;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod llm;
pub mod orchestrator;
pub mod templates;

// Re-exports for convenience
pub use analysis::{Analysis, Complexity, Domain, analyze};
pub use config::ForgeConfig;
pub use llm::{
    FocusArea, GenerationMode, GenerationRequest, GenerationResult, GenerationSource,
    PromptProvider, ProviderId,
};
pub use orchestrator::GenerationOrchestrator;

/// Error type for promptforge operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// Remote-generation failures have their own taxonomy ([`llm::GenerationError`])
/// which is absorbed by the orchestrator and never surfaces through this type.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - The idea text is empty or whitespace-only at the CLI boundary
    /// - An unknown mode, focus area, or provider name is given
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The config file cannot be read or parsed
    /// - Writing the generated prompt to a file fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for promptforge operations.
pub type Result<T> = std::result::Result<T, Error>;
