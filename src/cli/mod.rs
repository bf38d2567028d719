//! CLI command implementations.
//!
//! This module provides the command-line interface for promptforge. The
//! binary is the caller of the generation pipeline; the pipeline itself
//! knows nothing about the CLI.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `generate` | Generate a system prompt for an idea |
//! | `analyze` | Show the classifier output for an idea |
//!
//! # Example Usage
//!
//! ```bash
//! # Full multi-section prompt, remote when a provider key is configured
//! promptforge generate "Build a recipe-sharing web app"
//!
//! # Shorter coding-focused prompt, local templates only
//! promptforge generate --mode focused --focus coding --offline "Fix my build"
//!
//! # Inspect classification without generating
//! promptforge analyze "a scalable backend API with PostgreSQL"
//! ```

mod analyze;
mod generate;

pub use analyze::AnalyzeCommand;
pub use generate::GenerateCommand;
