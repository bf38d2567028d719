//! Binary entry point for promptforge.
//!
//! This binary provides the CLI interface for the prompt generator.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use promptforge::cli::{AnalyzeCommand, GenerateCommand};
use promptforge::config::ForgeConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Promptforge - combined system-prompt generator for AI coding assistants.
#[derive(Parser)]
#[command(name = "promptforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Generate a system prompt for an idea.
    Generate {
        /// The idea to build a prompt for.
        idea: String,

        /// Prompt shape: comprehensive or focused.
        #[arg(short, long, default_value = "comprehensive")]
        mode: String,

        /// Focus area for focused mode: general, coding, design,
        /// architecture, or debugging.
        #[arg(short, long)]
        focus: Option<String>,

        /// Provider to try first: anthropic or openai.
        #[arg(short, long)]
        provider: Option<String>,

        /// Skip remote providers and use local templates only.
        #[arg(long)]
        offline: bool,

        /// Write the prompt to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the full result envelope as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the classifier output for an idea.
    Analyze {
        /// The idea to classify.
        idea: String,

        /// Emit the analysis as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "promptforge=debug" } else { "promptforge=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> promptforge::Result<ForgeConfig> {
    path.map_or_else(
        || Ok(ForgeConfig::load_default()),
        |p| ForgeConfig::load_from_file(p).map(ForgeConfig::with_env_overrides),
    )
}

fn run_command(cli: Cli, config: &ForgeConfig) -> promptforge::Result<()> {
    match cli.command {
        Commands::Generate {
            idea,
            mode,
            focus,
            provider,
            offline,
            output,
            json,
        } => GenerateCommand {
            idea,
            mode,
            focus,
            provider,
            offline,
            output,
            json,
        }
        .run(config),
        Commands::Analyze { idea, json } => AnalyzeCommand { idea, json }.run(),
    }
}

fn main() -> ExitCode {
    // Load .env before reading any credential from the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}
