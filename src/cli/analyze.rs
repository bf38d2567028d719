//! `analyze` command implementation.

use crate::analysis::analyze;
use crate::{Error, Result};

/// Shows the classifier output for an idea without generating a prompt.
#[derive(Debug, Clone)]
pub struct AnalyzeCommand {
    /// The idea text.
    pub idea: String,
    /// Emit the analysis as JSON.
    pub json: bool,
}

impl AnalyzeCommand {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty idea.
    pub fn run(&self) -> Result<()> {
        if self.idea.trim().is_empty() {
            return Err(Error::InvalidInput("idea must not be empty".to_string()));
        }

        let analysis = analyze(&self.idea);

        if self.json {
            let rendered =
                serde_json::to_string_pretty(&analysis).map_err(|e| Error::OperationFailed {
                    operation: "render_analysis_json".to_string(),
                    cause: e.to_string(),
                })?;
            println!("{rendered}");
            return Ok(());
        }

        let domains: Vec<&str> = analysis.domains.iter().map(|d| d.as_str()).collect();
        println!(
            "domains: {}",
            if domains.is_empty() {
                "(none)".to_string()
            } else {
                domains.join(", ")
            }
        );
        println!("complexity: {}", analysis.complexity.as_str());
        println!(
            "technologies: {}",
            if analysis.technologies.is_empty() {
                "(none)".to_string()
            } else {
                analysis.technologies.join(", ")
            }
        );

        Ok(())
    }
}
