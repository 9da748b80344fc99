//! Command-line interface for songvault.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::merge::{MergeConfig, MergeError, MergeSummary, run_merge};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during CLI execution.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid arguments, detected before any mutation.
    #[error("{0}")]
    InvalidArgs(String),

    /// Merge run error.
    #[error("{0}")]
    Merge(#[from] MergeError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

// =============================================================================
// CLI Definition
// =============================================================================

/// songvault - merge extracted song folders into a bucketed archive.
#[derive(Parser, Debug)]
#[command(name = "svault", version, about, long_about = None)]
pub struct Cli {
    /// Directory whose immediate subfolders are the extracted song folders.
    pub source_directory: PathBuf,

    /// Root of the destination archive (bucket directories are created here).
    pub destination_directory: PathBuf,

    /// Optional tag appended as " (tag)" to keep genuinely different
    /// same-named folders side by side (e.g. "Append").
    pub disambiguation_tag: Option<String>,

    /// Format the run summary as JSON.
    #[arg(long)]
    pub json: bool,
}

// =============================================================================
// CLI Execution
// =============================================================================

impl Cli {
    /// Parse command-line arguments and return the CLI instance.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Run the merge and print the results.
    pub async fn run(self) -> Result<()> {
        let config = self.to_config()?;
        let summary = run_merge(&config).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_text(&summary);
        }
        Ok(())
    }

    /// Validate arguments and build the run configuration. Runs before any
    /// filesystem mutation.
    fn to_config(&self) -> Result<MergeConfig> {
        if !self.source_directory.is_dir() {
            return Err(CliError::InvalidArgs(format!(
                "source directory '{}' does not exist",
                self.source_directory.display()
            )));
        }
        if !self.destination_directory.is_dir() {
            return Err(CliError::InvalidArgs(format!(
                "destination directory '{}' does not exist",
                self.destination_directory.display()
            )));
        }
        if let Some(tag) = &self.disambiguation_tag
            && tag.trim().is_empty()
        {
            return Err(CliError::InvalidArgs(
                "disambiguation tag must not be empty".to_string(),
            ));
        }
        Ok(MergeConfig {
            source_root: self.source_directory.clone(),
            dest_root: self.destination_directory.clone(),
            tag: self.disambiguation_tag.clone(),
        })
    }
}

fn print_text(summary: &MergeSummary) {
    for report in &summary.unsafe_conflicts {
        println!("{}", report);
    }
    for failed in &summary.failed {
        println!("failed: {}: {}", failed.folder, failed.error);
    }
    println!("{}", summary);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point for the CLI.
pub async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse_args();
    cli.run().await
}
