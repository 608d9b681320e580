use crate::config::{AppConfig, ModelChoice};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "stackexplain")]
#[command(about = "Explain a programming error message in plain language")]
#[command(version)]
pub struct CliArgs {
    /// Error message to explain (reads stdin or the clipboard when omitted)
    pub error: Option<String>,

    /// Model to use [default: deepseek]
    #[arg(long, value_enum)]
    pub model: Option<ModelChoice>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of attempts before giving up
    #[arg(long)]
    pub retries: Option<usize>,

    /// Skip checking that suggested links are reachable
    #[arg(long)]
    pub no_verify_links: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Flags win over every other configuration source.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(model) = self.model {
            config.model = model.model_id().to_string();
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if self.no_verify_links {
            config.verify_links = false;
        }
    }
}
