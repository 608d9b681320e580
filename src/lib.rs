pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use app::{build_explainer, build_verifier, format_report};
pub use config::{AppConfig, ModelChoice};
pub use core::explainer::{Explainer, ExplainerSettings};
pub use domain::model::Explanation;
pub use utils::error::{ExplainError, Result};
