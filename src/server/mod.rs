//! HTTP API exposing the explainer to browser clients

pub mod handlers;
pub mod routes;
pub mod types;

use crate::app::build_verifier;
use crate::adapters::OpenRouterClient;
use crate::core::explainer::{Explainer, ExplainerSettings};
use crate::core::{ChatCompletion, ConfigProvider};
use crate::utils::error::Result;
use std::sync::Arc;

pub use handlers::{AppState, SharedExplainer};
pub use routes::create_router;
pub use types::*;

pub fn build_state<C: ConfigProvider + ?Sized>(config: &C) -> Result<AppState> {
    let client: Arc<dyn ChatCompletion> = Arc::new(OpenRouterClient::from_config(config)?);
    let explainer = Explainer::new(
        client,
        build_verifier(config)?,
        ExplainerSettings::from_config(config),
    );
    Ok(AppState::new(explainer))
}
