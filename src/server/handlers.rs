//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::types::*;
use crate::config::resolve_model;
use crate::core::explainer::Explainer;
use crate::core::{ChatCompletion, Explanation};
use crate::utils::validation::validate_error_message;

pub type SharedExplainer = Explainer<Arc<dyn ChatCompletion>>;

/// Shared application state
pub struct AppState {
    pub explainer: SharedExplainer,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(explainer: SharedExplainer) -> Self {
        Self {
            explainer,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(message)))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

pub async fn explain_error(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExplainRequest>,
) -> ApiResult<Explanation> {
    let start = Instant::now();

    validate_error_message(&req.error).map_err(|e| bad_request(e.user_friendly_message()))?;

    let model = match req.model.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(name) => resolve_model(name).map_err(|e| bad_request(e.user_friendly_message()))?,
        None => state.explainer.settings().model.clone(),
    };

    let result = state
        .explainer
        .explain_with_model(req.error.trim(), &model)
        .await;

    info!(
        "POST /explain -> {} via {} in {}ms",
        result.error_type,
        model,
        start.elapsed().as_millis()
    );

    Ok(Json(result))
}
