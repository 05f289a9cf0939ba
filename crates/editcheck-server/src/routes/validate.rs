//! Validation endpoint

use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::info;

use editcheck_core::ValidationSummary;

use crate::error::Result;
use crate::models::ApplicationData;
use crate::state::AppState;

/// Evaluate an application record against the configured rule set.
///
/// Structural problems with the payload are rejected by the typed
/// extractor before this handler runs; everything that deserializes
/// gets a full per-rule summary with status 200, valid or not.
pub async fn validate_application(
    State(state): State<Arc<AppState>>,
    Json(application): Json<ApplicationData>,
) -> Result<Json<ValidationSummary>> {
    let record = serde_json::to_value(&application)?;
    let summary = state.engine.validate(&record);

    info!(
        valid = summary.valid,
        errors = summary.errors.len(),
        warnings = summary.warnings.len(),
        "Validated application"
    );

    Ok(Json(summary))
}
