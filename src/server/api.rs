//! Strict front end: every organizer record is schema-checked before scoring.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::ApiError;
use crate::scoring::{score_organizer, validate_organizer_request, OrganizerRiskRequest, RiskResult};

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// POST /calculate-risk
pub async fn calculate_risk(
    payload: Result<Json<OrganizerRiskRequest>, JsonRejection>,
) -> Result<Json<RiskResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected organizer body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let input = validate_organizer_request(&request).map_err(|errors| {
        debug!("Organizer record failed validation: {:?}", errors);
        ApiError::Validation(errors)
    })?;

    let result = score_organizer(&input);
    info!(
        score = result.risk_score,
        level = %result.risk_level,
        "Scored organizer via strict API"
    );
    Ok(Json(result))
}
