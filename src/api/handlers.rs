//! Axum request handlers for the screening API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;
use validator::Validate;

use super::error::ApiResult;
use super::state::AppState;
use crate::types::assessment::RiskAssessment;
use crate::types::record::ChildRecord;

/// Service metadata returned at the root.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: EndpointList,
}

#[derive(Serialize)]
pub struct EndpointList {
    pub health: &'static str,
    pub predict: &'static str,
}

/// Service metadata handler
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "malnutrition risk screening API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointList {
            health: "/health",
            predict: "/predict",
        },
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub version: &'static str,
}

/// Health check handler. Artifact loading is fatal at startup, so a serving
/// process always has its model loaded.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Screen a child record for malnutrition risk.
///
/// Domain validation runs before any feature engineering; violations return
/// 422 with field-level detail and the screener never executes.
pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<ChildRecord>,
) -> ApiResult<Json<RiskAssessment>> {
    record.validate()?;

    let assessment = state.screener().assess(&record)?;

    debug!(
        risk_level = ?assessment.risk_level,
        probability = assessment.probability,
        "Prediction served"
    );

    Ok(Json(assessment))
}
