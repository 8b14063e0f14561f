//! HTTP surface for the screening service.
//!
//! ## Endpoints
//!
//! - `GET /` - service metadata
//! - `GET /health` - liveness and model status
//! - `POST /predict` - screen a child record
//!
//! CORS is permissive: the service is called directly from browser
//! frontends in the field.

pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Create the API router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureScaler, RiskClassifier};
    use crate::screening::{Screener, ScreeningConfig};
    use anyhow::Result;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct IdentityScaler;

    impl FeatureScaler for IdentityScaler {
        fn transform(&self, features: &[f32]) -> Result<Vec<f32>> {
            Ok(features.to_vec())
        }
    }

    struct FixedClassifier(f64);

    impl RiskClassifier for FixedClassifier {
        fn predict_proba(&self, _features: &[f32]) -> Result<f64> {
            Ok(self.0)
        }
    }

    fn test_app(probability: f64) -> Router {
        let screener = Screener::new(
            Arc::new(IdentityScaler),
            Arc::new(FixedClassifier(probability)),
            ScreeningConfig::default(),
        );
        router(AppState::new(screener))
    }

    fn predict_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn sample_body() -> Value {
        json!({
            "age_months": 24,
            "sex": "female",
            "weight_kg": 11.0,
            "height_cm": 80.0,
            "monthly_income": 500.0,
            "mother_education": "primary",
            "has_water_access": false,
            "has_electricity_access": true,
            "altitude_m": 4000,
            "distance_to_clinic_km": 15.0
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_app(0.5)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["status"], "healthy");
        assert_eq!(payload["model_loaded"], true);
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let response = test_app(0.5)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["endpoints"]["predict"], "/predict");
    }

    #[tokio::test]
    async fn test_predict_round_trip() {
        let response = test_app(0.92)
            .oneshot(predict_request(sample_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(payload["risk_level"], "high");
        assert_eq!(payload["probability"], 0.92);
        assert_eq!(payload["recommendation"], "urgent evaluation within 48 hours");
        assert_eq!(payload["key_factors"][0], "low weight");
    }

    #[tokio::test]
    async fn test_predict_rejects_out_of_domain_field() {
        let mut body = sample_body();
        body["age_months"] = json!(4);

        let response = test_app(0.5).oneshot(predict_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["code"], "VALIDATION_ERROR");
        assert_eq!(payload["details"][0]["field"], "age_months");
    }

    #[tokio::test]
    async fn test_predict_rejects_unknown_sex_variant() {
        let mut body = sample_body();
        body["sex"] = json!("X");

        let response = test_app(0.5).oneshot(predict_request(body)).await.unwrap();

        // Rejected by the JSON extractor before the handler runs
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
