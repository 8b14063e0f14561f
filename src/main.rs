//! Malnutrition Risk API - Main Entry Point
//!
//! Loads the scaler and classifier artifacts, then serves screening
//! requests over HTTP. Artifact loading failure is fatal: the process
//! never binds the listener with a missing model.

use anyhow::Result;
use malnutrition_risk_api::{
    api::{self, AppState},
    config::AppConfig,
    models::{ArtifactLoader, OnnxClassifier, OnnxScaler},
    screening::Screener,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("malnutrition_risk_api=info".parse()?),
        )
        .init();

    info!("Starting Malnutrition Risk API");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");
    info!(
        "Risk bands: high >= {:.2}, urgent >= {:.2}",
        config.screening.bands.high, config.screening.bands.urgent
    );

    // Load both artifacts; failure here exits before serving
    let loader = ArtifactLoader::with_threads(config.artifacts.onnx_threads)?;
    let scaler = OnnxScaler::new(loader.load_artifact(&config.artifacts.scaler_path, "scaler")?);
    let classifier =
        OnnxClassifier::new(loader.load_artifact(&config.artifacts.model_path, "classifier")?);
    info!("Scaler and classifier artifacts loaded");

    let screener = Screener::new(
        Arc::new(scaler),
        Arc::new(classifier),
        config.screening.clone(),
    );
    let app = api::router(AppState::new(screener));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
