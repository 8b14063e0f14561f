//! Configuration management for the screening service

use crate::screening::ScreeningConfig;
use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub screening: ScreeningConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Path to the classifier ONNX file
    pub model_path: String,
    /// Path to the scaler ONNX file
    pub scaler_path: String,
    /// Number of threads for ONNX inference per session (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            artifacts: ArtifactsConfig {
                model_path: "models/malnutrition_rf.onnx".to_string(),
                scaler_path: "models/scaler.onnx".to_string(),
                onnx_threads: 1,
            },
            screening: ScreeningConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.artifacts.onnx_threads, 1);
        assert_eq!(config.screening.bands.high, 0.5);
        assert_eq!(config.screening.bands.urgent, 0.8);
    }

    #[test]
    fn test_default_factor_thresholds() {
        let factors = AppConfig::default().screening.factors;
        assert_eq!(factors.low_weight_kg, 12.0);
        assert_eq!(factors.low_height_cm, 85.0);
        assert_eq!(factors.low_income, 1000.0);
        assert_eq!(factors.high_altitude_m, 3500.0);
        assert_eq!(factors.far_clinic_km, 10.0);
    }
}
