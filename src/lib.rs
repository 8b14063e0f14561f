//! Malnutrition Risk Screening Library
//!
//! Serves a pre-trained childhood malnutrition risk classifier over HTTP:
//! validated records in, risk assessments out. The scaler and classifier
//! are loaded once at startup and treated as read-only collaborators.

pub mod api;
pub mod config;
pub mod features;
pub mod models;
pub mod screening;
pub mod types;

pub use config::AppConfig;
pub use features::FeatureExtractor;
pub use models::{FeatureScaler, RiskClassifier};
pub use screening::Screener;
pub use types::{assessment::RiskAssessment, record::ChildRecord};
