//! Model artifact loading and inference collaborators

pub mod inference;
pub mod loader;

use anyhow::Result;

/// Feature scaling collaborator, fit at training time.
///
/// Behind a trait so the screener can be exercised with test doubles.
pub trait FeatureScaler: Send + Sync {
    /// Normalize a feature vector. The output has the same length and
    /// ordering as the input.
    fn transform(&self, features: &[f32]) -> Result<Vec<f32>>;
}

/// Binary risk classifier collaborator.
pub trait RiskClassifier: Send + Sync {
    /// Probability mass assigned to the positive (at-risk) class, in [0, 1].
    fn predict_proba(&self, features: &[f32]) -> Result<f64>;
}

pub use inference::{OnnxClassifier, OnnxScaler};
pub use loader::ArtifactLoader;
