//! ONNX-backed scaler and classifier collaborators

use crate::models::loader::LoadedArtifact;
use crate::models::{FeatureScaler, RiskClassifier};
use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType};
use std::sync::RwLock;
use tracing::debug;

/// Feature scaler backed by an ONNX export of the training-time scaler.
///
/// Sessions require exclusive access per run, so the artifact sits behind a
/// lock; it is never mutated after loading.
pub struct OnnxScaler {
    artifact: RwLock<LoadedArtifact>,
}

impl OnnxScaler {
    pub fn new(artifact: LoadedArtifact) -> Self {
        Self {
            artifact: RwLock::new(artifact),
        }
    }
}

impl FeatureScaler for OnnxScaler {
    fn transform(&self, features: &[f32]) -> Result<Vec<f32>> {
        use ort::value::Tensor;

        let mut artifact = self
            .artifact
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        let artifact = &mut *artifact;

        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = artifact
            .session
            .run(ort::inputs![&artifact.input_name => input_tensor])?;

        let scaled = extract_scaled_row(&outputs, &artifact.output_name, &artifact.name)?;

        if scaled.len() != features.len() {
            anyhow::bail!(
                "Scaler returned {} values for {} features",
                scaled.len(),
                features.len()
            );
        }

        Ok(scaled)
    }
}

/// Risk classifier backed by an ONNX export of the trained model.
pub struct OnnxClassifier {
    artifact: RwLock<LoadedArtifact>,
}

impl OnnxClassifier {
    pub fn new(artifact: LoadedArtifact) -> Self {
        Self {
            artifact: RwLock::new(artifact),
        }
    }
}

impl RiskClassifier for OnnxClassifier {
    fn predict_proba(&self, features: &[f32]) -> Result<f64> {
        use ort::value::Tensor;

        let mut artifact = self
            .artifact
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        let artifact = &mut *artifact;

        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = artifact
            .session
            .run(ort::inputs![&artifact.input_name => input_tensor])?;

        let probability = extract_probability(&outputs, &artifact.output_name, &artifact.name)?;

        Ok(probability.clamp(0.0, 1.0))
    }
}

/// Extract the scaled feature row from scaler output.
///
/// The scaler emits a single float tensor with the same shape as its input.
fn extract_scaled_row(
    outputs: &ort::session::SessionOutputs,
    output_name: &str,
    artifact_name: &str,
) -> Result<Vec<f32>> {
    if let Some(output) = outputs.get(output_name) {
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            return Ok(data.to_vec());
        }
    }

    // Fallback: first float tensor among all outputs
    for (name, output) in outputs.iter() {
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            debug!(artifact = %artifact_name, output = %name, "Extracted scaled row (fallback)");
            return Ok(data.to_vec());
        }
    }

    anyhow::bail!("No float tensor output in artifact {}", artifact_name)
}

/// Extract the positive-class probability from classifier output.
///
/// Handles both tensor outputs (shape [1, 2] probability matrix) and
/// seq(map(int64, float)) outputs, the common sklearn-to-ONNX export shape
/// for tree ensembles with ZipMap enabled.
fn extract_probability(
    outputs: &ort::session::SessionOutputs,
    output_name: &str,
    artifact_name: &str,
) -> Result<f64> {
    // First, try the discovered probability output by name
    if let Some(output) = outputs.get(output_name) {
        let dtype = output.dtype();

        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            let dims: Vec<i64> = shape.iter().copied().collect();
            if let Some(index) = positive_class_index(&dims) {
                debug!(artifact = %artifact_name, prob = data[index], "Extracted from tensor");
                return Ok(data[index] as f64);
            }
            anyhow::bail!(
                "Unexpected probability tensor shape {:?} in artifact {}",
                dims,
                artifact_name
            );
        }

        if DynSequenceValueType::can_downcast(&dtype) {
            if let Ok(prob) = extract_from_sequence_map(output, artifact_name) {
                return Ok(prob);
            }
        }
    }

    // Fallback: iterate all outputs and try extraction
    for (name, output) in outputs.iter() {
        // Skip the predicted-label output
        if name.contains("label") {
            continue;
        }

        let dtype = output.dtype();

        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            let dims: Vec<i64> = shape.iter().copied().collect();
            if let Some(index) = positive_class_index(&dims) {
                debug!(artifact = %artifact_name, output = %name, "Extracted from tensor (fallback)");
                return Ok(data[index] as f64);
            }
        }

        if DynSequenceValueType::can_downcast(&dtype) {
            if let Ok(prob) = extract_from_sequence_map(&output, artifact_name) {
                return Ok(prob);
            }
        }
    }

    anyhow::bail!(
        "No probability output found in classifier artifact {}",
        artifact_name
    )
}

/// Index of the positive-class value in a flattened probability tensor.
///
/// Two-class outputs carry the at-risk mass in column 1; single-column
/// outputs already hold the positive probability.
fn positive_class_index(dims: &[i64]) -> Option<usize> {
    match dims {
        [_, n] if *n >= 2 => Some(1),
        [_, 1] => Some(0),
        [n] if *n >= 2 => Some(1),
        [1] => Some(0),
        _ => None,
    }
}

/// Extract the positive-class probability from seq(map(int64, float)) output.
fn extract_from_sequence_map(output: &ort::value::DynValue, artifact_name: &str) -> Result<f64> {
    let allocator = Allocator::default();

    let sequence = output
        .downcast_ref::<DynSequenceValueType>()
        .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;

    let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;

    if maps.is_empty() {
        return Err(anyhow::anyhow!("Empty sequence"));
    }

    // Single-row batch, so only the first map matters
    let map_value = &maps[0];
    let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

    // Class 1 carries the at-risk probability
    for (class_id, prob) in &kv_pairs {
        if *class_id == 1 {
            debug!(
                artifact = %artifact_name,
                prob = *prob,
                "Extracted from seq(map)"
            );
            return Ok(*prob as f64);
        }
    }

    // Two-class output missing class 1: invert class 0
    for (class_id, prob) in &kv_pairs {
        if *class_id == 0 {
            return Ok(1.0 - *prob as f64);
        }
    }

    Err(anyhow::anyhow!("No probability found in map"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_class_index_two_class_matrix() {
        assert_eq!(positive_class_index(&[1, 2]), Some(1));
        assert_eq!(positive_class_index(&[1, 3]), Some(1));
    }

    #[test]
    fn test_positive_class_index_single_column() {
        assert_eq!(positive_class_index(&[1, 1]), Some(0));
        assert_eq!(positive_class_index(&[1]), Some(0));
    }

    #[test]
    fn test_positive_class_index_flat_vector() {
        assert_eq!(positive_class_index(&[2]), Some(1));
    }

    #[test]
    fn test_positive_class_index_rejects_unknown_ranks() {
        assert_eq!(positive_class_index(&[]), None);
        assert_eq!(positive_class_index(&[1, 2, 2]), None);
    }
}
