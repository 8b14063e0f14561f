//! Feature extraction for malnutrition risk model inference.
//!
//! Transforms a validated screening record into the feature vector the
//! scaler and classifier were fit against.

use crate::types::record::ChildRecord;

/// Feature extractor that transforms screening records into model input.
///
/// Features are produced in the exact order used during training; the
/// scaler's per-column parameters make any permutation a silent corruption,
/// so the ordering here is a strict contract.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the 12-element feature vector from a record.
    ///
    /// The first ten elements are the raw fields in training-column order;
    /// the last two are engineered (BMI and household services index).
    pub fn extract(&self, record: &ChildRecord) -> Vec<f32> {
        let mut features = Vec::with_capacity(12);

        let water = if record.has_water_access { 1.0_f32 } else { 0.0 };
        let electricity = if record.has_electricity_access { 1.0_f32 } else { 0.0 };

        features.push(record.age_months as f32);
        features.push(record.sex.encoded());
        features.push(record.weight_kg as f32);
        features.push(record.height_cm as f32);
        features.push(record.monthly_income as f32);
        features.push(record.mother_education.encoded());
        features.push(water);
        features.push(electricity);
        features.push(record.altitude_m as f32);
        features.push(record.distance_to_clinic_km as f32);

        // bmi (height > 0 is guaranteed by input validation)
        let height_m = record.height_cm / 100.0;
        let bmi = record.weight_kg / (height_m * height_m);
        features.push(bmi as f32);

        // services_index: mean of the two access bits, one of {0.0, 0.5, 1.0}
        let services_index = (water + electricity) / 2.0;
        features.push(services_index);

        features
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        12
    }

    /// Get feature names in training-column order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "age_months",
            "sex",
            "weight_kg",
            "height_cm",
            "monthly_income",
            "mother_education",
            "water_access",
            "electricity_access",
            "altitude_m",
            "distance_to_clinic_km",
            "bmi",
            "services_index",
        ]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
