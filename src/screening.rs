//! Risk screening: feature assembly, inference, and interpretation.
//!
//! The screener is the only non-trivial request path in the service. It is
//! deterministic for fixed collaborator state and keeps no state between
//! calls.

use crate::features::FeatureExtractor;
use crate::models::{FeatureScaler, RiskClassifier};
use crate::types::assessment::{
    FactorThresholds, ProbabilityBands, RecommendationTier, RiskAssessment, RiskLevel,
};
use crate::types::record::{ChildRecord, MotherEducation};
use anyhow::Result;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Sentinel returned when no rule-based factor fires.
pub const NO_CRITICAL_FACTORS: &str = "no critical factors detected";

/// Screening thresholds, loaded from the `[screening]` config section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreeningConfig {
    /// Probability band boundaries
    #[serde(default)]
    pub bands: ProbabilityBands,
    /// Raw-input thresholds for key factors
    #[serde(default)]
    pub factors: FactorThresholds,
}

/// Screens validated records against the trained scaler + classifier pair.
pub struct Screener {
    extractor: FeatureExtractor,
    scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn RiskClassifier>,
    config: ScreeningConfig,
}

impl Screener {
    /// Create a screener over the given collaborators.
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        classifier: Arc<dyn RiskClassifier>,
        config: ScreeningConfig,
    ) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            scaler,
            classifier,
            config,
        }
    }

    /// Assess a validated record.
    ///
    /// Assembles the feature vector, scales it, runs inference, and
    /// interprets the probability into risk level, recommendation tier,
    /// and rule-based key factors.
    pub fn assess(&self, record: &ChildRecord) -> Result<RiskAssessment> {
        let features = self.extractor.extract(record);
        let scaled = self.scaler.transform(&features)?;
        let raw = self.classifier.predict_proba(&scaled)?;

        // Band from the rounded value so the reported triple is consistent
        let probability = round_to_3dp(raw);
        let risk_level = RiskLevel::from_probability(probability, &self.config.bands);
        let tier = RecommendationTier::from_probability(probability, &self.config.bands);
        let key_factors = self.key_factors(record);

        debug!(
            probability = probability,
            risk_level = ?risk_level,
            factors = key_factors.len(),
            "Record screened"
        );

        Ok(RiskAssessment {
            risk_level,
            probability,
            key_factors,
            recommendation: tier.message().to_string(),
        })
    }

    /// Rule-based contributing factors, evaluated on the raw record in a
    /// fixed order. Independent of the model output.
    fn key_factors(&self, record: &ChildRecord) -> Vec<String> {
        let t = &self.config.factors;
        let mut factors: Vec<&str> = Vec::new();

        if record.weight_kg < t.low_weight_kg {
            factors.push("low weight");
        }
        if record.height_cm < t.low_height_cm {
            factors.push("low height");
        }
        if record.monthly_income < t.low_income {
            factors.push("low income");
        }
        if record.mother_education == MotherEducation::Primary {
            factors.push("basic maternal education");
        }
        if !record.has_water_access {
            factors.push("no potable water access");
        }
        if !record.has_electricity_access {
            factors.push("no electricity access");
        }
        if f64::from(record.altitude_m) > t.high_altitude_m {
            factors.push("high altitude");
        }
        if record.distance_to_clinic_km > t.far_clinic_km {
            factors.push("far from health facility");
        }

        if factors.is_empty() {
            vec![NO_CRITICAL_FACTORS.to_string()]
        } else {
            factors.into_iter().map(String::from).collect()
        }
    }
}

fn round_to_3dp(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
