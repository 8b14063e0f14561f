//! Risk assessment output types and screening thresholds

use serde::{Deserialize, Serialize};

/// Binary risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    /// Determine risk level from the estimated probability.
    ///
    /// A probability exactly at the band boundary classifies High.
    pub fn from_probability(probability: f64, bands: &ProbabilityBands) -> Self {
        if probability >= bands.high {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

/// Follow-up recommendation tier, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTier {
    Urgent,
    Priority,
    Routine,
}

impl RecommendationTier {
    /// Determine the tier from the estimated probability. Band boundaries
    /// select the more severe tier.
    pub fn from_probability(probability: f64, bands: &ProbabilityBands) -> Self {
        if probability >= bands.urgent {
            RecommendationTier::Urgent
        } else if probability >= bands.high {
            RecommendationTier::Priority
        } else {
            RecommendationTier::Routine
        }
    }

    /// Caller-facing recommendation text.
    pub fn message(self) -> &'static str {
        match self {
            RecommendationTier::Urgent => "urgent evaluation within 48 hours",
            RecommendationTier::Priority => "evaluation within 7 days",
            RecommendationTier::Routine => "routine follow-up at scheduled checkups",
        }
    }
}

/// Probability band boundaries, fit to the trained model's calibration.
///
/// Do not change these without re-validating against the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityBands {
    /// At or above this the record is high risk
    pub high: f64,
    /// At or above this the recommendation escalates to urgent
    pub urgent: f64,
}

impl Default for ProbabilityBands {
    fn default() -> Self {
        Self {
            high: 0.5,
            urgent: 0.8,
        }
    }
}

/// Raw-input thresholds for the rule-based key factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorThresholds {
    pub low_weight_kg: f64,
    pub low_height_cm: f64,
    pub low_income: f64,
    pub high_altitude_m: f64,
    pub far_clinic_km: f64,
}

impl Default for FactorThresholds {
    fn default() -> Self {
        Self {
            low_weight_kg: 12.0,
            low_height_cm: 85.0,
            low_income: 1000.0,
            high_altitude_m: 3500.0,
            far_clinic_km: 10.0,
        }
    }
}

/// Screening result returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Binary risk classification
    pub risk_level: RiskLevel,

    /// Estimated probability of the at-risk class, rounded to 3 decimals
    pub probability: f64,

    /// Rule-based contributing factors, in evaluation order; never empty
    pub key_factors: Vec<String>,

    /// Follow-up recommendation keyed by probability band
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundary_classifies_high() {
        let bands = ProbabilityBands::default();

        assert_eq!(RiskLevel::from_probability(0.5, &bands), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.499, &bands), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.0, &bands), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(1.0, &bands), RiskLevel::High);
    }

    #[test]
    fn test_recommendation_tiers_cover_unit_interval() {
        let bands = ProbabilityBands::default();

        assert_eq!(
            RecommendationTier::from_probability(0.0, &bands),
            RecommendationTier::Routine
        );
        assert_eq!(
            RecommendationTier::from_probability(0.5, &bands),
            RecommendationTier::Priority
        );
        assert_eq!(
            RecommendationTier::from_probability(0.79, &bands),
            RecommendationTier::Priority
        );
        assert_eq!(
            RecommendationTier::from_probability(0.8, &bands),
            RecommendationTier::Urgent
        );
        assert_eq!(
            RecommendationTier::from_probability(1.0, &bands),
            RecommendationTier::Urgent
        );
    }

    #[test]
    fn test_risk_level_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_assessment_serialization() {
        let assessment = RiskAssessment {
            risk_level: RiskLevel::High,
            probability: 0.873,
            key_factors: vec!["low weight".to_string()],
            recommendation: RecommendationTier::Urgent.message().to_string(),
        };

        let json = serde_json::to_string(&assessment).unwrap();
        let deserialized: RiskAssessment = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.risk_level, RiskLevel::High);
        assert_eq!(deserialized.probability, 0.873);
        assert_eq!(deserialized.key_factors, vec!["low weight".to_string()]);
    }
}
