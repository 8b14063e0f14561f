//! Screening input record for children under five

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Child sex, encoded for the model as male=1, female=0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Numeric encoding used at training time.
    pub fn encoded(self) -> f32 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }
}

/// Highest education level attained by the mother.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotherEducation {
    Primary,
    Secondary,
    Higher,
}

impl MotherEducation {
    /// Ordinal encoding used at training time.
    pub fn encoded(self) -> f32 {
        match self {
            MotherEducation::Primary => 1.0,
            MotherEducation::Secondary => 2.0,
            MotherEducation::Higher => 3.0,
        }
    }
}

/// A child health and household record submitted for screening.
///
/// Every field must satisfy its domain before feature engineering runs;
/// violations are rejected with field-level detail.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChildRecord {
    /// Age in months (6-60)
    #[validate(range(min = 6, max = 60))]
    pub age_months: u32,

    /// Child sex
    pub sex: Sex,

    /// Weight in kg, exclusive bounds (0, 50)
    #[validate(range(exclusive_min = 0.0, exclusive_max = 50.0))]
    pub weight_kg: f64,

    /// Height in cm, exclusive bounds (0, 150)
    #[validate(range(exclusive_min = 0.0, exclusive_max = 150.0))]
    pub height_cm: f64,

    /// Household monthly income
    #[validate(range(min = 0.0))]
    pub monthly_income: f64,

    /// Mother's education level
    pub mother_education: MotherEducation,

    /// Household has potable water access
    pub has_water_access: bool,

    /// Household has electricity access
    pub has_electricity_access: bool,

    /// Residence altitude in meters (0-5000)
    #[validate(range(max = 5000))]
    pub altitude_m: u32,

    /// Distance to the nearest health facility in km
    #[validate(range(min = 0.0))]
    pub distance_to_clinic_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> ChildRecord {
        ChildRecord {
            age_months: 24,
            sex: Sex::Female,
            weight_kg: 12.5,
            height_cm: 86.0,
            monthly_income: 1500.0,
            mother_education: MotherEducation::Secondary,
            has_water_access: true,
            has_electricity_access: true,
            altitude_m: 500,
            distance_to_clinic_km: 2.0,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_age_out_of_range() {
        let mut record = valid_record();
        record.age_months = 61;
        let errors = record.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("age_months"));

        record.age_months = 5;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_weight_bounds_are_exclusive() {
        let mut record = valid_record();
        record.weight_kg = 0.0;
        assert!(record.validate().is_err());

        record.weight_kg = 50.0;
        assert!(record.validate().is_err());

        record.weight_kg = 49.9;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_height_bounds_are_exclusive() {
        let mut record = valid_record();
        record.height_cm = 150.0;
        assert!(record.validate().is_err());

        record.height_cm = 149.9;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_altitude_capped() {
        let mut record = valid_record();
        record.altitude_m = 5001;
        let errors = record.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("altitude_m"));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = valid_record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ChildRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.age_months, deserialized.age_months);
        assert_eq!(record.sex, deserialized.sex);
        assert_eq!(record.mother_education, deserialized.mother_education);
    }

    #[test]
    fn test_unknown_sex_variant_rejected() {
        let json = r#"{
            "age_months": 24, "sex": "X", "weight_kg": 12.5, "height_cm": 86.0,
            "monthly_income": 1500.0, "mother_education": "secondary",
            "has_water_access": true, "has_electricity_access": true,
            "altitude_m": 500, "distance_to_clinic_km": 2.0
        }"#;
        assert!(serde_json::from_str::<ChildRecord>(json).is_err());
    }

    #[test]
    fn test_enum_encodings() {
        assert_eq!(Sex::Male.encoded(), 1.0);
        assert_eq!(Sex::Female.encoded(), 0.0);
        assert_eq!(MotherEducation::Primary.encoded(), 1.0);
        assert_eq!(MotherEducation::Secondary.encoded(), 2.0);
        assert_eq!(MotherEducation::Higher.encoded(), 3.0);
    }
}
