//! Type definitions for the malnutrition risk API

pub mod assessment;
pub mod record;

pub use assessment::{RiskAssessment, RiskLevel};
pub use record::ChildRecord;
