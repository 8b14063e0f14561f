//! Sample Record Client
//!
//! Generates randomized in-domain screening records and submits them to a
//! running API instance. Smoke-test tooling for a deployment, not part of
//! the served API.
//!
//! Usage: sample-client [base_url] [count]

use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Record structure matching the API's expected format
#[derive(Debug, Clone, Serialize)]
struct ChildRecord {
    age_months: u32,
    sex: String,
    weight_kg: f64,
    height_cm: f64,
    monthly_income: f64,
    mother_education: String,
    has_water_access: bool,
    has_electricity_access: bool,
    altitude_m: u32,
    distance_to_clinic_km: f64,
}

/// Assessment fields the client reports on
#[derive(Debug, Deserialize)]
struct RiskAssessment {
    risk_level: String,
    probability: f64,
    recommendation: String,
}

/// Record generator for testing
struct RecordGenerator {
    rng: rand::rngs::ThreadRng,
    record_counter: u64,
}

impl RecordGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            record_counter: 0,
        }
    }

    fn sex(&mut self) -> String {
        if self.rng.gen_bool(0.5) {
            "male".to_string()
        } else {
            "female".to_string()
        }
    }

    /// Generate a well-nourished household profile
    fn generate_low_risk(&mut self) -> ChildRecord {
        self.record_counter += 1;
        ChildRecord {
            age_months: self.rng.gen_range(12..=60),
            sex: self.sex(),
            weight_kg: self.rng.gen_range(13.0..22.0),
            height_cm: self.rng.gen_range(90.0..115.0),
            monthly_income: self.rng.gen_range(1500.0..5000.0),
            mother_education: if self.rng.gen_bool(0.5) {
                "secondary".to_string()
            } else {
                "higher".to_string()
            },
            has_water_access: true,
            has_electricity_access: true,
            altitude_m: self.rng.gen_range(0..2000),
            distance_to_clinic_km: self.rng.gen_range(0.5..5.0),
        }
    }

    /// Generate a deprived household profile likely to trip several factors
    fn generate_high_risk(&mut self) -> ChildRecord {
        self.record_counter += 1;
        ChildRecord {
            age_months: self.rng.gen_range(6..=36),
            sex: self.sex(),
            weight_kg: self.rng.gen_range(6.0..11.5),
            height_cm: self.rng.gen_range(65.0..84.0),
            monthly_income: self.rng.gen_range(200.0..900.0),
            mother_education: "primary".to_string(),
            has_water_access: false,
            has_electricity_access: self.rng.gen_bool(0.5),
            altitude_m: self.rng.gen_range(3600..4800),
            distance_to_clinic_km: self.rng.gen_range(11.0..30.0),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let count: usize = std::env::args()
        .nth(2)
        .and_then(|c| c.parse().ok())
        .unwrap_or(20);

    info!(base_url = %base_url, count = count, "Starting sample record client");

    let client = reqwest::Client::new();
    let mut generator = RecordGenerator::new();

    let mut high_risk = 0usize;
    let mut rejected = 0usize;

    for i in 0..count {
        let record = if generator.rng.gen_bool(0.3) {
            generator.generate_high_risk()
        } else {
            generator.generate_low_risk()
        };

        let response = client
            .post(format!("{}/predict", base_url))
            .json(&record)
            .send()
            .await?;

        if response.status().is_success() {
            let assessment: RiskAssessment = response.json().await?;
            if assessment.risk_level == "high" {
                high_risk += 1;
            }
            info!(
                record = i,
                risk_level = %assessment.risk_level,
                probability = assessment.probability,
                recommendation = %assessment.recommendation,
                "Record assessed"
            );
        } else {
            rejected += 1;
            warn!(record = i, status = %response.status(), "Request rejected");
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    info!(
        sent = generator.record_counter,
        high_risk = high_risk,
        rejected = rejected,
        "Sample run complete"
    );

    Ok(())
}
