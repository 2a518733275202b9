//! API request and response types

use crate::advice::{AdviceResponse, BmiAssessment, DISCLAIMER};
use crate::health_metrics::{
    healthy_weight_range, weight_change_to_normal, BmiCategory, ChartBucket, HealthyWeightRange,
    WeightChange,
};
use crate::units::{ConvertedMeasurement, UnitSystem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// BMI calculation without advice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiCalculationResponse {
    pub bmi: f64,
    pub category: BmiCategory,
    pub bucket: ChartBucket,
    pub unit_system: UnitSystem,
    pub weight: f64,
    /// Height in m (metric) or inches (imperial)
    pub height: f64,
    pub healthy_weight_range: HealthyWeightRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_change: Option<WeightChange>,
}

impl BmiCalculationResponse {
    pub fn new(measurement: &ConvertedMeasurement, category: BmiCategory) -> Self {
        let ConvertedMeasurement {
            unit_system,
            weight,
            height,
            bmi,
        } = *measurement;
        Self {
            bmi,
            category,
            bucket: category.bucket(),
            unit_system,
            weight,
            height,
            healthy_weight_range: healthy_weight_range(unit_system, height),
            weight_change: weight_change_to_normal(unit_system, weight, height, category),
        }
    }
}

/// Full assessment: calculation plus normalized advice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiAssessmentResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub calculation: BmiCalculationResponse,
    pub advice: AdviceResponse,
    pub disclaimer: String,
    pub generated_at: DateTime<Utc>,
}

impl BmiAssessmentResponse {
    pub fn new(measurement: &ConvertedMeasurement, assessment: BmiAssessment) -> Self {
        Self {
            id: Uuid::new_v4(),
            calculation: BmiCalculationResponse::new(measurement, assessment.category),
            advice: assessment.advice,
            disclaimer: DISCLAIMER.to_string(),
            generated_at: Utc::now(),
        }
    }
}
