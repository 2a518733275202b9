//! BMI Insights WASM Module
//!
//! This crate provides WebAssembly bindings so the browser form can compute
//! and classify BMI with the same arithmetic as the server.

use bmi_insights_shared::{classify_bmi as classify, convert, BmiCategory, MeasurementInput};
use wasm_bindgen::prelude::*;

fn bmi_or_nan(input: MeasurementInput) -> f64 {
    convert(&input).map(|m| m.bmi).unwrap_or(f64::NAN)
}

/// Calculate BMI from weight (kg) and height (m)
///
/// Returns `NaN` when the measurement is invalid.
#[wasm_bindgen]
pub fn calculate_bmi_metric(weight: f64, height: f64) -> f64 {
    bmi_or_nan(MeasurementInput::Metric { weight, height })
}

/// Calculate BMI from weight (lb) and height in feet and inches
///
/// Returns `NaN` when the measurement is invalid.
#[wasm_bindgen]
pub fn calculate_bmi_imperial(weight: f64, feet: f64, inches: f64) -> f64 {
    bmi_or_nan(MeasurementInput::Imperial {
        weight,
        feet,
        inches,
    })
}

/// Six-way category label for a BMI
///
/// Returns an empty string for NaN, infinite or non-positive input, so the
/// result of a failed `calculate_*` call never gets a label.
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    category(bmi)
        .map(|c| c.label().to_string())
        .unwrap_or_default()
}

/// Four-way chart bucket name for a BMI, empty for invalid input
#[wasm_bindgen]
pub fn chart_bucket(bmi: f64) -> String {
    category(bmi)
        .map(|c| c.bucket().name().to_string())
        .unwrap_or_default()
}

fn category(bmi: f64) -> Option<BmiCategory> {
    (bmi.is_finite() && bmi > 0.0).then(|| classify(bmi))
}
