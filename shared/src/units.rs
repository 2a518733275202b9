//! Unit systems and measurement conversion
//!
//! Turns raw form input (metric or imperial) into a validated measurement
//! carrying the computed BMI. Heights stay in the unit system's native unit
//! (meters or total inches) because that is what the advice request carries.
//!
//! # Formulas
//!
//! - metric: `bmi = kg / m²`
//! - imperial: `bmi = 703 × lb / in²`

use crate::errors::BmiError;
use crate::validation::{
    validate_feet, validate_height_m, validate_inches, validate_total_inches, validate_weight,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversion factor between lb/in² and kg/m² for BMI
pub const IMPERIAL_BMI_FACTOR: f64 = 703.0;

// ============================================================================
// Unit System
// ============================================================================

/// Unit system selected on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Weight unit abbreviation
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    /// Height unit abbreviation (native unit of the height carried downstream)
    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "in",
        }
    }

    /// Compute BMI from a weight and a height in this system's native units
    pub fn bmi(&self, weight: f64, height: f64) -> f64 {
        match self {
            UnitSystem::Metric => weight / (height * height),
            UnitSystem::Imperial => IMPERIAL_BMI_FACTOR * weight / (height * height),
        }
    }

    /// Weight, in this system's unit, that gives `bmi` at `height`
    pub fn weight_for_bmi(&self, bmi: f64, height: f64) -> f64 {
        match self {
            UnitSystem::Metric => bmi * height * height,
            UnitSystem::Imperial => bmi * height * height / IMPERIAL_BMI_FACTOR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

// ============================================================================
// Raw Input
// ============================================================================

/// Raw measurement fields as submitted by the form
///
/// Numbers are accepted as `f64` so that whole-number and range checks on
/// feet/inches report a field error instead of a deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unitSystem", rename_all = "lowercase")]
pub enum MeasurementInput {
    /// Weight in kilograms, height in meters
    Metric { weight: f64, height: f64 },
    /// Weight in pounds, height in feet and inches
    Imperial { weight: f64, feet: f64, inches: f64 },
}

impl MeasurementInput {
    pub fn unit_system(&self) -> UnitSystem {
        match self {
            MeasurementInput::Metric { .. } => UnitSystem::Metric,
            MeasurementInput::Imperial { .. } => UnitSystem::Imperial,
        }
    }
}

// ============================================================================
// Converted Measurement
// ============================================================================

/// Validated measurement with its BMI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedMeasurement {
    pub unit_system: UnitSystem,
    /// Weight in kg (metric) or lb (imperial)
    pub weight: f64,
    /// Height in m (metric) or total inches (imperial)
    pub height: f64,
    /// Finite, strictly positive BMI
    pub bmi: f64,
}

/// Validate raw input and compute BMI
///
/// Fails with [`BmiError::InvalidMeasurement`] when any field is invalid or
/// the resulting BMI is not a finite positive number.
pub fn convert(input: &MeasurementInput) -> Result<ConvertedMeasurement, BmiError> {
    let (unit_system, weight, height) = match *input {
        MeasurementInput::Metric { weight, height } => {
            validate_weight(weight).map_err(|e| BmiError::invalid_field("weight", e))?;
            validate_height_m(height).map_err(|e| BmiError::invalid_field("height", e))?;
            (UnitSystem::Metric, weight, height)
        }
        MeasurementInput::Imperial {
            weight,
            feet,
            inches,
        } => {
            validate_weight(weight).map_err(|e| BmiError::invalid_field("weight", e))?;
            let feet = validate_feet(feet).map_err(|e| BmiError::invalid_field("feet", e))?;
            let inches =
                validate_inches(inches).map_err(|e| BmiError::invalid_field("inches", e))?;
            let total = validate_total_inches(feet, inches)
                .map_err(|e| BmiError::invalid_field("feet", e))?;
            (UnitSystem::Imperial, weight, total as f64)
        }
    };

    let bmi = unit_system.bmi(weight, height);
    if !bmi.is_finite() || bmi <= 0.0 {
        return Err(BmiError::invalid(
            "Please check your inputs. The calculated BMI is invalid.",
        ));
    }

    Ok(ConvertedMeasurement {
        unit_system,
        weight,
        height,
        bmi,
    })
}

// ============================================================================
// Height Display Helper
// ============================================================================

/// Imperial height in feet and inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInchesHeight {
    pub feet: u32,
    pub inches: u32,
}

impl FeetInchesHeight {
    /// Create from total inches
    pub fn from_total_inches(total_inches: u32) -> Self {
        Self {
            feet: total_inches / 12,
            inches: total_inches % 12,
        }
    }
}

impl fmt::Display for FeetInchesHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}
