//! BMI classification module
//!
//! Maps a BMI value to one of six fixed medical categories and each category
//! to one of the four coarse buckets used for charting. Also derives the
//! healthy weight range and the weight change needed to reach it.
//!
//! All functions are pure.

use crate::units::UnitSystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower edge of the normal BMI range (inclusive)
pub const NORMAL_BMI_MIN: f64 = 18.5;
/// Upper edge of the normal BMI range as displayed
pub const NORMAL_BMI_MAX: f64 = 24.9;
/// Range attached to the "Normal" chart bucket
pub const NORMAL_BMI_RANGE: [f64; 2] = [NORMAL_BMI_MIN, NORMAL_BMI_MAX];

// ============================================================================
// Categories
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity Class I")]
    ObesityClass1,
    #[serde(rename = "Obesity Class II")]
    ObesityClass2,
    #[serde(rename = "Obesity Class III")]
    ObesityClass3,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::ObesityClass1,
        BmiCategory::ObesityClass2,
        BmiCategory::ObesityClass3,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityClass1 => "Obesity Class I",
            BmiCategory::ObesityClass2 => "Obesity Class II",
            BmiCategory::ObesityClass3 => "Obesity Class III",
        }
    }

    /// BMI range as printed in the category table (`None` = unbounded)
    pub fn range(&self) -> (Option<f64>, Option<f64>) {
        match self {
            BmiCategory::Underweight => (None, Some(18.5)),
            BmiCategory::NormalWeight => (Some(18.5), Some(24.9)),
            BmiCategory::Overweight => (Some(25.0), Some(29.9)),
            BmiCategory::ObesityClass1 => (Some(30.0), Some(34.9)),
            BmiCategory::ObesityClass2 => (Some(35.0), Some(39.9)),
            BmiCategory::ObesityClass3 => (Some(40.0), None),
        }
    }

    /// Coarse chart bucket for this category
    pub fn bucket(&self) -> ChartBucket {
        match self {
            BmiCategory::Underweight => ChartBucket::Underweight,
            BmiCategory::NormalWeight => ChartBucket::Normal,
            BmiCategory::Overweight => ChartBucket::Overweight,
            BmiCategory::ObesityClass1 | BmiCategory::ObesityClass2 | BmiCategory::ObesityClass3 => {
                ChartBucket::Obese
            }
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, BmiCategory::NormalWeight)
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify BMI into category
///
/// Lower bounds are inclusive; values between a printed upper bound and the
/// next lower bound (e.g. 24.95) stay in the lower category.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObesityClass1
    } else if bmi < 40.0 {
        BmiCategory::ObesityClass2
    } else {
        BmiCategory::ObesityClass3
    }
}

// ============================================================================
// Chart Buckets
// ============================================================================

/// Coarse display bucket on the BMI chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartBucket {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl ChartBucket {
    /// Chart order
    pub const ALL: [ChartBucket; 4] = [
        ChartBucket::Underweight,
        ChartBucket::Normal,
        ChartBucket::Overweight,
        ChartBucket::Obese,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartBucket::Underweight => "Underweight",
            ChartBucket::Normal => "Normal",
            ChartBucket::Overweight => "Overweight",
            ChartBucket::Obese => "Obese",
        }
    }

    /// Resolve a bucket from a chart entry name
    ///
    /// Matching is case-insensitive and accepts the fine-grained category
    /// labels as aliases ("Normal weight", "Obesity Class II", "Obesity").
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(bucket) = Self::ALL
            .iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
        {
            return Some(*bucket);
        }
        if let Some(category) = BmiCategory::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(name))
        {
            return Some(category.bucket());
        }
        if name.eq_ignore_ascii_case("obesity") {
            return Some(ChartBucket::Obese);
        }
        None
    }
}

impl fmt::Display for ChartBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Healthy Weight
// ============================================================================

/// Weight range giving a normal BMI at a given height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthyWeightRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

/// Calculate the healthy weight range for a height in the system's native unit
///
/// Based on BMI 18.5-24.9 (normal range)
pub fn healthy_weight_range(unit_system: UnitSystem, height: f64) -> HealthyWeightRange {
    HealthyWeightRange {
        min: unit_system.weight_for_bmi(NORMAL_BMI_MIN, height),
        max: unit_system.weight_for_bmi(NORMAL_BMI_MAX, height),
        unit: unit_system.weight_unit().to_string(),
    }
}

/// Signed weight change needed to reach each edge of the normal range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightChange {
    /// Change to reach BMI 18.5 (positive = gain)
    pub to_lower_bound: f64,
    /// Change to reach BMI 24.9 (negative = lose)
    pub to_upper_bound: f64,
    pub unit: String,
}

/// Weight change to the normal range, or `None` when already normal
pub fn weight_change_to_normal(
    unit_system: UnitSystem,
    weight: f64,
    height: f64,
    category: BmiCategory,
) -> Option<WeightChange> {
    if category.is_normal() {
        return None;
    }
    let range = healthy_weight_range(unit_system, height);
    Some(WeightChange {
        to_lower_bound: range.min - weight,
        to_upper_bound: range.max - weight,
        unit: range.unit,
    })
}
