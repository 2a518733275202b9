//! Advice request/response model and chart normalization
//!
//! The advice collaborator is asked for prose plus four-bucket chart data,
//! but its chart placement is never trusted: [`normalize_chart_data`] rebuilds
//! the chart so that exactly one bucket carries the user's BMI and only the
//! "Normal" bucket carries the normal range.

use crate::errors::BmiError;
use crate::health_metrics::{BmiCategory, ChartBucket, NORMAL_BMI_RANGE};
use crate::units::{ConvertedMeasurement, UnitSystem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Disclaimer shown alongside every piece of advice
pub const DISCLAIMER: &str = "This is not medical advice. Consult with a healthcare professional for personalized health guidance.";

// ============================================================================
// Request
// ============================================================================

/// Structured request sent to the advice collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub bmi: f64,
    pub category: BmiCategory,
    pub unit: UnitSystem,
    /// Weight in kg (metric) or lb (imperial)
    pub weight: f64,
    /// Height in m (metric) or inches (imperial)
    pub height: f64,
}

impl AdviceRequest {
    pub fn new(measurement: &ConvertedMeasurement, category: BmiCategory) -> Self {
        Self {
            bmi: measurement.bmi,
            category,
            unit: measurement.unit_system,
            weight: measurement.weight,
            height: measurement.height,
        }
    }

    /// Chart bucket the user's BMI belongs to
    pub fn bucket(&self) -> ChartBucket {
        self.category.bucket()
    }
}

// ============================================================================
// Response
// ============================================================================

/// One bar of the BMI chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

/// Display-ready advice: prose plus exactly four chart entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub personalized_advice: String,
    pub chart_data: Vec<ChartEntry>,
}

impl AdviceResponse {
    /// Re-apply chart normalization; a no-op on already normalized output
    pub fn normalized(self, bucket: ChartBucket, bmi: f64) -> Self {
        let chart_data = normalize_chart_data(&self.chart_data, bucket, bmi);
        Self {
            personalized_advice: self.personalized_advice,
            chart_data,
        }
    }
}

/// Collaborator output as received
///
/// Every field is optional and `chartData` is kept as raw JSON so that a
/// badly shaped chart never costs the user their advice text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAdvice {
    #[serde(default)]
    pub personalized_advice: Option<String>,
    #[serde(default)]
    pub chart_data: Option<Value>,
}

impl RawAdvice {
    /// Chart entries that have at least a name, in collaborator order
    pub fn chart_entries(&self) -> Vec<ChartEntry> {
        let Some(Value::Array(items)) = &self.chart_data else {
            return Vec::new();
        };
        items.iter().filter_map(chart_entry_from_value).collect()
    }
}

fn chart_entry_from_value(value: &Value) -> Option<ChartEntry> {
    let obj = value.as_object()?;
    let name = obj.get("name")?.as_str()?.to_string();
    let bmi = obj.get("bmi").and_then(Value::as_f64);
    let range = obj.get("range").and_then(|r| match r.as_array()?.as_slice() {
        [lo, hi] => Some([lo.as_f64()?, hi.as_f64()?]),
        _ => None,
    });
    Some(ChartEntry { name, bmi, range })
}

// ============================================================================
// Normalization
// ============================================================================

/// Rebuild chart data in fixed bucket order
///
/// For each bucket the collaborator's entry is used when present (first
/// match wins), otherwise an empty one is synthesized. `bmi` is set only on
/// `user_bucket`; `range` only on "Normal".
pub fn normalize_chart_data(entries: &[ChartEntry], user_bucket: ChartBucket, bmi: f64) -> Vec<ChartEntry> {
    ChartBucket::ALL
        .iter()
        .map(|&bucket| {
            let mut entry = entries
                .iter()
                .find(|e| ChartBucket::from_name(&e.name) == Some(bucket))
                .cloned()
                .unwrap_or_default();
            entry.name = bucket.name().to_string();
            entry.bmi = (bucket == user_bucket).then_some(bmi);
            entry.range = (bucket == ChartBucket::Normal).then_some(NORMAL_BMI_RANGE);
            entry
        })
        .collect()
}

/// Turn raw collaborator output into a display-ready response
///
/// Fails with [`BmiError::AdviceUnavailable`] when the advice text is
/// missing or blank.
pub fn normalize_advice(raw: RawAdvice, request: &AdviceRequest) -> Result<AdviceResponse, BmiError> {
    let entries = raw.chart_entries();
    let advice = raw
        .personalized_advice
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            BmiError::AdviceUnavailable("advice service returned no advice text".to_string())
        })?;

    Ok(AdviceResponse {
        personalized_advice: advice,
        chart_data: normalize_chart_data(&entries, request.bucket(), request.bmi),
    })
}

// ============================================================================
// Assessment
// ============================================================================

/// Result of a full submission: BMI, its category, and normalized advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    pub bmi: f64,
    pub category: BmiCategory,
    pub advice: AdviceResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn request(bmi: f64, category: BmiCategory) -> AdviceRequest {
        AdviceRequest {
            bmi,
            category,
            unit: UnitSystem::Metric,
            weight: 70.0,
            height: 1.75,
        }
    }

    fn entry(name: &str, bmi: Option<f64>, range: Option<[f64; 2]>) -> ChartEntry {
        ChartEntry {
            name: name.to_string(),
            bmi,
            range,
        }
    }

    fn assert_chart_invariants(chart: &[ChartEntry], bucket: ChartBucket, bmi: f64) {
        let names: Vec<&str> = chart.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Underweight", "Normal", "Overweight", "Obese"]);

        let with_bmi: Vec<&ChartEntry> = chart.iter().filter(|e| e.bmi.is_some()).collect();
        assert_eq!(with_bmi.len(), 1);
        assert_eq!(with_bmi[0].name, bucket.name());
        assert_eq!(with_bmi[0].bmi, Some(bmi));

        let with_range: Vec<&ChartEntry> = chart.iter().filter(|e| e.range.is_some()).collect();
        assert_eq!(with_range.len(), 1);
        assert_eq!(with_range[0].name, "Normal");
        assert_eq!(with_range[0].range, Some([18.5, 24.9]));
    }

    #[test]
    fn test_request_serializes_category_label() {
        let req = request(31.2, BmiCategory::ObesityClass1);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["category"], "Obesity Class I");
        assert_eq!(value["unit"], "metric");
        assert_eq!(req.bucket(), ChartBucket::Obese);
    }

    #[test]
    fn test_normalize_repairs_misplaced_bmi() {
        let entries = vec![
            entry("Obese", Some(22.8), Some([30.0, 40.0])),
            entry("Underweight", None, Some([0.0, 18.5])),
        ];
        let chart = normalize_chart_data(&entries, ChartBucket::Normal, 22.8);
        assert_chart_invariants(&chart, ChartBucket::Normal, 22.8);
    }

    #[test]
    fn test_normalize_synthesizes_missing_entries() {
        let chart = normalize_chart_data(&[], ChartBucket::Obese, 41.0);
        assert_chart_invariants(&chart, ChartBucket::Obese, 41.0);
        assert_eq!(chart[0], entry("Underweight", None, None));
    }

    #[test]
    fn test_normalize_drops_unknown_and_duplicate_entries() {
        let entries = vec![
            entry("Severely thin", Some(12.0), None),
            entry("normal weight", None, None),
            entry("Normal", Some(99.0), Some([1.0, 2.0])),
        ];
        let chart = normalize_chart_data(&entries, ChartBucket::Underweight, 17.0);
        assert_eq!(chart.len(), 4);
        assert_chart_invariants(&chart, ChartBucket::Underweight, 17.0);
    }

    #[test]
    fn test_normalize_advice_end_to_end_metric() {
        let bmi = 70.0 / (1.75 * 1.75);
        let req = request(bmi, BmiCategory::NormalWeight);
        let raw: RawAdvice = serde_json::from_value(json!({
            "personalizedAdvice": "  You're in a healthy range. Keep it up!  ",
            "chartData": [
                {"name": "Underweight", "bmi": bmi},
                {"name": "Normal"},
                {"name": "Overweight", "range": [25.0, 29.9]},
                {"name": "Obese"}
            ]
        }))
        .unwrap();

        let advice = normalize_advice(raw, &req).unwrap();
        assert_eq!(advice.personalized_advice, "You're in a healthy range. Keep it up!");
        assert_chart_invariants(&advice.chart_data, ChartBucket::Normal, bmi);
        assert_eq!(advice.chart_data[1], entry("Normal", Some(bmi), Some([18.5, 24.9])));
        assert_eq!(advice.chart_data[0], entry("Underweight", None, None));
    }

    #[test]
    fn test_normalize_advice_tolerates_malformed_chart() {
        let req = request(27.0, BmiCategory::Overweight);
        let raw: RawAdvice = serde_json::from_value(json!({
            "personalizedAdvice": "Small steps add up.",
            "chartData": [{"bmi": "high"}, 42, {"name": "Overweight", "range": [1, 2, 3]}]
        }))
        .unwrap();
        let advice = normalize_advice(raw, &req).unwrap();
        assert_chart_invariants(&advice.chart_data, ChartBucket::Overweight, 27.0);

        let raw: RawAdvice = serde_json::from_value(json!({
            "personalizedAdvice": "Small steps add up.",
            "chartData": "not a list"
        }))
        .unwrap();
        let advice = normalize_advice(raw, &req).unwrap();
        assert_chart_invariants(&advice.chart_data, ChartBucket::Overweight, 27.0);
    }

    #[test]
    fn test_missing_advice_text_is_unavailable() {
        let req = request(22.0, BmiCategory::NormalWeight);
        let err = normalize_advice(RawAdvice::default(), &req).unwrap_err();
        assert!(matches!(err, BmiError::AdviceUnavailable(_)));

        let raw = RawAdvice {
            personalized_advice: Some("   ".to_string()),
            chart_data: None,
        };
        assert!(matches!(
            normalize_advice(raw, &req),
            Err(BmiError::AdviceUnavailable(_))
        ));
    }

    #[test]
    fn test_chart_entry_omits_absent_fields() {
        let json = serde_json::to_string(&entry("Obese", None, None)).unwrap();
        assert_eq!(json, r#"{"name":"Obese"}"#);
    }

    fn arb_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Underweight".to_string()),
            Just("Normal".to_string()),
            Just("normal weight".to_string()),
            Just("Overweight".to_string()),
            Just("Obese".to_string()),
            Just("Obesity Class III".to_string()),
            "[a-z]{0,8}",
        ]
    }

    fn arb_entry() -> impl Strategy<Value = ChartEntry> {
        (
            arb_name(),
            proptest::option::of(0.0f64..80.0),
            proptest::option::of((0.0f64..50.0, 0.0f64..50.0)),
        )
            .prop_map(|(name, bmi, range)| ChartEntry {
                name,
                bmi,
                range: range.map(|(a, b)| [a, b]),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: normalization is idempotent
        #[test]
        fn prop_normalization_idempotent(
            entries in prop::collection::vec(arb_entry(), 0..8),
            bmi in 10.0f64..60.0,
        ) {
            let bucket = crate::health_metrics::classify_bmi(bmi).bucket();
            let once = AdviceResponse {
                personalized_advice: "advice".to_string(),
                chart_data: entries,
            }
            .normalized(bucket, bmi);
            let twice = once.clone().normalized(bucket, bmi);
            prop_assert_eq!(once, twice);
        }

        /// Property: single bmi on the user's bucket, single range on Normal
        #[test]
        fn prop_normalized_chart_invariants(
            entries in prop::collection::vec(arb_entry(), 0..8),
            bmi in 10.0f64..60.0,
        ) {
            let bucket = crate::health_metrics::classify_bmi(bmi).bucket();
            let chart = normalize_chart_data(&entries, bucket, bmi);
            prop_assert_eq!(chart.len(), 4);
            prop_assert_eq!(chart.iter().filter(|e| e.bmi.is_some()).count(), 1);
            prop_assert_eq!(chart.iter().filter(|e| e.range.is_some()).count(), 1);
            let normal = chart.iter().find(|e| e.name == "Normal").unwrap();
            prop_assert_eq!(normal.range, Some([18.5, 24.9]));
        }
    }
}
