//! Advice orchestration - one collaborator call, then normalization

use crate::services::provider::AdviceProvider;
use bmi_insights_shared::{normalize_advice, AdviceRequest, AdviceResponse, BmiError};
use metrics::{counter, histogram};
use std::time::Instant;
use tracing::{info, warn};

/// Advice service
pub struct AdviceService;

impl AdviceService {
    /// Request advice for a classified measurement
    ///
    /// Makes exactly one provider call with no retry. Transport, API and
    /// parse failures, as well as a reply without advice text, surface as
    /// [`BmiError::AdviceUnavailable`]. The returned chart always satisfies
    /// the four-bucket placement rules regardless of what the provider sent.
    pub async fn get_advice(
        provider: &dyn AdviceProvider,
        request: &AdviceRequest,
    ) -> Result<AdviceResponse, BmiError> {
        info!(
            provider = provider.name(),
            bmi = request.bmi,
            category = %request.category,
            unit = %request.unit,
            "Requesting advice"
        );

        let started = Instant::now();
        let result = provider.generate_advice(request).await;
        histogram!("advice_request_duration_seconds").record(started.elapsed().as_secs_f64());

        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                warn!(provider = provider.name(), error = %err, "Advice provider call failed");
                counter!("advice_requests_total", "outcome" => "provider_error").increment(1);
                return Err(err.into());
            }
        };

        match normalize_advice(raw, request) {
            Ok(advice) => {
                counter!("advice_requests_total", "outcome" => "success").increment(1);
                Ok(advice)
            }
            Err(err) => {
                warn!(provider = provider.name(), error = %err, "Advice provider returned no advice text");
                counter!("advice_requests_total", "outcome" => "empty").increment(1);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::StubProvider;
    use bmi_insights_shared::{BmiCategory, UnitSystem};
    use serde_json::json;

    fn obese_request() -> AdviceRequest {
        AdviceRequest {
            bmi: 36.2,
            category: BmiCategory::ObesityClass2,
            unit: UnitSystem::Imperial,
            weight: 245.0,
            height: 69.0,
        }
    }

    #[tokio::test]
    async fn test_advice_is_normalized() {
        let provider = StubProvider::ok(json!({
            "personalizedAdvice": "Every healthy choice counts.",
            "chartData": [
                {"name": "Normal", "bmi": 36.2},
                {"name": "Obesity Class II"}
            ]
        }));

        let advice = AdviceService::get_advice(&provider, &obese_request())
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(advice.chart_data.len(), 4);
        assert_eq!(advice.chart_data[1].bmi, None);
        assert_eq!(advice.chart_data[1].range, Some([18.5, 24.9]));
        assert_eq!(advice.chart_data[3].name, "Obese");
        assert_eq!(advice.chart_data[3].bmi, Some(36.2));
    }

    #[tokio::test]
    async fn test_provider_failure_is_advice_unavailable_without_retry() {
        let provider = StubProvider::failing("deadline exceeded");

        let err = AdviceService::get_advice(&provider, &obese_request())
            .await
            .unwrap_err();

        assert_eq!(provider.call_count(), 1);
        match err {
            BmiError::AdviceUnavailable(message) => assert!(message.contains("deadline exceeded")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_advice_text_is_advice_unavailable() {
        let provider = StubProvider::ok(json!({"chartData": []}));

        let err = AdviceService::get_advice(&provider, &obese_request())
            .await
            .unwrap_err();

        assert!(matches!(err, BmiError::AdviceUnavailable(_)));
    }
}
