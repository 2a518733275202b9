//! BMI assessment pipeline: convert → classify → advise → normalize

use crate::services::advice::AdviceService;
use crate::services::provider::AdviceProvider;
use bmi_insights_shared::{
    classify_bmi, convert, AdviceRequest, BmiAssessment, BmiCategory, BmiError,
    ConvertedMeasurement, MeasurementInput,
};
use metrics::counter;
use tracing::{debug, info};

/// Validated, classified measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub measurement: ConvertedMeasurement,
    pub category: BmiCategory,
}

/// Assessment service
pub struct AssessmentService;

impl AssessmentService {
    /// Convert and classify without contacting the advice provider
    pub fn calculate(input: &MeasurementInput) -> Result<Calculation, BmiError> {
        let measurement = convert(input)?;
        let category = classify_bmi(measurement.bmi);
        debug!(
            bmi = measurement.bmi,
            category = %category,
            unit = %measurement.unit_system,
            "BMI calculated"
        );
        Ok(Calculation {
            measurement,
            category,
        })
    }

    /// Run the full pipeline for one submission
    ///
    /// An invalid measurement fails before any provider call.
    pub async fn assess(
        provider: &dyn AdviceProvider,
        input: &MeasurementInput,
    ) -> Result<BmiAssessment, BmiError> {
        Self::assess_with_calculation(provider, input)
            .await
            .map(|(_, assessment)| assessment)
    }

    /// Run the full pipeline, also returning the intermediate calculation
    pub async fn assess_with_calculation(
        provider: &dyn AdviceProvider,
        input: &MeasurementInput,
    ) -> Result<(Calculation, BmiAssessment), BmiError> {
        let result = Self::run(provider, input).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(BmiError::InvalidMeasurement { .. }) => "invalid_measurement",
            Err(BmiError::AdviceUnavailable(_)) => "advice_unavailable",
        };
        counter!("bmi_assessments_total", "outcome" => outcome).increment(1);
        result
    }

    async fn run(
        provider: &dyn AdviceProvider,
        input: &MeasurementInput,
    ) -> Result<(Calculation, BmiAssessment), BmiError> {
        let calculation = Self::calculate(input)?;
        let request = AdviceRequest::new(&calculation.measurement, calculation.category);
        let advice = AdviceService::get_advice(provider, &request).await?;

        info!(
            bmi = request.bmi,
            category = %request.category,
            "BMI assessment complete"
        );

        Ok((
            calculation,
            BmiAssessment {
                bmi: request.bmi,
                category: request.category,
                advice,
            },
        ))
    }
}
