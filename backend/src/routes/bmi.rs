//! BMI calculation and assessment API routes

use crate::error::{ApiError, ApiResult};
use crate::services::AssessmentService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use bmi_insights_shared::{BmiAssessmentResponse, BmiCalculationResponse, MeasurementInput};

/// Create BMI routes
pub fn bmi_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate_bmi))
        .route("/assess", post(assess_bmi))
}

/// Unwrap the JSON body, reporting malformed payloads as invalid measurements
fn measurement(
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> ApiResult<MeasurementInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::InvalidMeasurement {
            field: None,
            message: rejection.body_text(),
        })
}

/// POST /api/v1/bmi/calculate - Compute and classify BMI
///
/// Never contacts the advice provider.
async fn calculate_bmi(
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> ApiResult<Json<BmiCalculationResponse>> {
    let input = measurement(payload)?;
    let calculation = AssessmentService::calculate(&input)?;

    Ok(Json(BmiCalculationResponse::new(
        &calculation.measurement,
        calculation.category,
    )))
}

/// POST /api/v1/bmi/assess - Compute BMI and fetch personalized advice
///
/// Invalid input fails with 400 before the provider is called; a provider
/// failure yields 502 with no partial result.
async fn assess_bmi(
    State(state): State<AppState>,
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> ApiResult<Json<BmiAssessmentResponse>> {
    let input = measurement(payload)?;
    let (calculation, assessment) =
        AssessmentService::assess_with_calculation(state.advice(), &input).await?;

    Ok(Json(BmiAssessmentResponse::new(
        &calculation.measurement,
        assessment,
    )))
}
