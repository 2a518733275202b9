//! Prompt text for the advice collaborator
//!
//! The collaborator must answer with JSON matching [`RESPONSE_FORMAT`]. Chart
//! placement rules are stated here but enforced by normalization, not trusted.

use bmi_insights_shared::{
    weight_change_to_normal, AdviceRequest, BmiCategory, ChartBucket, FeetInchesHeight, UnitSystem,
    DISCLAIMER,
};

/// System instruction sent with every advice request
pub const SYSTEM_INSTRUCTION: &str = r#"You are a friendly health coach inside a BMI calculator. You write short, encouraging, non-alarming advice for a general audience. You never diagnose, never shame, and never recommend medication. Respond with JSON only."#;

/// Shape the collaborator must return
pub const RESPONSE_FORMAT: &str = r#"{
  "personalizedAdvice": "<2-4 short paragraphs of plain text>",
  "chartData": [
    {"name": "Underweight"},
    {"name": "Normal", "range": [18.5, 24.9]},
    {"name": "Overweight"},
    {"name": "Obese"}
  ]
}"#;

/// Build the user prompt for one advice request
pub fn build_advice_prompt(request: &AdviceRequest) -> String {
    let weight_unit = request.unit.weight_unit();
    let height_desc = describe_height(request.unit, request.height);
    let bucket = request.bucket();

    let mut prompt = format!(
        "A user calculated their Body Mass Index.\n\n\
         <measurement>\n\
         BMI: {bmi:.2}\n\
         Category: {category}\n\
         Unit system: {unit}\n\
         Weight: {weight} {weight_unit}\n\
         Height: {height_desc}\n\
         </measurement>\n\n\
         <categories>\n{categories}</categories>\n\n",
        bmi = request.bmi,
        category = request.category,
        unit = request.unit,
        weight = request.weight,
        categories = category_table(),
    );

    if let Some(change) =
        weight_change_to_normal(request.unit, request.weight, request.height, request.category)
    {
        prompt.push_str(&format!(
            "<weight_change>\n\
             To reach BMI 18.5 the weight change is {lower:+.1} {unit}.\n\
             To reach BMI 24.9 the weight change is {upper:+.1} {unit}.\n\
             </weight_change>\n\n",
            lower = change.to_lower_bound,
            upper = change.to_upper_bound,
            unit = change.unit,
        ));
    }

    prompt.push_str(&format!(
        "<rules>\n\
         1. Write personalizedAdvice for someone in the \"{category}\" category. Be encouraging and practical.\n\
         2. If a weight_change block is present, mention the smaller of the two changes as a gentle, long-term target in {weight_unit}.\n\
         3. End the advice with: \"{disclaimer}\"\n\
         4. chartData must contain exactly these four entries in this order: {buckets}.\n\
         5. Put \"bmi\": {bmi:.2} on the \"{bucket}\" entry only. Put \"range\": [18.5, 24.9] on the \"Normal\" entry only.\n\
         </rules>\n\n\
         <response_format>\n{format}\n</response_format>",
        category = request.category,
        disclaimer = DISCLAIMER,
        buckets = bucket_list(),
        bmi = request.bmi,
        bucket = bucket,
        format = RESPONSE_FORMAT,
    ));

    prompt
}

fn describe_height(unit: UnitSystem, height: f64) -> String {
    match unit {
        UnitSystem::Metric => format!("{:.2} m", height),
        UnitSystem::Imperial => {
            let total = height.round() as u32;
            format!("{} in ({})", total, FeetInchesHeight::from_total_inches(total))
        }
    }
}

fn category_table() -> String {
    BmiCategory::ALL
        .iter()
        .map(|c| match c.range() {
            (None, Some(max)) => format!("- {}: below {}\n", c, max),
            (Some(min), Some(max)) => format!("- {}: {} - {}\n", c, min, max),
            (Some(min), None) => format!("- {}: {} and above\n", c, min),
            (None, None) => format!("- {}\n", c),
        })
        .collect()
}

fn bucket_list() -> String {
    ChartBucket::ALL
        .iter()
        .map(|b| format!("\"{}\"", b))
        .collect::<Vec<_>>()
        .join(", ")
}
