//! Business logic services
//!
//! Services encapsulate the BMI pipeline and coordinate with the external
//! advice provider.

pub mod advice;
pub mod assessment;
pub mod gemini;
pub mod prompts;
pub mod provider;

#[cfg(test)]
pub(crate) mod test_support;

pub use advice::AdviceService;
pub use assessment::{AssessmentService, Calculation};
pub use gemini::GeminiClient;
pub use provider::{AdviceProvider, ProviderError};
