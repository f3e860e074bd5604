//! Solar advisor backed by a hosted generative model.
//!
//! # Contract
//!
//! 1. Build a prompt embedding the visitor's four inputs verbatim.
//! 2. Send it with a structured-output schema declaring exactly five fields:
//!    `panelsNeeded`, `estimatedCost`, `annualSavings`, `paybackPeriod`
//!    (numbers) and `recommendation` (string), in that order.
//! 3. Trim the returned text, strip Markdown code fences, parse the JSON.
//! 4. Range-check the numbers into an [`AdvisorResult`].
//!
//! Every failure along the way (transport, API error, empty answer, bad JSON,
//! out-of-range value) is logged and surfaces as `None`. Callers cannot tell
//! the causes apart and should only show "no result".

mod client;
mod error;
mod gate;
pub mod types;

pub use client::GeminiClient;
pub use error::AdvisorError;
pub use gate::{AdvisorGate, InFlightGuard};

use solar_direct_core::{AdvisorQuery, AdvisorResult};
use tracing::instrument;

use crate::config::AdvisorConfig;
use types::{AdvisorPayload, Schema, SchemaType};

/// Canonical field order of the advisor response.
pub const RESPONSE_FIELDS: [&str; 5] = [
    "panelsNeeded",
    "estimatedCost",
    "annualSavings",
    "paybackPeriod",
    "recommendation",
];

const CODE_FENCE: &str = "```";
const JSON_CODE_FENCE: &str = "```json";

/// The advisor service.
#[derive(Clone)]
pub struct AdvisorService {
    client: GeminiClient,
}

impl AdvisorService {
    /// Create an advisor from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the model client cannot be constructed.
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    /// Model ID used for recommendations.
    #[must_use]
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Ask the model for a recommendation.
    ///
    /// Returns `None` on any failure; the cause is logged.
    #[instrument(skip(self, query), fields(location = %query.location, commercial = query.is_commercial))]
    pub async fn recommend(&self, query: &AdvisorQuery) -> Option<AdvisorResult> {
        match self.try_recommend(query).await {
            Ok(result) => {
                tracing::info!(panels = result.panels_needed, "Advisor recommendation ready");
                Some(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "Advisor request failed");
                None
            }
        }
    }

    async fn try_recommend(&self, query: &AdvisorQuery) -> Result<AdvisorResult, AdvisorError> {
        let text = self
            .client
            .generate_structured(build_prompt(query), response_schema())
            .await?;

        parse_result(&text)
    }
}

/// Build the natural-language prompt for a query.
#[must_use]
pub fn build_prompt(query: &AdvisorQuery) -> String {
    format!(
        "Act as a Solar Energy Expert. Based on these details:\n\
         - Average Monthly Electricity Bill: ${bill}\n\
         - Location: {location}\n\
         - Available Roof Area: {area} sq meters\n\
         - Property Type: {property}\n\
         \n\
         Provide a detailed recommendation in JSON format with exactly these fields:\n\
         - panelsNeeded (number)\n\
         - estimatedCost (approximate USD)\n\
         - annualSavings (approximate USD)\n\
         - paybackPeriod (years)\n\
         - recommendation (2-3 sentences of professional advice)",
        bill = query.monthly_bill,
        location = query.location,
        area = query.roof_area,
        property = query.property_type(),
    )
}

/// Structured-output schema for the advisor response.
#[must_use]
pub fn response_schema() -> Schema {
    Schema::object(vec![
        (
            "panelsNeeded",
            Schema::scalar(SchemaType::Number, "The number of solar panels required."),
        ),
        (
            "estimatedCost",
            Schema::scalar(SchemaType::Number, "The approximate total cost in USD."),
        ),
        (
            "annualSavings",
            Schema::scalar(
                SchemaType::Number,
                "Estimated annual electricity bill savings.",
            ),
        ),
        (
            "paybackPeriod",
            Schema::scalar(
                SchemaType::Number,
                "Number of years to break even on investment.",
            ),
        ),
        (
            "recommendation",
            Schema::scalar(
                SchemaType::String,
                "Expert advice regarding the system configuration.",
            ),
        ),
    ])
}

/// Remove Markdown code fences from model output.
///
/// ```
/// use solar_direct_storefront::advisor::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
/// ```
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.contains(CODE_FENCE) {
        trimmed
            .replace(JSON_CODE_FENCE, "")
            .replace(CODE_FENCE, "")
            .trim()
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse raw model text into a range-checked result.
///
/// # Errors
///
/// Returns [`AdvisorError::Parse`] if the cleaned text is not the expected
/// JSON object, or [`AdvisorError::OutOfRange`] if a number is negative or
/// not finite.
pub fn parse_result(text: &str) -> Result<AdvisorResult, AdvisorError> {
    let cleaned = strip_code_fences(text);
    let payload: AdvisorPayload = serde_json::from_str(&cleaned)
        .map_err(|e| AdvisorError::Parse(format!("Failed to parse advisor payload: {e}")))?;

    Ok(AdvisorResult::from_estimates(
        payload.panels_needed,
        payload.estimated_cost,
        payload.annual_savings,
        payload.payback_period,
        payload.recommendation,
    )?)
}
