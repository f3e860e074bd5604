//! Types for the Gemini `generateContent` API.
//!
//! Only the subset of the request and response shape used by the advisor is
//! modeled. Unknown response fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns (the advisor sends a single user turn).
    pub contents: Vec<Content>,
    /// Output constraints.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single-turn text prompt constrained to JSON matching `schema`.
    #[must_use]
    pub fn structured(prompt: String, schema: Schema) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        }
    }
}

/// A conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Only text parts are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Generation settings pinning the output format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Always `application/json` for structured output.
    pub response_mime_type: String,
    /// Declared output shape.
    pub response_schema: Schema,
}

/// Structured-output schema declaration (OpenAPI subset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Value type.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Field description shown to the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Properties that must be present.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Canonical property order of the generated object.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
}

impl Schema {
    /// A scalar schema with a description.
    #[must_use]
    pub fn scalar(schema_type: SchemaType, description: &str) -> Self {
        Self {
            schema_type,
            description: Some(description.to_string()),
            properties: BTreeMap::new(),
            required: Vec::new(),
            property_ordering: Vec::new(),
        }
    }

    /// An object schema whose properties are all required, ordered as given.
    #[must_use]
    pub fn object(fields: Vec<(&str, Self)>) -> Self {
        let property_ordering: Vec<String> = fields
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();
        Self {
            schema_type: SchemaType::Object,
            description: None,
            properties: fields
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: property_ordering.clone(),
            property_ordering,
        }
    }
}

/// Schema value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Number,
    String,
}

/// Response from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates (the advisor reads the first).
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token usage information.
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}

/// A generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content (absent when blocked).
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped (e.g. "STOP", "SAFETY").
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Tokens across all candidates.
    #[serde(default)]
    pub candidates_token_count: u32,
}

/// The JSON object the model is instructed to return.
///
/// Numeric fields are read as `f64`: the model may answer with fractional
/// or negative numbers, which are range-checked afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorPayload {
    pub panels_needed: f64,
    pub estimated_cost: f64,
    pub annual_savings: f64,
    pub payback_period: f64,
    pub recommendation: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let schema = Schema::object(vec![(
            "recommendation",
            Schema::scalar(SchemaType::String, "Advice"),
        )]);
        let request = GenerateContentRequest::structured("hello".to_string(), schema);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            json["generationConfig"]["responseSchema"]["properties"]["recommendation"]["type"],
            "STRING"
        );
        assert_eq!(
            json["generationConfig"]["responseSchema"]["propertyOrdering"][0],
            "recommendation"
        );
    }

    #[test]
    fn test_scalar_schema_omits_empty_fields() {
        let json = serde_json::to_value(Schema::scalar(SchemaType::Number, "Count")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "NUMBER", "description": "Count"}));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 10);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.text().is_none());

        let blocked: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert!(blocked.text().is_none());
    }
}
