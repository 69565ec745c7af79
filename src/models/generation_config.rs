use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Options controlling how the model generates a response.
///
/// Every field is optional; unset fields are left to the server defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(doc, field_defaults(default, setter(strip_option)))]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Number of candidates to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
    /// Maximum number of tokens in a candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Sequences that stop generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    /// MIME type of the generated text, e.g. `application/json`
    #[builder(setter(into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_serializes_to_empty_object() {
        let value = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn fields_use_camel_case() {
        let config = GenerationConfig::builder()
            .max_output_tokens(256)
            .response_mime_type("application/json")
            .build();
        let value = serde_json::to_value(config).unwrap();
        assert_eq!(
            value,
            json!({ "maxOutputTokens": 256, "responseMimeType": "application/json" })
        );
    }
}
