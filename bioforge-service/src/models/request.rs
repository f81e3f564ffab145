//! Request and response bodies for the relay endpoints.

use super::{Mode, ModelAlias};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

/// Body of `POST /generate`.
///
/// Built leniently from arbitrary JSON: a missing or non-string `effect`
/// becomes empty (and fails validation), non-string `model`/`mode` fall back
/// to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 1, message = "Missing effect input"))]
    pub effect: String,
    pub model: ModelAlias,
    pub mode: Mode,
}

impl GenerationRequest {
    pub fn new(effect: &str, model: Option<&str>, mode: Option<&str>) -> Self {
        Self {
            effect: effect.trim().to_owned(),
            model: ModelAlias::from_key(model),
            mode: Mode::from_key(mode),
        }
    }

    pub fn from_json(body: &Value) -> Self {
        Self::new(
            str_field(body, "effect").unwrap_or_default(),
            str_field(body, "model"),
            str_field(body, "mode"),
        )
    }
}

/// Body of `POST /search-evidence`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct EvidenceRequest {
    #[validate(length(min = 1, message = "No effect provided"))]
    pub effect: String,
}

impl EvidenceRequest {
    pub fn new(effect: &str) -> Self {
        Self {
            effect: effect.trim().to_owned(),
        }
    }

    pub fn from_json(body: &Value) -> Self {
        Self::new(str_field(body, "effect").unwrap_or_default())
    }
}

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct EvidenceResponse {
    pub evidence: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn effect_is_trimmed() {
        let request = GenerationRequest::from_json(&json!({"effect": "  pain relief \n"}));
        assert_eq!(request.effect, "pain relief");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn whitespace_effect_fails_validation() {
        let request = GenerationRequest::from_json(&json!({"effect": " \t "}));
        assert!(request.validate().is_err());

        let request = EvidenceRequest::from_json(&json!({"effect": ""}));
        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_or_non_string_effect_fails_validation() {
        assert!(GenerationRequest::from_json(&json!({})).validate().is_err());
        assert!(GenerationRequest::from_json(&json!({"effect": 42}))
            .validate()
            .is_err());
        assert!(EvidenceRequest::from_json(&Value::Null).validate().is_err());
    }

    #[test]
    fn non_string_keys_fall_back_to_defaults() {
        let request =
            GenerationRequest::from_json(&json!({"effect": "x", "model": 7, "mode": ["comparison"]}));
        assert_eq!(request.model, ModelAlias::Llama);
        assert_eq!(request.mode, Mode::MoleculeDesign);
    }
}
