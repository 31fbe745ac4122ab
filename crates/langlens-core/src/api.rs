//! Request and response bodies for the detection endpoints.

use serde::{Deserialize, Serialize};

/// Confidence marker attached to every prediction.
///
/// The exported model does not carry calibrated probabilities, so the
/// service reports a single fixed tag rather than a numeric score.
pub const CONFIDENCE_TAG: &str = "high";

/// A snippet of source code submitted for language detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub code: String,
}

/// The detected language for one snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub language: String,
    pub confidence: String,
}

impl Prediction {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            confidence: CONFIDENCE_TAG.to_string(),
        }
    }
}

/// Static liveness payload served at the API root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_deserializes_from_wire_shape() {
        let snippet: CodeSnippet = serde_json::from_str(r#"{"code": "fn main() {}"}"#).unwrap();
        assert_eq!(snippet.code, "fn main() {}");
    }

    #[test]
    fn snippet_rejects_missing_code_field() {
        let result = serde_json::from_str::<CodeSnippet>(r#"{"snippet": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn prediction_serializes_to_wire_shape() {
        let prediction = Prediction::new("Rust");
        let value = serde_json::to_value(&prediction).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"language": "Rust", "confidence": "high"})
        );
    }

    #[test]
    fn prediction_round_trips() {
        let prediction = Prediction::new("Python");
        let json = serde_json::to_string(&prediction).unwrap();
        let back: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prediction);
    }

    #[test]
    fn service_info_serializes_all_fields() {
        let info = ServiceInfo {
            message: "Programming Language Detector API".to_string(),
            status: "running".to_string(),
            version: "1.0.0".to_string(),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "Programming Language Detector API",
                "status": "running",
                "version": "1.0.0",
            })
        );
    }
}
