//! Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GenerateRequest {
    /// Non-streaming request for a single completion.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Body returned by `POST /api/generate` when streaming is off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Server-reported error, if one was set and non-empty.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Body returned by `GET /api/tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One installed model in a tags listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_not_streaming() {
        let body = serde_json::to_value(GenerateRequest::new("llama2", "hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"model": "llama2", "prompt": "hello", "stream": false})
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: GenerateResponse = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(response.response, "");
        assert!(!response.done);
        assert_eq!(response.error_message(), Some("boom"));
    }

    #[test]
    fn test_empty_error_is_not_an_error() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"model":"llama2","response":"hi","done":true,"error":""}"#)
                .unwrap();
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn test_tags_ignore_extra_fields() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models":[{"name":"llama2:latest","size":3825819519,"digest":"fe938a"}]}"#,
        )
        .unwrap();
        assert_eq!(tags.models.len(), 1);
        assert_eq!(tags.models[0].name, "llama2:latest");
    }
}
