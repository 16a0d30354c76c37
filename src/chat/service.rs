use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("API key not configured")]
    MissingCredentials,

    #[error("API key rejected: {0}")]
    InvalidCredentials(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl ServiceError {
    pub fn is_credentials(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingCredentials | ServiceError::InvalidCredentials(_)
        )
    }
}

/// A single text-completion request. When `response_schema` is set the
/// service is asked for JSON matching it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub response_schema: Option<Value>,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

/// Opaque text-completion backend.
pub trait CompletionService {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// Gemini `generateContent` over REST.
#[derive(Clone)]
pub struct GeminiService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiService {
    pub fn new(api_key: Option<String>, model: String, endpoint: String) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(request: &CompletionRequest) -> Value {
        let mut generation_config = json!({
            "temperature": 0.7,
            "maxOutputTokens": 4096,
        });

        if let Some(schema) = &request.response_schema {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseJsonSchema"] = schema.clone();
        }

        json!({
            "contents": [{"parts": [{"text": request.prompt}]}],
            "generationConfig": generation_config,
        })
    }
}

impl CompletionService for GeminiService {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ServiceError> {
        let api_key = self.api_key.as_deref().ok_or(ServiceError::MissingCredentials)?;

        info!("calling Gemini API (model: {})", self.model);
        debug!("prompt length: {} characters", request.prompt.len());

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), body));
        }

        let body: Value = response.json().await?;
        extract_text(&body)
    }
}

/// Splits non-2xx responses into credential problems and everything else.
fn classify_failure(status: u16, body: String) -> ServiceError {
    let lowered = body.to_lowercase();
    let mentions_key = body.contains("API_KEY") || lowered.contains("api key");

    if status == 401 || status == 403 || (status == 400 && mentions_key) {
        ServiceError::InvalidCredentials(body)
    } else {
        ServiceError::Api {
            status,
            message: body,
        }
    }
}

fn extract_text(body: &Value) -> Result<String, ServiceError> {
    body.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Malformed("missing candidates[0].content.parts[0].text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_request_declares_schema() {
        let schema = json!({"type": "object"});
        let body = GeminiService::request_body(&CompletionRequest::structured("hi", schema.clone()));
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseJsonSchema"], schema);
    }

    #[test]
    fn test_text_request_has_no_schema() {
        let body = GeminiService::request_body(&CompletionRequest::text("hi"));
        assert!(body["generationConfig"].get("responseJsonSchema").is_none());
    }

    #[test]
    fn test_extract_text_reads_first_candidate() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "hello"}]}}]});
        assert_eq!(extract_text(&body).unwrap(), "hello");
        assert!(matches!(extract_text(&json!({})), Err(ServiceError::Malformed(_))));
    }

    #[test]
    fn test_classify_failure_detects_credential_errors() {
        assert!(classify_failure(400, "API key not valid. Please pass a valid API key.".into()).is_credentials());
        assert!(classify_failure(400, "{\"reason\": \"API_KEY_INVALID\"}".into()).is_credentials());
        assert!(classify_failure(403, "forbidden".into()).is_credentials());
        assert!(!classify_failure(500, "backend error".into()).is_credentials());
        assert!(!classify_failure(400, "bad schema".into()).is_credentials());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let service = GeminiService::new(
            Some("   ".to_string()),
            "gemini-2.5-flash".to_string(),
            "http://127.0.0.1:9".to_string(),
        )
        .unwrap();

        let err = service.complete(&CompletionRequest::text("hi")).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingCredentials));
    }
}
