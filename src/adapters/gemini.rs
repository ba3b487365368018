//! Google Gemini `generateContent` client.
//!
//! One POST per invocation, no retries. The API key is only exposed when the
//! request header is built and never reaches the logs.

use crate::domain::ports::{ConfigProvider, GenerationRequest, ModelInvoker};
use crate::utils::error::{Result, SwotError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiInvoker {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiInvoker {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.model(), config.api_base_url())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
    temperature: f32,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiErrorDetail {
    message: String,
    status: String,
    details: Vec<serde_json::Value>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Maps a non-2xx answer to the credential / generic split.
fn classify_api_error(status: u16, body: &str) -> SwotError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_default();

    let message = if detail.message.is_empty() {
        format!("Gemini API returned HTTP {}: {}", status, body.trim())
    } else {
        detail.message.clone()
    };

    let key_invalid = detail
        .details
        .iter()
        .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"));

    let credential_problem = matches!(status, 401 | 403)
        || matches!(detail.status.as_str(), "PERMISSION_DENIED" | "UNAUTHENTICATED")
        || key_invalid
        || message.contains("API key not valid")
        || message.contains("User location is not supported");

    if credential_problem {
        SwotError::CredentialError { message }
    } else {
        SwotError::ModelError {
            status: Some(status),
            message,
        }
    }
}

#[async_trait]
impl ModelInvoker for GeminiInvoker {
    async fn invoke(
        &self,
        api_key: &SecretString,
        request: GenerationRequest<'_>,
    ) -> Result<String> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.schema,
                temperature: request.temperature,
            },
        };

        tracing::debug!(
            "Calling Gemini model {} ({} prompt chars)",
            self.model,
            request.prompt.chars().count()
        );
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("Gemini response status: {}", status);

        if !status.is_success() {
            return Err(classify_api_error(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        let output = parsed.text();
        if output.trim().is_empty() {
            if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(SwotError::ModelError {
                    status: Some(status.as_u16()),
                    message: format!("Prompt blocked by the model: {}", reason),
                });
            }
            return Err(SwotError::EmptyResponse);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use httpmock::prelude::*;

    const PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn key() -> SecretString {
        SecretString::from("test-key".to_string())
    }

    fn request<'a>(schema: &'a serde_json::Value) -> GenerationRequest<'a> {
        GenerationRequest {
            prompt: "analise isto",
            schema,
            temperature: 0.3,
        }
    }

    #[tokio::test]
    async fn test_invoke_returns_candidate_text() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(PATH)
                .header("x-goog-api-key", "test-key")
                .json_body_partial(
                    r#"{
                        "contents": [{"role": "user", "parts": [{"text": "analise isto"}]}],
                        "generationConfig": {"responseMimeType": "application/json", "temperature": 0.3}
                    }"#,
                );
            then.status(200).json_body(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]
            }));
        });

        let schema = serde_json::json!({"type": "OBJECT"});
        let invoker = GeminiInvoker::new("gemini-test", server.base_url());
        let text = invoker.invoke(&key(), request(&schema)).await.unwrap();

        api_mock.assert();
        assert_eq!(text, "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_invalid_key_maps_to_credential_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(400).json_body(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT",
                    "details": [{"reason": "API_KEY_INVALID"}]
                }
            }));
        });

        let schema = serde_json::json!({});
        let invoker = GeminiInvoker::new("gemini-test", server.base_url());
        let err = invoker.invoke(&key(), request(&schema)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Credential);
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_unsupported_region_maps_to_credential_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(400).json_body(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "User location is not supported for the API use.",
                    "status": "FAILED_PRECONDITION"
                }
            }));
        });

        let schema = serde_json::json!({});
        let invoker = GeminiInvoker::new("gemini-test", server.base_url());
        let err = invoker.invoke(&key(), request(&schema)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Credential);
    }

    #[tokio::test]
    async fn test_server_error_passes_message_through() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(503).json_body(serde_json::json!({
                "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
            }));
        });

        let schema = serde_json::json!({});
        let invoker = GeminiInvoker::new("gemini-test", server.base_url());
        let err = invoker.invoke(&key(), request(&schema)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.to_string(), "The model is overloaded.");
    }

    #[tokio::test]
    async fn test_missing_text_is_empty_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200)
                .json_body(serde_json::json!({"candidates": [{"finishReason": "SAFETY"}]}));
        });

        let schema = serde_json::json!({});
        let invoker = GeminiInvoker::new("gemini-test", server.base_url());
        let err = invoker.invoke(&key(), request(&schema)).await.unwrap_err();
        assert!(matches!(err, SwotError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_blocked_prompt_reports_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200)
                .json_body(serde_json::json!({"promptFeedback": {"blockReason": "OTHER"}}));
        });

        let schema = serde_json::json!({});
        let invoker = GeminiInvoker::new("gemini-test", server.base_url());
        let err = invoker.invoke(&key(), request(&schema)).await.unwrap_err();
        assert!(err.to_string().contains("OTHER"));
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let invoker = GeminiInvoker::new("gemini-x", "https://example.com/");
        assert_eq!(
            invoker.endpoint(),
            "https://example.com/v1beta/models/gemini-x:generateContent"
        );
    }
}
