//! Stateless `generate-swot` function.
//!
//! Checks run in a fixed order: method, body, credential, model call. Every
//! failure becomes a 500 with a tagged `{error, kind}` envelope.

use crate::core::prompt::build_prompt;
use crate::domain::model::{ErrorEnvelope, UserInput};
use crate::domain::ports::{GenerationRequest, ModelInvoker};
use crate::domain::schema::response_schema;
use crate::utils::error::{Result, SwotError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Low temperature keeps the structure consistent between runs.
pub const TEMPERATURE: f32 = 0.3;

pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// Proxy-style request as delivered by function hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    pub fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn text(status_code: u16, body: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "text/plain; charset=utf-8".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn error(err: &SwotError) -> Self {
        let envelope = ErrorEnvelope {
            error: err.to_string(),
            kind: Some(err.kind()),
        };
        let body = serde_json::to_string(&envelope)
            .unwrap_or_else(|_| r#"{"error":"Ocorreu um erro interno no servidor."}"#.to_string());
        Self::json(500, body)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").map(String::as_str)
    }
}

pub struct MediationEndpoint<I: ModelInvoker> {
    invoker: I,
    api_key: Option<SecretString>,
}

impl<I: ModelInvoker> MediationEndpoint<I> {
    /// A blank key counts as missing.
    pub fn new(invoker: I, api_key: Option<SecretString>) -> Self {
        let api_key = api_key.filter(|key| !key.expose_secret().trim().is_empty());
        Self { invoker, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn handle_request(&self, request: &FunctionRequest) -> FunctionResponse {
        self.handle(&request.http_method, request.body.as_deref()).await
    }

    pub async fn handle(&self, method: &str, body: Option<&str>) -> FunctionResponse {
        if method != "POST" {
            tracing::debug!("Rejecting {} request", method);
            return FunctionResponse::text(405, METHOD_NOT_ALLOWED_BODY);
        }

        match self.generate(body).await {
            Ok(json_text) => {
                tracing::info!("✅ Analysis generated ({} bytes)", json_text.len());
                FunctionResponse::json(200, json_text)
            }
            Err(SwotError::MissingApiKey) => {
                tracing::error!("❌ API_KEY environment variable not set on the server.");
                FunctionResponse::error(&SwotError::MissingApiKey)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Error in generate-swot function: {} (kind: {:?})",
                    e,
                    e.kind()
                );
                FunctionResponse::error(&e)
            }
        }
    }

    async fn generate(&self, body: Option<&str>) -> Result<String> {
        let input = parse_body(body)?;
        let api_key = self.api_key.as_ref().ok_or(SwotError::MissingApiKey)?;

        let prompt = build_prompt(&input);
        let text = self
            .invoker
            .invoke(
                api_key,
                GenerationRequest {
                    prompt: &prompt,
                    schema: response_schema(),
                    temperature: TEMPERATURE,
                },
            )
            .await?;

        if text.is_empty() {
            return Err(SwotError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Absent or blank body is an empty object; anything else must be JSON.
fn parse_body(body: Option<&str>) -> Result<UserInput> {
    match body.map(str::trim) {
        None | Some("") => Ok(UserInput::default()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}
