use crate::core::orchestrator::CONFIGURATION_MESSAGE;
use crate::domain::model::{ErrorEnvelope, SwotAnalysisResult, UserInput};
use crate::domain::ports::AnalysisService;
use crate::utils::error::{ErrorKind, Result, SwotError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

const UNKNOWN_API_ERROR: &str = "Ocorreu um erro desconhecido na API.";

/// Calls a deployed `generate-swot` endpoint.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn generate(&self, input: &UserInput) -> Result<SwotAnalysisResult> {
        tracing::debug!("Submitting analysis request to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(input).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Endpoint response status: {}", status);

        interpret_response(status.as_u16(), &body)
    }
}

/// Turns an endpoint answer into a result or a tagged failure.
pub fn interpret_response(status: u16, body: &str) -> Result<SwotAnalysisResult> {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !status.is_success() {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).unwrap_or(ErrorEnvelope {
            error: UNKNOWN_API_ERROR.to_string(),
            kind: None,
        });

        if status.is_server_error() && envelope.error.contains("API key is not configured") {
            return Err(SwotError::RemoteError {
                kind: envelope.kind.or(Some(ErrorKind::Configuration)),
                message: CONFIGURATION_MESSAGE.to_string(),
            });
        }

        let message = if envelope.error.is_empty() {
            format!(
                "Erro: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
        } else {
            envelope.error
        };
        return Err(SwotError::RemoteError {
            kind: envelope.kind,
            message,
        });
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse the server JSON response: {}", e);
        SwotError::MalformedResponse {
            body: body.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_envelope_is_rewritten() {
        let body = r#"{"error": "Configuration error: API key is not configured on the server."}"#;
        match interpret_response(500, body) {
            Err(SwotError::RemoteError { kind, message }) => {
                assert_eq!(kind, Some(ErrorKind::Configuration));
                assert!(message.contains("encontrada no servidor"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_error_body_is_unknown_error() {
        match interpret_response(405, "Method Not Allowed") {
            Err(SwotError::RemoteError { kind, message }) => {
                assert_eq!(kind, None);
                assert_eq!(message, UNKNOWN_API_ERROR);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_message_falls_back_to_status() {
        match interpret_response(502, r#"{"error": ""}"#) {
            Err(err) => assert_eq!(err.to_string(), "Erro: 502 Bad Gateway"),
            Ok(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_malformed_success_body() {
        let err = interpret_response(200, "<html>").unwrap_err();
        assert!(matches!(err, SwotError::MalformedResponse { .. }));
        assert_eq!(err.to_string(), "Recebido um formato inválido do servidor.");
    }

    #[test]
    fn test_envelope_without_error_falls_back_to_status() {
        match interpret_response(500, "{}") {
            Err(err) => assert_eq!(err.to_string(), "Erro: 500 Internal Server Error"),
            Ok(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_unknown_kind_keeps_the_message() {
        let body = r#"{"error": "Quota exceeded for model", "kind": "quota"}"#;
        match interpret_response(500, body) {
            Err(SwotError::RemoteError { kind, message }) => {
                assert_eq!(kind, None);
                assert_eq!(message, "Quota exceeded for model");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
