use crate::adapters::gemini::{GeminiInvoker, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::core::endpoint::{
    FunctionRequest, FunctionResponse, MediationEndpoint, METHOD_NOT_ALLOWED_BODY,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use secrecy::SecretString;
use std::env;

/// Settings of the deployed function, read from its environment on every
/// invocation.
#[derive(Debug)]
pub struct FunctionConfig {
    pub model: String,
    pub api_base_url: String,
    pub api_key: Option<SecretString>,
}

impl FunctionConfig {
    /// A missing `API_KEY` is not an error here: the endpoint reports it
    /// per request.
    pub fn from_env() -> Self {
        Self {
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_base_url: env::var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            api_key: env::var("API_KEY").ok().map(SecretString::from),
        }
    }

    /// Answers one proxy event. A broken configuration still honours the
    /// method check and comes back as a configuration envelope.
    pub async fn respond(self, request: &FunctionRequest) -> FunctionResponse {
        if let Err(e) = self.validate() {
            if request.http_method != "POST" {
                return FunctionResponse::text(405, METHOD_NOT_ALLOWED_BODY);
            }
            tracing::error!("❌ Function configuration is invalid: {}", e);
            return FunctionResponse::error(&e);
        }

        let invoker = GeminiInvoker::from_config(&self);
        MediationEndpoint::new(invoker, self.api_key)
            .handle_request(request)
            .await
    }
}

impl ConfigProvider for FunctionConfig {
    fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Validate for FunctionConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("model", &self.model)?;
        validate_url("api_base_url", &self.api_base_url)?;

        tracing::info!("✅ Function configuration validation passed");
        Ok(())
    }
}
