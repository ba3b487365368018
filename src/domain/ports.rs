use crate::domain::model::{SwotAnalysisResult, UserInput};
use crate::utils::error::Result;
use async_trait::async_trait;
use secrecy::SecretString;

/// One schema-constrained generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub schema: &'a serde_json::Value,
    pub temperature: f32,
}

/// External generative model. Returns the raw JSON text of the answer.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, api_key: &SecretString, request: GenerationRequest<'_>)
        -> Result<String>;
}

/// Whatever produces an analysis for the client: the remote endpoint or an
/// in-process invoker.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn generate(&self, input: &UserInput) -> Result<SwotAnalysisResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&SecretString>;
    fn model(&self) -> &str;
    fn api_base_url(&self) -> &str;
}
