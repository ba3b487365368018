use crate::adapters::http_client::interpret_response;
use crate::core::endpoint::MediationEndpoint;
use crate::domain::model::{SwotAnalysisResult, UserInput};
use crate::domain::ports::{AnalysisService, ModelInvoker};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Runs the endpoint in-process, so the CLI behaves exactly like a client
/// of the deployed function without needing one.
pub struct LocalAnalysisService<I: ModelInvoker> {
    endpoint: MediationEndpoint<I>,
}

impl<I: ModelInvoker> LocalAnalysisService<I> {
    pub fn new(endpoint: MediationEndpoint<I>) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl<I: ModelInvoker> AnalysisService for LocalAnalysisService<I> {
    async fn generate(&self, input: &UserInput) -> Result<SwotAnalysisResult> {
        let body = serde_json::to_string(input)?;
        let response = self.endpoint.handle("POST", Some(&body)).await;
        interpret_response(response.status_code, &response.body)
    }
}
