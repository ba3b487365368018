#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use swot_advisor::core::endpoint::{FunctionRequest, FunctionResponse};
#[cfg(feature = "lambda")]
use swot_advisor::utils::logger;
#[cfg(feature = "lambda")]
use swot_advisor::FunctionConfig;

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<FunctionRequest>) -> Result<FunctionResponse, Error> {
    tracing::info!("generate-swot invoked ({})", event.payload.http_method);

    // 每次呼叫重新讀取環境變數
    let response = FunctionConfig::from_env().respond(&event.payload).await;
    tracing::info!("generate-swot finished with status {}", response.status_code);
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
