//! Axum hosting for the mediation endpoint.
//!
//! The route accepts every method and lets the endpoint answer 405 itself,
//! so the function and the server reject non-POST requests identically.

use crate::core::endpoint::{FunctionResponse, MediationEndpoint};
use crate::domain::ports::ModelInvoker;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const GENERATE_PATH: &str = "/generate-swot";
pub const NETLIFY_GENERATE_PATH: &str = "/.netlify/functions/generate-swot";

pub fn build_router<I: ModelInvoker + 'static>(endpoint: MediationEndpoint<I>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(GENERATE_PATH, any(generate_swot::<I>))
        .route(NETLIFY_GENERATE_PATH, any(generate_swot::<I>))
        .route("/health", get(health::<I>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(endpoint))
}

async fn generate_swot<I: ModelInvoker + 'static>(
    State(endpoint): State<Arc<MediationEndpoint<I>>>,
    method: Method,
    body: Bytes,
) -> Response {
    let body = String::from_utf8_lossy(&body);
    let response = endpoint.handle(method.as_str(), Some(body.as_ref())).await;
    into_axum_response(response)
}

async fn health<I: ModelInvoker + 'static>(
    State(endpoint): State<Arc<MediationEndpoint<I>>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "configured": endpoint.is_configured(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn into_axum_response(response: FunctionResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
