// Adapters layer: concrete implementations for external systems (model API, http, hosting).

pub mod gemini;
pub mod http_client;
pub mod local;
pub mod server;
