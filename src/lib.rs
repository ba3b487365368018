pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::ClientArgs;
#[cfg(feature = "cli")]
pub use config::ServerArgs;

pub use adapters::gemini::GeminiInvoker;
pub use adapters::http_client::HttpAnalysisClient;
pub use adapters::local::LocalAnalysisService;
pub use config::{lambda::FunctionConfig, ServerConfig};
pub use core::{endpoint::MediationEndpoint, orchestrator::Orchestrator};
pub use utils::error::{ErrorKind, Result, SwotError};
