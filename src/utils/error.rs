use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker carried by the configuration failure message. Older clients match on it.
pub const MISSING_KEY_MESSAGE: &str =
    "Configuration error: API key is not configured on the server.";

#[derive(Error, Debug)]
pub enum SwotError {
    #[error("{}", MISSING_KEY_MESSAGE)]
    MissingApiKey,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Credential rejected by the model provider: {message}")]
    CredentialError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{message}")]
    ModelError { status: Option<u16>, message: String },

    #[error("A resposta da IA não contém texto.")]
    EmptyResponse,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Recebido um formato inválido do servidor.")]
    MalformedResponse { body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Failure reported by the mediation endpoint. `kind` is absent when the
    /// endpoint predates tagged envelopes.
    #[error("{message}")]
    RemoteError {
        kind: Option<ErrorKind>,
        message: String,
    },
}

/// Three-way classification shared by the endpoint envelope and the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Configuration,
    Credential,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SwotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwotError::MissingApiKey
            | SwotError::ConfigError { .. }
            | SwotError::InvalidConfigValueError { .. } => ErrorKind::Configuration,
            SwotError::CredentialError { .. } => ErrorKind::Credential,
            SwotError::RemoteError { kind, .. } => kind.unwrap_or(ErrorKind::Generic),
            _ => ErrorKind::Generic,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SwotError::ValidationError { .. } => ErrorSeverity::Low,
            SwotError::ApiError(_) | SwotError::ModelError { .. } | SwotError::EmptyResponse => {
                ErrorSeverity::Medium
            }
            SwotError::SerializationError(_)
            | SwotError::MalformedResponse { .. }
            | SwotError::RemoteError { .. } => ErrorSeverity::High,
            SwotError::MissingApiKey
            | SwotError::ConfigError { .. }
            | SwotError::InvalidConfigValueError { .. }
            | SwotError::CredentialError { .. }
            | SwotError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::Configuration => format!("Configuração incompleta: {}", self),
            ErrorKind::Credential => format!("Credencial rejeitada: {}", self),
            ErrorKind::Generic => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SwotError::MissingApiKey => "Set the API_KEY environment variable on the server",
            SwotError::ConfigError { .. } | SwotError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line arguments"
            }
            SwotError::CredentialError { .. } => {
                "Verify the key, billing and supported region in the Google Cloud console"
            }
            SwotError::ApiError(_) => "Check network connectivity and try again",
            SwotError::ModelError { .. } | SwotError::EmptyResponse => {
                "Resubmit the analysis; inspect the server logs if it keeps failing"
            }
            SwotError::SerializationError(_) | SwotError::MalformedResponse { .. } => {
                "The response did not match the expected format; inspect the server logs"
            }
            SwotError::IoError(_) => "Check that the file exists and is readable",
            SwotError::ValidationError { .. } => "Provide at least 10 characters for every field",
            SwotError::RemoteError { .. } => "Inspect the endpoint logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, SwotError>;
