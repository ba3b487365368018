#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::adapters::gemini::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use secrecy::SecretString;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8888;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "swot-advisor")]
#[command(about = "HTTP endpoint that turns a business idea into a SWOT/TOWS analysis")]
pub struct ServerArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "SWOT_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "GEMINI_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Resolved server settings. Flags win over the file, the file over
/// defaults; the API key comes from the file or `API_KEY`.
#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub api_base_url: String,
    pub api_key: Option<SecretString>,
}

impl ServerConfig {
    pub fn from_sources(
        host: Option<String>,
        port: Option<u16>,
        model: Option<String>,
        api_base_url: Option<String>,
        file: TomlConfig,
    ) -> Self {
        let api_key = file.api_key().or_else(|| {
            std::env::var("API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from)
        });

        Self {
            host: host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            model: model
                .or(file.model.name)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base_url: api_base_url
                .or(file.model.api_base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_key,
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(args: &ServerArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        file.validate()?;

        Ok(Self::from_sources(
            args.host.clone(),
            args.port,
            args.model.clone(),
            args.api_base_url.clone(),
            file,
        ))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for ServerConfig {
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

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("api_base_url", &self.api_base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_and_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[server]
host = "0.0.0.0"
port = 9000

[model]
name = "gemini-from-file"
"#,
        )
        .unwrap();

        let config = ServerConfig::from_sources(
            None,
            Some(7000),
            None,
            None,
            file,
        );

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7000);
        assert_eq!(config.model, "gemini-from-file");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.bind_address(), "0.0.0.0:7000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_sources(None, None, None, None, TomlConfig::default());
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let config = ServerConfig::from_sources(
            None,
            None,
            None,
            Some("localhost:1234".to_string()),
            TomlConfig::default(),
        );
        assert!(config.validate().is_err());
    }
}
