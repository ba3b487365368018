use crate::utils::error::{Result, SwotError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Optional settings file shared by the server and the CLI client.
/// Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub model: ModelSection,
    pub client: ClientSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub name: Option<String>,
    pub api_base_url: Option<String>,
    /// Usually `"${API_KEY}"`; an unresolved placeholder counts as absent.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    pub endpoint: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SwotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn api_key(&self) -> Option<SecretString> {
        self.model
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !ENV_VAR.is_match(key))
            .map(|key| SecretString::from(key.to_string()))
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(host) = &self.server.host {
            validate_non_empty_string("server.host", host)?;
        }
        if let Some(port) = self.server.port {
            validate_range("server.port", port, 1, u16::MAX)?;
        }
        if let Some(name) = &self.model.name {
            validate_non_empty_string("model.name", name)?;
        }
        if let Some(url) = &self.model.api_base_url {
            validate_url("model.api_base_url", url)?;
        }
        if let Some(endpoint) = &self.client.endpoint {
            validate_url("client.endpoint", endpoint)?;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 9000

[model]
name = "gemini-2.5-pro"
api_base_url = "https://proxy.example.com"

[client]
endpoint = "https://swot.example.com/generate-swot"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.model.name.as_deref(), Some("gemini-2.5-pro"));
        assert!(config.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.port.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SWOT_TEST_MODEL_KEY", "from-env");

        let toml_content = r#"
[model]
api_key = "${SWOT_TEST_MODEL_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key().unwrap().expose_secret(), "from-env");

        std::env::remove_var("SWOT_TEST_MODEL_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_counts_as_missing_key() {
        let toml_content = r#"
[model]
api_key = "${SWOT_TEST_UNSET_VARIABLE}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.model.api_key.as_deref(),
            Some("${SWOT_TEST_UNSET_VARIABLE}")
        );
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[client]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[server]\nport = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 8123\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.port, Some(8123));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, SwotError::ConfigError { .. }));
    }
}
