use crate::domain::model::UserInput;
use crate::utils::error::{Result, SwotError};
use clap::Parser;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "swot-cli")]
#[command(about = "Generate a SWOT/TOWS analysis for a business idea")]
pub struct ClientArgs {
    /// TOML or JSON file with the eight business-idea fields
    #[arg(short, long)]
    pub input: String,

    /// Deployed generate-swot endpoint; runs the model in-process when absent
    #[arg(long, env = "SWOT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Write the Markdown report to this file as well
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the raw JSON analysis instead of the report
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Reads the business-idea answers. `.json` files are parsed as JSON,
/// everything else as TOML; keys use the wire names (`businessIdea`, ...).
pub fn load_user_input<P: AsRef<Path>>(path: P) -> Result<UserInput> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        toml::from_str(&content).map_err(|e| SwotError::ConfigError {
            message: format!("Invalid input file {}: {}", path.display(), e),
        })
    }
}
