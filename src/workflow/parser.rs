//! Configuration Parser
//!
//! Loads configuration files into [`Config`]. YAML is the default format;
//! files with a `.json` extension are parsed as JSON. Both parsers reject
//! unrecognized fields, and every loaded configuration is validated before
//! it is returned.

use std::fs;
use std::path::Path;

use log::{debug, info};

use super::model::Config;
use super::validator::validate_config;
use crate::error::{Error, Result};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parses and validates configuration text.
///
/// `origin` is only used in error messages.
pub fn parse_config(text: &str, format: ConfigFormat, origin: &Path) -> Result<Config> {
    let parsed = match format {
        ConfigFormat::Yaml => serde_yaml::from_str::<Config>(text).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str::<Config>(text).map_err(|e| e.to_string()),
    };

    let config = parsed.map_err(|message| Error::ConfigParse {
        path: origin.to_path_buf(),
        message,
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Loads a configuration from a file.
///
/// # Example
///
/// ```rust,no_run
/// use transformer::workflow::load_config;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_config("transformer.yaml")?;
///     println!("Loaded {} workflows", config.workflows.len());
///     Ok(())
/// }
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Configuration loaded ({} bytes)", text.len());

    let config = parse_config(&text, ConfigFormat::from_path(path), path)?;

    info!(
        "Parsed {} workflows ({} enabled)",
        config.workflows.len(),
        config.workflows.iter().filter(|wf| !wf.disabled).count()
    );

    Ok(config)
}
