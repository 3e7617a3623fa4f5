//! Application configuration loading from config.toml
//!
//! The file is optional. It only tunes how new invoices are pre-filled; business
//! branding and the default tax rate live in the persisted settings record.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Defaults applied to freshly created invoices
    #[serde(default)]
    pub invoice: InvoiceDefaults,
}

/// Defaults applied when an invoice is created
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InvoiceDefaults {
    /// Prefix of generated invoice numbers (e.g., `"INV-"`)
    pub number_prefix: String,
    /// Days between the issue date and the due date
    pub payment_terms_days: u32,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            number_prefix: "INV-".to_string(),
            payment_terms_days: 14,
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses application configuration from TOML text
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `./config.toml`, using defaults when the file is missing.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, using default invoice settings");
        return Ok(AppConfig::default());
    }
    load_config(path)
}
