use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use receiver::config::ReceiverConfig;
use serde::{Deserialize, Serialize};
use transmitter::TransmitterConfig;

/// Contents of the TOML file given with `--config`. Every key is optional.
///
/// ```toml
/// log_level = "debug"
///
/// [transmitter]
/// destination = "192.168.1.20:62311"
/// device = "Xbox Wireless Controller"
/// grab = true
///
/// [receiver]
/// bind = "0.0.0.0:62311"
/// backend = "uinput"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub transmitter: TransmitterConfig,
    pub receiver: ReceiverConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: "info".to_string(),
            transmitter: TransmitterConfig::default(),
            receiver: ReceiverConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("Failed to parse config")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(AppConfig::default());
        };
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("Invalid config file {}", path.display()))
    }
}
