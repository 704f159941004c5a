use network::{WireFormat, DEFAULT_PORT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmitterConfig {
    /// `host:port` of the receiver, resolved once at startup.
    pub destination: String,
    /// Event node path or a name substring. Unset means ask on the terminal.
    pub device: Option<String>,
    /// Keep the controller's events away from local applications.
    pub grab: bool,
    pub format: WireFormat,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        TransmitterConfig {
            destination: format!("127.0.0.1:{}", DEFAULT_PORT),
            device: None,
            grab: false,
            format: WireFormat::default(),
        }
    }
}
