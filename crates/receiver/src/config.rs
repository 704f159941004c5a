use std::net::{Ipv4Addr, SocketAddr};

use input_simulator::Backend;
use network::{WireFormat, DEFAULT_PORT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    pub bind: SocketAddr,
    pub backend: Backend,
    pub device_name: String,
    pub format: WireFormat,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        ReceiverConfig {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            backend: Backend::default(),
            device_name: "Gamepad Relay".to_string(),
            format: WireFormat::default(),
        }
    }
}
