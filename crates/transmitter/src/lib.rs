use input_listener::DeviceInputError;
use network::TransportError;
use thiserror::Error;

pub mod config;
pub mod monitor;
pub mod sender;

pub use config::TransmitterConfig;

#[derive(Debug, Error)]
pub enum TransmitterError {
    #[error("Device input error")]
    DeviceInputError(#[from] DeviceInputError),
    #[error("Transport error")]
    TransportError(#[from] TransportError),
}
