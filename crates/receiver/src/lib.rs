use input_simulator::DeviceOutputError;
use network::TransportError;
use thiserror::Error;

pub mod config;
pub mod listener;
pub mod normalize;
pub mod normalizer;
pub mod state;

pub use normalizer::Normalizer;
pub use state::{GamepadState, StickState};

#[derive(Debug, Error)]
pub enum ReceiverError {
    #[error("Transport error")]
    TransportError(#[from] TransportError),
    #[error("Virtual gamepad error")]
    DeviceOutputError(#[from] DeviceOutputError),
}
