use thiserror::Error;

use crate::EventKind;

#[derive(Debug, Error)]
pub enum EventMappingError {
    #[error("Event type {0} is unsupported")]
    UnsupportedEvent(u16),
    #[error("No channel is mapped to {0} code {1}")]
    UnmappedChannel(EventKind, u16),
}
