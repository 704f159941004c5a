use bincode::Options;
use input_event::RawInputEvent;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::CodecError;

/// Datagram payload encoding. Both ends must agree; nothing on the wire
/// says which one is in use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WireFormat {
    /// `{"type":1,"code":304,"value":1}`
    #[default]
    Json,
    Bincode,
}

/// Fixed-width little-endian fields; a datagram must hold exactly one record.
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

pub fn encode(event: &RawInputEvent, format: WireFormat) -> Result<Vec<u8>, CodecError> {
    let bytes = match format {
        WireFormat::Json => serde_json::to_vec(event)?,
        WireFormat::Bincode => bincode_options().serialize(event)?,
    };
    Ok(bytes)
}

pub fn decode(bytes: &[u8], format: WireFormat) -> Result<RawInputEvent, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::EmptyDatagram);
    }
    let event = match format {
        WireFormat::Json => serde_json::from_slice(bytes)?,
        WireFormat::Bincode => bincode_options().deserialize(bytes)?,
    };
    Ok(event)
}
