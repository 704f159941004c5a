use thiserror::Error;

pub mod codec;
pub mod transport;
pub mod udp;

pub use codec::{decode, encode, WireFormat};

pub const DEFAULT_PORT: u16 = 62311;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON codec error")]
    JsonError(#[from] serde_json::Error),
    #[error("Bincode codec error")]
    BincodeError(#[from] bincode::Error),
    #[error("Empty datagram")]
    EmptyDatagram,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Malformed datagram from {from}")]
    MalformedDatagram {
        from: std::net::SocketAddr,
        #[source]
        source: CodecError,
    },
    #[error("Could not encode event")]
    EncodeError(#[from] CodecError),
    #[error("IO error")]
    IOError(#[from] std::io::Error),
}
