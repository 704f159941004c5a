use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use input_event::RawInputEvent;
use tokio::net::{ToSocketAddrs, UdpSocket};
use tracing::{debug, info};

use crate::{
    codec::{decode, encode, WireFormat},
    transport::{EventReader, EventWriter},
    TransportError,
};

// Largest possible UDP payload, so no datagram is ever cut short.
const BUFFER_LEN: usize = 65536;

/// Sends one datagram per event to a fixed destination. No retries.
pub struct UdpEventSender {
    socket: UdpSocket,
    destination: SocketAddr,
    format: WireFormat,
}

impl UdpEventSender {
    pub fn new(socket: UdpSocket, destination: SocketAddr, format: WireFormat) -> Self {
        UdpEventSender {
            socket,
            destination,
            format,
        }
    }

    /// Binds an ephemeral local port of the destination's address family.
    pub async fn connect(
        destination: impl ToSocketAddrs,
        format: WireFormat,
    ) -> Result<Self, TransportError> {
        let destination = tokio::net::lookup_host(destination)
            .await?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "destination did not resolve to any address",
                )
            })?;
        let local = if destination.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(local).await?;
        info!("Sending {} events to {}", format, destination);
        Ok(Self::new(socket, destination, format))
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }
}

impl EventWriter for UdpEventSender {
    async fn send_event(&mut self, event: RawInputEvent) -> Result<(), TransportError> {
        let encoded = encode(&event, self.format)?;
        self.socket.send_to(&encoded, self.destination).await?;
        Ok(())
    }
}

pub struct UdpEventReceiver {
    socket: UdpSocket,
    format: WireFormat,
    buf: Vec<u8>,
}

impl UdpEventReceiver {
    pub fn new(socket: UdpSocket, format: WireFormat) -> Self {
        UdpEventReceiver {
            socket,
            format,
            buf: vec![0; BUFFER_LEN],
        }
    }

    pub async fn bind(
        address: impl ToSocketAddrs,
        format: WireFormat,
    ) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(address).await?;
        info!("Listening for {} events on {}", format, socket.local_addr()?);
        Ok(Self::new(socket, format))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

impl EventReader for UdpEventReceiver {
    async fn receive_event(&mut self) -> Result<(RawInputEvent, SocketAddr), TransportError> {
        let (bytes_read, from) = self.socket.recv_from(&mut self.buf).await?;
        debug!("Received {} bytes from {}", bytes_read, from);

        let event = decode(&self.buf[..bytes_read], self.format)
            .map_err(|source| TransportError::MalformedDatagram { from, source })?;
        Ok((event, from))
    }
}
