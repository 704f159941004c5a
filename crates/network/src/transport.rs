use std::net::SocketAddr;

use input_event::RawInputEvent;

use crate::TransportError;

pub trait EventWriter {
    fn send_event(
        &mut self,
        event: RawInputEvent,
    ) -> impl std::future::Future<Output = Result<(), TransportError>>;
}

pub trait EventReader {
    fn receive_event(
        &mut self,
    ) -> impl std::future::Future<Output = Result<(RawInputEvent, SocketAddr), TransportError>>;
}
