use input_simulator::{create_gamepad, VirtualGamepad};
use network::{transport::EventReader, udp::UdpEventReceiver, TransportError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{config::ReceiverConfig, Normalizer, ReceiverError};

pub async fn input_event_listener(
    config: &ReceiverConfig,
    cancellation_token: CancellationToken,
) -> Result<(), ReceiverError> {
    let gamepad = create_gamepad(config.backend, &config.device_name)?;
    let mut transport = UdpEventReceiver::bind(config.bind, config.format).await?;

    let mut normalizer = Normalizer::new(gamepad);
    normalizer.flush()?;

    input_event_processor(&mut transport, &mut normalizer, cancellation_token).await
}

/// Receives, normalizes and flushes until the token is cancelled or the
/// socket or device fails. Malformed datagrams are skipped.
pub async fn input_event_processor<R: EventReader, G: VirtualGamepad>(
    transport: &mut R,
    normalizer: &mut Normalizer<G>,
    cancellation_token: CancellationToken,
) -> Result<(), ReceiverError> {
    loop {
        tokio::select! {
            received = transport.receive_event() => {
                match received {
                    Ok((event, from)) => {
                        debug!("Processing {:?} from {}", event, from);
                        if let Err(err) = normalizer.process(event) {
                            error!("Could not update virtual gamepad: {}", err);
                            return Err(err.into());
                        }
                    }
                    Err(TransportError::MalformedDatagram { from, source }) => {
                        warn!("Skipping malformed datagram from {}: {}", from, source);
                    }
                    Err(err) => {
                        error!("Error receiving input events: {}", err);
                        return Err(err.into());
                    }
                }
            },
            _ = cancellation_token.cancelled() => {
                info!("Receiver shutting down, releasing virtual gamepad");
                normalizer.release_all()?;
                return Ok(())
            },
        }
    }
}
