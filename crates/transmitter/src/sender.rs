use input_listener::{open_device, DeviceInputStream, DeviceSelector};
use network::{transport::EventWriter, udp::UdpEventSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{config::TransmitterConfig, TransmitterError};

pub async fn input_event_sender(
    config: &TransmitterConfig,
    cancellation_token: CancellationToken,
) -> Result<(), TransmitterError> {
    let selector = DeviceSelector::from_setting(config.device.as_deref());
    let mut stream = open_device(&selector)?;
    let mut transport =
        UdpEventSender::connect(config.destination.as_str(), config.format).await?;

    if config.grab {
        stream.grab_device()?;
        info!("Grabbed {}", stream.name());
    }

    let result = input_event_forwarder(&mut stream, &mut transport, cancellation_token).await;

    if config.grab {
        if let Err(err) = stream.ungrab_device() {
            warn!("Could not release {}: {}", stream.name(), err);
        }
    }
    result
}

/// Sends every captured event as its own datagram, in capture order.
/// Returns on cancellation or on the first capture or send failure.
pub async fn input_event_forwarder<W: EventWriter>(
    stream: &mut DeviceInputStream,
    transport: &mut W,
    cancellation_token: CancellationToken,
) -> Result<(), TransmitterError> {
    loop {
        tokio::select! {
            batch = stream.poll_events() => {
                let batch = match batch {
                    Ok(batch) => batch,
                    Err(err) => {
                        error!("Error reading from {}: {}", stream.name(), err);
                        return Err(err.into());
                    }
                };
                for event in batch {
                    debug!("Sending {:?}", event);
                    if let Err(err) = transport.send_event(event).await {
                        error!("Error sending input event: {}", err);
                        return Err(err.into());
                    }
                }
            },
            _ = cancellation_token.cancelled() => {
                info!("Transmitter shutting down");
                return Ok(())
            },
        }
    }
}

#[cfg(test)]
mod test {
    use std::{future::Future, pin::Pin};

    use input_event::RawInputEvent;
    use input_listener::{DeviceInputError, EventBatch, EventCapture};
    use network::{transport::EventReader, udp::UdpEventReceiver, TransportError, WireFormat};

    use super::*;

    struct Scripted {
        batches: Vec<EventBatch>,
    }

    impl EventCapture for Scripted {
        fn poll_events(
            &mut self,
        ) -> Pin<Box<dyn Future<Output = Result<EventBatch, DeviceInputError>> + Send + '_>>
        {
            Box::pin(async move {
                if self.batches.is_empty() {
                    std::future::pending().await
                } else {
                    Ok(self.batches.remove(0))
                }
            })
        }

        fn grab_device(&mut self) -> Result<(), DeviceInputError> {
            Ok(())
        }

        fn ungrab_device(&mut self) -> Result<(), DeviceInputError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[derive(Default)]
    struct Collecting {
        sent: Vec<RawInputEvent>,
        fail_after: Option<usize>,
    }

    impl EventWriter for Collecting {
        async fn send_event(&mut self, event: RawInputEvent) -> Result<(), TransportError> {
            if self.fail_after == Some(self.sent.len()) {
                return Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into());
            }
            self.sent.push(event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn batches_are_sent_in_capture_order() {
        let mut stream = DeviceInputStream::new(Scripted {
            batches: vec![
                vec![RawInputEvent::axis(0, 120), RawInputEvent::axis(1, -40)],
                vec![],
                vec![RawInputEvent::key(304, 1)],
            ],
        });
        let mut writer = Collecting::default();
        let token = CancellationToken::new();

        let cancel = token.clone();
        let forwarder = input_event_forwarder(&mut stream, &mut writer, token);
        let result = tokio::select! {
            result = forwarder => result,
            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {
                cancel.cancel();
                Ok(())
            },
        };

        assert!(result.is_ok());
        assert_eq!(
            writer.sent,
            vec![
                RawInputEvent::axis(0, 120),
                RawInputEvent::axis(1, -40),
                RawInputEvent::key(304, 1),
            ]
        );
    }

    #[tokio::test]
    async fn send_failure_stops_forwarding() {
        let mut stream = DeviceInputStream::new(Scripted {
            batches: vec![vec![RawInputEvent::key(304, 1), RawInputEvent::key(305, 1)]],
        });
        let mut writer = Collecting {
            fail_after: Some(1),
            ..Default::default()
        };

        let result = input_event_forwarder(&mut stream, &mut writer, CancellationToken::new()).await;

        assert!(matches!(
            result,
            Err(TransmitterError::TransportError(TransportError::IOError(_)))
        ));
        assert_eq!(writer.sent, vec![RawInputEvent::key(304, 1)]);
    }

    #[tokio::test]
    async fn cancelled_forwarder_returns_cleanly() {
        let mut stream = DeviceInputStream::new(Scripted { batches: vec![] });
        let mut writer = Collecting::default();
        let token = CancellationToken::new();
        token.cancel();

        let result = input_event_forwarder(&mut stream, &mut writer, token).await;

        assert!(result.is_ok());
        assert!(writer.sent.is_empty());
    }

    #[tokio::test]
    async fn forwarded_events_reach_a_udp_receiver() {
        let mut receiver = UdpEventReceiver::bind("127.0.0.1:0", WireFormat::Bincode)
            .await
            .unwrap();
        let mut sender =
            UdpEventSender::connect(receiver.local_addr().unwrap(), WireFormat::Bincode)
                .await
                .unwrap();
        let mut stream = DeviceInputStream::new(Scripted {
            batches: vec![vec![RawInputEvent::axis(17, -1)]],
        });
        let token = CancellationToken::new();

        let forward_token = token.clone();
        let forward = async {
            input_event_forwarder(&mut stream, &mut sender, forward_token).await
        };
        let receive = async {
            let received = receiver.receive_event().await;
            token.cancel();
            received
        };
        let (forwarded, received) = tokio::join!(forward, receive);

        assert!(forwarded.is_ok());
        assert_eq!(received.unwrap().0, RawInputEvent::axis(17, -1));
    }
}
