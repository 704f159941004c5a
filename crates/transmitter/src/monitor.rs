use std::io::Write;

use input_event::{GamepadEvent, RawInputEvent};
use input_listener::{open_device, DeviceInputError, DeviceInputStream, DeviceSelector};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::TransmitterError;

pub async fn input_event_monitor(
    device: Option<&str>,
    cancellation_token: CancellationToken,
) -> Result<(), TransmitterError> {
    let mut stream = open_device(&DeviceSelector::from_setting(device))?;
    let stdout = std::io::stdout();
    print_events(&mut stream, &mut stdout.lock(), cancellation_token).await
}

/// One line per event, e.g. `type=3 code=1 value=-420 (Stick { .. })`.
pub fn describe(event: RawInputEvent) -> String {
    let mut line = format!(
        "type={} code={} value={}",
        u16::from(event.kind),
        event.code,
        event.value
    );
    if let Ok(mapped) = GamepadEvent::try_from(event) {
        line.push_str(&format!(" ({:?})", mapped));
    }
    line
}

pub async fn print_events<O: Write>(
    stream: &mut DeviceInputStream,
    out: &mut O,
    cancellation_token: CancellationToken,
) -> Result<(), TransmitterError> {
    info!("Monitoring {}", stream.name());
    loop {
        tokio::select! {
            batch = stream.poll_events() => {
                for event in batch? {
                    writeln!(out, "{}", describe(event)).map_err(DeviceInputError::from)?;
                }
            },
            _ = cancellation_token.cancelled() => return Ok(()),
        }
    }
}
