use std::{future::Future, io::Write, pin::Pin};

use evdev::{Device, EventStream, InputEventKind, Key, Synchronization};
use input_event::RawInputEvent;
use tracing::{info, trace};

use crate::{DeviceInputError, DeviceSelector, EventBatch, EventCapture};

impl EventCapture for EventStream {
    /// Collects one evdev frame, i.e. everything up to the next `SYN_REPORT`.
    fn poll_events(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<EventBatch, DeviceInputError>> + Send + '_>> {
        Box::pin(async move {
            let mut batch = EventBatch::new();
            loop {
                let event = self.next_event().await?;
                if let InputEventKind::Synchronization(Synchronization::SYN_REPORT) = event.kind()
                {
                    return Ok(batch);
                }
                match RawInputEvent::try_from(event) {
                    Ok(raw) => batch.push(raw),
                    Err(err) => trace!("Dropping captured event: {}", err),
                }
            }
        })
    }

    fn grab_device(&mut self) -> Result<(), DeviceInputError> {
        self.device_mut().grab()?;
        Ok(())
    }

    fn ungrab_device(&mut self) -> Result<(), DeviceInputError> {
        self.device_mut().ungrab()?;
        Ok(())
    }

    fn name(&self) -> &str {
        self.device().name().unwrap_or("Unnamed device")
    }
}

fn is_gamepad(device: &Device) -> bool {
    device
        .supported_keys()
        .is_some_and(|keys| keys.contains(Key::BTN_SOUTH))
}

pub fn select_device(selector: &DeviceSelector) -> Result<Device, DeviceInputError> {
    let device = match selector {
        DeviceSelector::Path(path) => Device::open(path)?,
        DeviceSelector::Name(name) => evdev::enumerate()
            .map(|(_, device)| device)
            .find(|device| device.name().is_some_and(|n| n.contains(name.as_str())))
            .ok_or_else(|| DeviceInputError::DeviceNotFound(name.clone()))?,
        DeviceSelector::Interactive => pick_device()?,
    };
    info!(
        "Capturing from {}",
        device.name().unwrap_or("Unnamed device")
    );
    Ok(device)
}

pub fn pick_device() -> Result<Device, DeviceInputError> {
    let mut devices = evdev::enumerate().map(|t| t.1).collect::<Vec<_>>();
    // readdir returns them in reverse order from their eventN names for some reason
    devices.reverse();
    if devices.is_empty() {
        return Err(DeviceInputError::DeviceNotFound(
            "any readable /dev/input device".into(),
        ));
    }
    for (i, d) in devices.iter().enumerate() {
        let marker = if is_gamepad(d) { " (gamepad)" } else { "" };
        println!("{}: {}{}", i, d.name().unwrap_or("Unnamed device"), marker);
    }
    print!("Select the controller [0-{}]: ", devices.len() - 1);
    std::io::stdout().flush()?;

    let mut chosen = String::new();
    std::io::stdin().read_line(&mut chosen)?;
    let n = chosen
        .trim()
        .parse::<usize>()
        .map_err(|_| DeviceInputError::InvalidSelection(chosen.trim().to_string()))?;
    devices
        .into_iter()
        .nth(n)
        .ok_or_else(|| DeviceInputError::InvalidSelection(n.to_string()))
}
