use std::{future::Future, path::PathBuf, pin::Pin};

use input_event::{mapper::error::EventMappingError, RawInputEvent};
use thiserror::Error;

#[cfg(target_os = "linux")]
pub mod linux;

#[derive(Debug, Error)]
pub enum DeviceInputError {
    #[error("IO error")]
    IOError(#[from] std::io::Error),
    #[error("Error when converting backend specific input event to generic event")]
    InputEventConversionError(#[from] EventMappingError),
    #[error("No input device matches \"{0}\"")]
    DeviceNotFound(String),
    #[error("Invalid device selection \"{0}\"")]
    InvalidSelection(String),
    #[error("Input capture is not supported on this platform")]
    Unsupported,
}

pub type EventBatch = Vec<RawInputEvent>;

/// A source of raw controller events.
pub trait EventCapture: Send {
    /// Waits for the next batch of key and absolute-axis events. A batch may
    /// be empty when the device reported nothing forwardable.
    fn poll_events(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<EventBatch, DeviceInputError>> + Send + '_>>;
    fn grab_device(&mut self) -> Result<(), DeviceInputError>;
    fn ungrab_device(&mut self) -> Result<(), DeviceInputError>;
    fn name(&self) -> &str;
}

pub struct DeviceInputStream {
    stream: Box<dyn EventCapture>,
}

impl DeviceInputStream {
    pub fn new(stream: impl EventCapture + 'static) -> Self {
        let stream = Box::new(stream);
        DeviceInputStream { stream }
    }

    pub async fn poll_events(&mut self) -> Result<EventBatch, DeviceInputError> {
        self.stream.poll_events().await
    }

    pub fn grab_device(&mut self) -> Result<(), DeviceInputError> {
        self.stream.grab_device()
    }

    pub fn ungrab_device(&mut self) -> Result<(), DeviceInputError> {
        self.stream.ungrab_device()
    }

    pub fn name(&self) -> &str {
        self.stream.name()
    }
}

/// How the physical controller is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    /// An event node such as `/dev/input/event5`.
    Path(PathBuf),
    /// First device whose name contains this text.
    Name(String),
    /// Ask on the terminal.
    Interactive,
}

impl DeviceSelector {
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting.map(str::trim) {
            None | Some("") => DeviceSelector::Interactive,
            Some(path) if path.starts_with('/') => DeviceSelector::Path(path.into()),
            Some(name) => DeviceSelector::Name(name.to_string()),
        }
    }
}

#[cfg(target_os = "linux")]
pub fn open_device(selector: &DeviceSelector) -> Result<DeviceInputStream, DeviceInputError> {
    let device = linux::dev::select_device(selector)?;
    Ok(DeviceInputStream::new(device.into_event_stream()?))
}

#[cfg(not(target_os = "linux"))]
pub fn open_device(_selector: &DeviceSelector) -> Result<DeviceInputStream, DeviceInputError> {
    Err(DeviceInputError::Unsupported)
}
