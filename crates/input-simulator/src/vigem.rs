use input_event::{Button, Stick, Trigger};
use tracing::{debug, info};
use vigem_client::{Client, TargetId, XButtons, XGamepad, Xbox360Wired};

use crate::{stick_to_i32, DeviceOutputError, VirtualGamepad};

/// XUSB button mask bits.
fn button_mask(button: Button) -> u16 {
    match button {
        Button::DPadUp => 0x0001,
        Button::DPadDown => 0x0002,
        Button::DPadLeft => 0x0004,
        Button::DPadRight => 0x0008,
        Button::Start => 0x0010,
        Button::Select => 0x0020,
        Button::LeftThumb => 0x0040,
        Button::RightThumb => 0x0080,
        Button::LeftShoulder => 0x0100,
        Button::RightShoulder => 0x0200,
        Button::A => 0x1000,
        Button::B => 0x2000,
        Button::X => 0x4000,
        Button::Y => 0x8000,
    }
}

fn apply_button(raw: u16, button: Button, pressed: bool) -> u16 {
    let mask = button_mask(button);
    if pressed {
        raw | mask
    } else {
        raw & !mask
    }
}

/// Receives finished reports.
pub trait ReportSink {
    fn submit(&mut self, report: &XGamepad) -> Result<(), DeviceOutputError>;
}

impl ReportSink for Xbox360Wired<Client> {
    fn submit(&mut self, report: &XGamepad) -> Result<(), DeviceOutputError> {
        self.update(report)?;
        Ok(())
    }
}

/// Xbox 360 wired controller on ViGEmBus. XInput is already up-positive,
/// so stick values pass through without inversion.
pub struct VigemGamepad<T = Xbox360Wired<Client>> {
    target: T,
    report: XGamepad,
}

impl VigemGamepad {
    pub fn new() -> Result<Self, DeviceOutputError> {
        let client = Client::connect()?;
        let mut target = Xbox360Wired::new(client, TargetId::XBOX360_WIRED);
        target.plugin()?;
        target.wait_ready()?;
        info!("Plugged in ViGEm Xbox 360 controller");

        Ok(Self::with_target(target))
    }
}

impl<T: ReportSink> VigemGamepad<T> {
    pub fn with_target(target: T) -> Self {
        VigemGamepad {
            target,
            report: XGamepad::default(),
        }
    }
}

fn to_i16(value: f32) -> i16 {
    stick_to_i32(value) as i16
}

impl<T: ReportSink> VirtualGamepad for VigemGamepad<T> {
    fn set_stick(&mut self, stick: Stick, x: f32, y: f32) -> Result<(), DeviceOutputError> {
        let (x, y) = (to_i16(x), to_i16(y));
        match stick {
            Stick::Left => (self.report.thumb_lx, self.report.thumb_ly) = (x, y),
            Stick::Right => (self.report.thumb_rx, self.report.thumb_ry) = (x, y),
        }
        Ok(())
    }

    fn set_trigger(&mut self, trigger: Trigger, value: u8) -> Result<(), DeviceOutputError> {
        match trigger {
            Trigger::Left => self.report.left_trigger = value,
            Trigger::Right => self.report.right_trigger = value,
        }
        Ok(())
    }

    fn set_button(&mut self, button: Button, pressed: bool) -> Result<(), DeviceOutputError> {
        let raw = apply_button(self.report.buttons.raw, button, pressed);
        self.report.buttons = XButtons { raw };
        Ok(())
    }

    /// Submits the whole report, changed or not.
    fn commit(&mut self) -> Result<(), DeviceOutputError> {
        debug!("Submitting ViGEm report {:?}", self.report);
        self.target.submit(&self.report)?;
        Ok(())
    }
}
