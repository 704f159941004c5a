use std::collections::HashMap;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AbsInfo, AbsoluteAxisType, AttributeSet, BusType, EventType, InputEvent, InputId, Key,
    UinputAbsSetup,
};
use input_event::{AxisChannel, Button, HatAxis, Stick, StickAxis, Trigger};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::{hat_value, stick_to_i32, DeviceOutputError, VirtualGamepad, STICK_MAX};

// Xbox 360 wired ids, so SDL and Steam pick a standard layout.
const VENDOR_ID: u16 = 0x045e;
const PRODUCT_ID: u16 = 0x028e;
const VERSION: u16 = 0x0110;

/// Xbox-style gamepad on `/dev/uinput`.
///
/// The D-pad is exposed as `ABS_HAT0X`/`ABS_HAT0Y` the way `xpad` reports
/// it, and vertical stick axes are written in the kernel's down-positive
/// convention.
pub struct UinputGamepad {
    device: VirtualDevice,
    frame: Frame,
}

/// Events for the next `SYN_REPORT`, minus those that repeat the last
/// emitted value. The D-pad is folded into hat values once per frame.
#[derive(Default)]
struct Frame {
    pending: Vec<InputEvent>,
    last: HashMap<(u16, u16), i32>,
    dpad: [bool; 4],
}

impl Frame {
    fn stage(&mut self, event_type: EventType, code: u16, value: i32) {
        if self.last.insert((event_type.0, code), value) != Some(value) {
            self.pending.push(InputEvent::new(event_type, code, value));
        }
    }

    fn stage_axis(&mut self, channel: AxisChannel, value: i32) {
        let axis = AbsoluteAxisType::from(channel);
        self.stage(EventType::ABSOLUTE, axis.0, value);
    }

    fn set_button(&mut self, button: Button, pressed: bool) {
        let slot = match button {
            Button::DPadUp => 0,
            Button::DPadDown => 1,
            Button::DPadLeft => 2,
            Button::DPadRight => 3,
            _ => {
                self.stage(EventType::KEY, Key::from(button).code(), pressed.into());
                return;
            }
        };
        self.dpad[slot] = pressed;
    }

    fn finish(&mut self) -> Vec<InputEvent> {
        let [up, down, left, right] = self.dpad;
        self.stage_axis(AxisChannel::Hat(HatAxis::Horizontal), hat_value(left, right));
        self.stage_axis(AxisChannel::Hat(HatAxis::Vertical), hat_value(up, down));
        std::mem::take(&mut self.pending)
    }
}

impl UinputGamepad {
    pub fn new(name: &str) -> Result<Self, DeviceOutputError> {
        let keys = AttributeSet::from_iter(
            Button::iter()
                .filter(|button| button.code().is_some())
                .map(Key::from),
        );

        let stick = AbsInfo::new(0, -STICK_MAX - 1, STICK_MAX, 16, 128, 0);
        let trigger = AbsInfo::new(0, 0, u8::MAX.into(), 0, 0, 0);
        let hat = AbsInfo::new(0, -1, 1, 0, 0, 0);

        let mut builder = VirtualDeviceBuilder::new()?
            .name(name)
            .input_id(InputId::new(BusType::BUS_USB, VENDOR_ID, PRODUCT_ID, VERSION))
            .with_keys(&keys)?;
        for stick_axis in [
            AbsoluteAxisType::ABS_X,
            AbsoluteAxisType::ABS_Y,
            AbsoluteAxisType::ABS_RX,
            AbsoluteAxisType::ABS_RY,
        ] {
            builder = builder.with_absolute_axis(&UinputAbsSetup::new(stick_axis, stick))?;
        }
        for trigger_axis in [AbsoluteAxisType::ABS_Z, AbsoluteAxisType::ABS_RZ] {
            builder = builder.with_absolute_axis(&UinputAbsSetup::new(trigger_axis, trigger))?;
        }
        for hat_axis in [AbsoluteAxisType::ABS_HAT0X, AbsoluteAxisType::ABS_HAT0Y] {
            builder = builder.with_absolute_axis(&UinputAbsSetup::new(hat_axis, hat))?;
        }

        let device = builder.build()?;
        info!("Created uinput gamepad \"{}\"", name);

        Ok(UinputGamepad {
            device,
            frame: Frame::default(),
        })
    }
}

impl VirtualGamepad for UinputGamepad {
    fn set_stick(&mut self, stick: Stick, x: f32, y: f32) -> Result<(), DeviceOutputError> {
        self.frame.stage_axis(AxisChannel::Stick(stick, StickAxis::X), stick_to_i32(x));
        self.frame.stage_axis(AxisChannel::Stick(stick, StickAxis::Y), -stick_to_i32(y));
        Ok(())
    }

    fn set_trigger(&mut self, trigger: Trigger, value: u8) -> Result<(), DeviceOutputError> {
        self.frame.stage_axis(AxisChannel::Trigger(trigger), value.into());
        Ok(())
    }

    fn set_button(&mut self, button: Button, pressed: bool) -> Result<(), DeviceOutputError> {
        self.frame.set_button(button, pressed);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DeviceOutputError> {
        let events = self.frame.finish();
        if events.is_empty() {
            return Ok(());
        }
        debug!("Emitting {} uinput events", events.len());
        // emit appends the SYN_REPORT
        self.device.emit(&events)?;
        Ok(())
    }
}
