use input_event::{Button, Stick, Trigger};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoEnumIterator};
use thiserror::Error;

#[cfg(target_os = "linux")]
pub mod uinput;
#[cfg(windows)]
pub mod vigem;

pub const STICK_MAX: i32 = 32767;

#[derive(Debug, Error)]
pub enum DeviceOutputError {
    #[error("IO error")]
    IOError(#[from] std::io::Error),
    #[cfg(windows)]
    #[error("ViGEm error")]
    VigemError(#[from] vigem_client::Error),
    #[error("Backend {0} is not available on this platform")]
    UnsupportedBackend(Backend),
}

/// Sink for normalized gamepad state. Sets are staged and only become
/// visible to the OS once `commit` is called; repeating a set with the same
/// value is harmless.
pub trait VirtualGamepad {
    /// `x` and `y` are in `[-1.0, 1.0]`, with `y` positive when the stick is up.
    fn set_stick(&mut self, stick: Stick, x: f32, y: f32) -> Result<(), DeviceOutputError>;
    fn set_trigger(&mut self, trigger: Trigger, value: u8) -> Result<(), DeviceOutputError>;
    fn set_button(&mut self, button: Button, pressed: bool) -> Result<(), DeviceOutputError>;
    fn commit(&mut self) -> Result<(), DeviceOutputError>;

    fn release_all(&mut self) -> Result<(), DeviceOutputError> {
        for stick in Stick::iter() {
            self.set_stick(stick, 0.0, 0.0)?;
        }
        for trigger in Trigger::iter() {
            self.set_trigger(trigger, 0)?;
        }
        for button in Button::iter() {
            self.set_button(button, false)?;
        }
        self.commit()
    }
}

impl<T: VirtualGamepad + ?Sized> VirtualGamepad for Box<T> {
    fn set_stick(&mut self, stick: Stick, x: f32, y: f32) -> Result<(), DeviceOutputError> {
        (**self).set_stick(stick, x, y)
    }

    fn set_trigger(&mut self, trigger: Trigger, value: u8) -> Result<(), DeviceOutputError> {
        (**self).set_trigger(trigger, value)
    }

    fn set_button(&mut self, button: Button, pressed: bool) -> Result<(), DeviceOutputError> {
        (**self).set_button(button, pressed)
    }

    fn commit(&mut self) -> Result<(), DeviceOutputError> {
        (**self).commit()
    }

    fn release_all(&mut self) -> Result<(), DeviceOutputError> {
        (**self).release_all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    /// Linux `/dev/uinput` Xbox-style gamepad.
    Uinput,
    /// ViGEmBus Xbox 360 controller (Windows).
    Vigem,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(windows) {
            Backend::Vigem
        } else {
            Backend::Uinput
        }
    }
}

pub fn create_gamepad(
    backend: Backend,
    name: &str,
) -> Result<Box<dyn VirtualGamepad>, DeviceOutputError> {
    match backend {
        Backend::Uinput => make_uinput(name),
        Backend::Vigem => make_vigem(),
    }
}

#[cfg(target_os = "linux")]
fn make_uinput(name: &str) -> Result<Box<dyn VirtualGamepad>, DeviceOutputError> {
    Ok(Box::new(uinput::UinputGamepad::new(name)?))
}

#[cfg(not(target_os = "linux"))]
fn make_uinput(_name: &str) -> Result<Box<dyn VirtualGamepad>, DeviceOutputError> {
    Err(DeviceOutputError::UnsupportedBackend(Backend::Uinput))
}

#[cfg(windows)]
fn make_vigem() -> Result<Box<dyn VirtualGamepad>, DeviceOutputError> {
    Ok(Box::new(vigem::VigemGamepad::new()?))
}

#[cfg(not(windows))]
fn make_vigem() -> Result<Box<dyn VirtualGamepad>, DeviceOutputError> {
    Err(DeviceOutputError::UnsupportedBackend(Backend::Vigem))
}

/// Scales a normalized stick value onto `[-STICK_MAX, STICK_MAX]`.
pub fn stick_to_i32(value: f32) -> i32 {
    (value.clamp(-1.0, 1.0) * STICK_MAX as f32).round() as i32
}

/// Folds an opposing pair of D-pad buttons into a hat value.
pub fn hat_value(negative: bool, positive: bool) -> i32 {
    match (negative, positive) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct CountingGamepad {
        sets: usize,
        commits: usize,
    }

    impl VirtualGamepad for CountingGamepad {
        fn set_stick(&mut self, _: Stick, _: f32, _: f32) -> Result<(), DeviceOutputError> {
            self.sets += 1;
            Ok(())
        }

        fn set_trigger(&mut self, _: Trigger, _: u8) -> Result<(), DeviceOutputError> {
            self.sets += 1;
            Ok(())
        }

        fn set_button(&mut self, _: Button, _: bool) -> Result<(), DeviceOutputError> {
            self.sets += 1;
            Ok(())
        }

        fn commit(&mut self) -> Result<(), DeviceOutputError> {
            self.commits += 1;
            Ok(())
        }
    }

    #[test]
    fn release_all_touches_every_channel_then_commits_once() {
        let mut gamepad = CountingGamepad::default();
        gamepad.release_all().unwrap();
        assert_eq!(gamepad.sets, 2 + 2 + Button::iter().count());
        assert_eq!(gamepad.commits, 1);
    }

    #[test]
    fn stick_scaling_saturates() {
        assert_eq!(stick_to_i32(1.0), STICK_MAX);
        assert_eq!(stick_to_i32(-1.0), -STICK_MAX);
        assert_eq!(stick_to_i32(0.5), 16384);
        assert_eq!(stick_to_i32(3.0), STICK_MAX);
    }

    #[test]
    fn hat_is_centered_unless_exactly_one_side_is_held() {
        assert_eq!(hat_value(true, false), -1);
        assert_eq!(hat_value(false, true), 1);
        assert_eq!(hat_value(false, false), 0);
        assert_eq!(hat_value(true, true), 0);
    }

    #[test]
    fn backend_names_round_trip_through_strings() {
        assert_eq!("uinput".parse::<Backend>().unwrap(), Backend::Uinput);
        assert_eq!(Backend::Vigem.to_string(), "vigem");
    }

    #[cfg(not(windows))]
    #[test]
    fn vigem_is_rejected_off_windows() {
        assert!(matches!(
            create_gamepad(Backend::Vigem, "test"),
            Err(DeviceOutputError::UnsupportedBackend(Backend::Vigem))
        ));
    }
}
