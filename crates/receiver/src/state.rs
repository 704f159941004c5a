use input_event::{Button, HatAxis, Stick, StickAxis, Trigger};
use input_simulator::{DeviceOutputError, VirtualGamepad};
use strum::{EnumCount, IntoEnumIterator};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickState {
    pub x: f32,
    pub y: f32,
}

/// What the emulated controller currently reports.
///
/// Stick halves are in `[-1.0, 1.0]` with `y` positive when up, triggers are
/// in `[0, 255]`. Opposing D-pad directions are never held together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    left_stick: StickState,
    right_stick: StickState,
    left_trigger: u8,
    right_trigger: u8,
    buttons: [bool; Button::COUNT],
}

impl GamepadState {
    pub fn stick(&self, stick: Stick) -> StickState {
        match stick {
            Stick::Left => self.left_stick,
            Stick::Right => self.right_stick,
        }
    }

    pub fn left_stick(&self) -> StickState {
        self.left_stick
    }

    pub fn right_stick(&self) -> StickState {
        self.right_stick
    }

    pub fn trigger(&self, trigger: Trigger) -> u8 {
        match trigger {
            Trigger::Left => self.left_trigger,
            Trigger::Right => self.right_trigger,
        }
    }

    pub fn left_trigger(&self) -> u8 {
        self.left_trigger
    }

    pub fn right_trigger(&self) -> u8 {
        self.right_trigger
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    pub fn pressed_buttons(&self) -> Vec<Button> {
        Button::iter().filter(|b| self.is_pressed(*b)).collect()
    }

    /// Updates one half of a stick; the other half keeps its value.
    pub fn set_stick_axis(&mut self, stick: Stick, axis: StickAxis, value: f32) {
        let value = value.clamp(-1.0, 1.0);
        let state = match stick {
            Stick::Left => &mut self.left_stick,
            Stick::Right => &mut self.right_stick,
        };
        match axis {
            StickAxis::X => state.x = value,
            StickAxis::Y => state.y = value,
        }
    }

    pub fn set_trigger(&mut self, trigger: Trigger, value: u8) {
        match trigger {
            Trigger::Left => self.left_trigger = value,
            Trigger::Right => self.right_trigger = value,
        }
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }

    /// Replaces the whole direction pair of one hat axis: `-1` holds the
    /// negative side (left/up), `1` the positive side (right/down), anything
    /// else releases both.
    pub fn set_hat(&mut self, axis: HatAxis, value: i32) {
        let (negative, positive) = match axis {
            HatAxis::Horizontal => (Button::DPadLeft, Button::DPadRight),
            HatAxis::Vertical => (Button::DPadUp, Button::DPadDown),
        };
        self.set_button(negative, value == -1);
        self.set_button(positive, value == 1);
    }

    /// Pushes every channel to the gamepad and commits once.
    pub fn flush_to<G: VirtualGamepad + ?Sized>(
        &self,
        gamepad: &mut G,
    ) -> Result<(), DeviceOutputError> {
        for stick in Stick::iter() {
            let StickState { x, y } = self.stick(stick);
            gamepad.set_stick(stick, x, y)?;
        }
        for trigger in Trigger::iter() {
            gamepad.set_trigger(trigger, self.trigger(trigger))?;
        }
        for button in Button::iter() {
            gamepad.set_button(button, self.is_pressed(button))?;
        }
        gamepad.commit()
    }
}
