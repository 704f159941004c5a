use input_event::{GamepadEvent, RawInputEvent, StickAxis};
use input_simulator::{DeviceOutputError, VirtualGamepad};
use tracing::trace;

use crate::{
    normalize::{normalize_axis, normalize_trigger},
    state::GamepadState,
};

/// Owns the gamepad state and the sink it is flushed to.
pub struct Normalizer<G> {
    state: GamepadState,
    gamepad: G,
}

impl<G: VirtualGamepad> Normalizer<G> {
    pub fn new(gamepad: G) -> Self {
        Normalizer {
            state: GamepadState::default(),
            gamepad,
        }
    }

    pub fn state(&self) -> &GamepadState {
        &self.state
    }

    pub fn gamepad(&self) -> &G {
        &self.gamepad
    }

    /// Folds one wire event into the state without touching the gamepad.
    /// Events on unmapped channels leave the state as it was.
    pub fn apply(&mut self, event: RawInputEvent) {
        let event = match GamepadEvent::try_from(event) {
            Ok(event) => event,
            Err(err) => {
                trace!("Ignoring {:?}: {}", event, err);
                return;
            }
        };

        match event {
            GamepadEvent::Button { button, pressed } => self.state.set_button(button, pressed),
            GamepadEvent::Stick { stick, axis, value } => {
                // raw up is negative, stored up is positive
                let value = match axis {
                    StickAxis::X => normalize_axis(value),
                    StickAxis::Y => normalize_axis(value.saturating_neg()),
                };
                self.state.set_stick_axis(stick, axis, value);
            }
            GamepadEvent::Trigger { trigger, value } => {
                self.state.set_trigger(trigger, normalize_trigger(value))
            }
            GamepadEvent::Hat { axis, value } => self.state.set_hat(axis, value),
        }
    }

    /// Applies the event and flushes, even if nothing changed.
    pub fn process(&mut self, event: RawInputEvent) -> Result<(), DeviceOutputError> {
        self.apply(event);
        self.flush()
    }

    pub fn flush(&mut self) -> Result<(), DeviceOutputError> {
        self.state.flush_to(&mut self.gamepad)
    }

    /// Returns both the state and the device to rest.
    pub fn release_all(&mut self) -> Result<(), DeviceOutputError> {
        self.state = GamepadState::default();
        self.gamepad.release_all()
    }
}
