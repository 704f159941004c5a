use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::mapper::error::EventMappingError;

pub mod mapper;

pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

/// One captured input event as it travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl RawInputEvent {
    pub fn new(kind: EventKind, code: u16, value: i32) -> Self {
        RawInputEvent { kind, code, value }
    }

    pub fn key(code: u16, value: i32) -> Self {
        Self::new(EventKind::Key, code, value)
    }

    pub fn axis(code: u16, value: i32) -> Self {
        Self::new(EventKind::Axis, code, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(from = "u16", into = "u16")]
pub enum EventKind {
    Key,
    Axis,
    Other(u16),
}

impl From<u16> for EventKind {
    fn from(value: u16) -> Self {
        match value {
            EV_KEY => EventKind::Key,
            EV_ABS => EventKind::Axis,
            other => EventKind::Other(other),
        }
    }
}

impl From<EventKind> for u16 {
    fn from(value: EventKind) -> Self {
        match value {
            EventKind::Key => EV_KEY,
            EventKind::Axis => EV_ABS,
            EventKind::Other(other) => other,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    LeftThumb,
    RightThumb,
    Start,
    Select,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    /// Looks up a physical key code. D-pad directions have no key code and
    /// are only reachable through the hat axes.
    pub fn from_code(code: u16) -> Option<Button> {
        let button = match code {
            304 => Button::A,
            305 => Button::B,
            307 => Button::X,
            308 => Button::Y,
            310 => Button::LeftShoulder,
            311 => Button::RightShoulder,
            314 => Button::Select,
            315 => Button::Start,
            317 => Button::LeftThumb,
            318 => Button::RightThumb,
            _ => return None,
        };
        Some(button)
    }

    pub fn code(self) -> Option<u16> {
        let code = match self {
            Button::A => 304,
            Button::B => 305,
            Button::X => 307,
            Button::Y => 308,
            Button::LeftShoulder => 310,
            Button::RightShoulder => 311,
            Button::Select => 314,
            Button::Start => 315,
            Button::LeftThumb => 317,
            Button::RightThumb => 318,
            Button::DPadUp | Button::DPadDown | Button::DPadLeft | Button::DPadRight => {
                return None
            }
        };
        Some(code)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Stick {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StickAxis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Trigger {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum HatAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum AxisChannel {
    Stick(Stick, StickAxis),
    Trigger(Trigger),
    Hat(HatAxis),
}

impl AxisChannel {
    pub fn from_code(code: u16) -> Option<AxisChannel> {
        let channel = match code {
            0 => AxisChannel::Stick(Stick::Left, StickAxis::X),
            1 => AxisChannel::Stick(Stick::Left, StickAxis::Y),
            2 => AxisChannel::Trigger(Trigger::Left),
            3 => AxisChannel::Stick(Stick::Right, StickAxis::X),
            4 => AxisChannel::Stick(Stick::Right, StickAxis::Y),
            5 => AxisChannel::Trigger(Trigger::Right),
            16 => AxisChannel::Hat(HatAxis::Horizontal),
            17 => AxisChannel::Hat(HatAxis::Vertical),
            _ => return None,
        };
        Some(channel)
    }

    pub fn code(self) -> u16 {
        match self {
            AxisChannel::Stick(Stick::Left, StickAxis::X) => 0,
            AxisChannel::Stick(Stick::Left, StickAxis::Y) => 1,
            AxisChannel::Trigger(Trigger::Left) => 2,
            AxisChannel::Stick(Stick::Right, StickAxis::X) => 3,
            AxisChannel::Stick(Stick::Right, StickAxis::Y) => 4,
            AxisChannel::Trigger(Trigger::Right) => 5,
            AxisChannel::Hat(HatAxis::Horizontal) => 16,
            AxisChannel::Hat(HatAxis::Vertical) => 17,
        }
    }
}

/// A wire event resolved against the channel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GamepadEvent {
    Button { button: Button, pressed: bool },
    Stick { stick: Stick, axis: StickAxis, value: i32 },
    Trigger { trigger: Trigger, value: i32 },
    Hat { axis: HatAxis, value: i32 },
}

impl TryFrom<RawInputEvent> for GamepadEvent {
    type Error = EventMappingError;

    fn try_from(event: RawInputEvent) -> Result<Self, Self::Error> {
        match event.kind {
            EventKind::Key => {
                let button = Button::from_code(event.code)
                    .ok_or(EventMappingError::UnmappedChannel(event.kind, event.code))?;
                Ok(GamepadEvent::Button {
                    button,
                    pressed: event.value != 0,
                })
            }
            EventKind::Axis => {
                let channel = AxisChannel::from_code(event.code)
                    .ok_or(EventMappingError::UnmappedChannel(event.kind, event.code))?;
                Ok(match channel {
                    AxisChannel::Stick(stick, axis) => GamepadEvent::Stick {
                        stick,
                        axis,
                        value: event.value,
                    },
                    AxisChannel::Trigger(trigger) => GamepadEvent::Trigger {
                        trigger,
                        value: event.value,
                    },
                    AxisChannel::Hat(axis) => GamepadEvent::Hat {
                        axis,
                        value: event.value,
                    },
                })
            }
            EventKind::Other(kind) => Err(EventMappingError::UnsupportedEvent(kind)),
        }
    }
}
