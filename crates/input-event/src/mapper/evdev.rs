use ::evdev::{AbsoluteAxisType, EventType, InputEvent, Key};

use crate::{
    mapper::error::EventMappingError, AxisChannel, Button, EventKind, HatAxis, RawInputEvent,
    Stick, StickAxis, Trigger,
};

impl TryFrom<InputEvent> for RawInputEvent {
    type Error = EventMappingError;

    fn try_from(value: InputEvent) -> Result<Self, Self::Error> {
        let kind = match value.event_type() {
            EventType::KEY => EventKind::Key,
            EventType::ABSOLUTE => EventKind::Axis,
            other => return Err(EventMappingError::UnsupportedEvent(other.0)),
        };
        Ok(RawInputEvent::new(kind, value.code(), value.value()))
    }
}

impl From<RawInputEvent> for InputEvent {
    fn from(value: RawInputEvent) -> Self {
        InputEvent::new(EventType(value.kind.into()), value.code, value.value)
    }
}

impl From<Button> for Key {
    fn from(value: Button) -> Self {
        match value {
            Button::A => Key::BTN_SOUTH,
            Button::B => Key::BTN_EAST,
            Button::X => Key::BTN_NORTH,
            Button::Y => Key::BTN_WEST,
            Button::LeftShoulder => Key::BTN_TL,
            Button::RightShoulder => Key::BTN_TR,
            Button::LeftThumb => Key::BTN_THUMBL,
            Button::RightThumb => Key::BTN_THUMBR,
            Button::Start => Key::BTN_START,
            Button::Select => Key::BTN_SELECT,
            Button::DPadUp => Key::BTN_DPAD_UP,
            Button::DPadDown => Key::BTN_DPAD_DOWN,
            Button::DPadLeft => Key::BTN_DPAD_LEFT,
            Button::DPadRight => Key::BTN_DPAD_RIGHT,
        }
    }
}

impl From<AxisChannel> for AbsoluteAxisType {
    fn from(value: AxisChannel) -> Self {
        match value {
            AxisChannel::Stick(Stick::Left, StickAxis::X) => AbsoluteAxisType::ABS_X,
            AxisChannel::Stick(Stick::Left, StickAxis::Y) => AbsoluteAxisType::ABS_Y,
            AxisChannel::Stick(Stick::Right, StickAxis::X) => AbsoluteAxisType::ABS_RX,
            AxisChannel::Stick(Stick::Right, StickAxis::Y) => AbsoluteAxisType::ABS_RY,
            AxisChannel::Trigger(Trigger::Left) => AbsoluteAxisType::ABS_Z,
            AxisChannel::Trigger(Trigger::Right) => AbsoluteAxisType::ABS_RZ,
            AxisChannel::Hat(HatAxis::Horizontal) => AbsoluteAxisType::ABS_HAT0X,
            AxisChannel::Hat(HatAxis::Vertical) => AbsoluteAxisType::ABS_HAT0Y,
        }
    }
}
