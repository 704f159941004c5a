//! Rescaling of raw hardware values into the ranges the virtual gamepad
//! expects.

pub const AXIS_RAW_MAX: f64 = 32767.0;
pub const TRIGGER_RAW_MAX: f64 = 1023.0;
pub const TRIGGER_MAX: f64 = 255.0;

/// Maps a signed 16-bit stick reading onto `[-1.0, 1.0]`.
///
/// `-32768` would land just below `-1.0` and is clamped rather than wrapped.
pub fn normalize_axis(value: i32) -> f32 {
    (f64::from(value) / AXIS_RAW_MAX).clamp(-1.0, 1.0) as f32
}

/// Maps a `[0, 1023]` trigger reading onto `[0, 255]`, rounding to nearest.
pub fn normalize_trigger(value: i32) -> u8 {
    (f64::from(value) / TRIGGER_RAW_MAX * TRIGGER_MAX)
        .round()
        .clamp(0.0, TRIGGER_MAX) as u8
}
