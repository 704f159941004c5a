pub mod error;

#[cfg(target_os = "linux")]
pub mod evdev;
