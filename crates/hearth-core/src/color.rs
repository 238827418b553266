//! Brightness/hue/saturation color triple for light commands

use std::fmt;

use serde::{Deserialize, Serialize};

/// A brightness/hue/saturation command value
///
/// Channel ranges follow the actuator convention: brightness and saturation
/// are 0-255, hue is 0-65535. This is the only color model the kernel speaks;
/// conversion to vendor color spaces happens in the drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bhs {
    pub brightness: u8,
    pub hue: u16,
    pub saturation: u8,
}

impl Bhs {
    pub fn new(brightness: u8, hue: u16, saturation: u8) -> Self {
        Self {
            brightness,
            hue,
            saturation,
        }
    }
}

impl fmt::Display for Bhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bhs({}, {}, {})",
            self.brightness, self.hue, self.saturation
        )
    }
}
