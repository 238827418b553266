//! Device-set abstraction for bulk actuator commands
//!
//! The kernel never talks to vendor hardware directly: bindings issue bulk
//! commands against a [`DeviceSet`], and [`Device`] implementations (vendor
//! light drivers, test fakes) carry them out. Selection is tag-based
//! (`"#bed"`) or by exact name; subsets support set difference so bindings
//! can address "the bed light" and "everything else" separately.

mod device_set;
mod event;

pub use device_set::{Device, DeviceSet};
pub use event::{EventSource, SensorEvent};

use hearth_core::Bhs;

/// A bulk-assignable device property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// On/off flag
    Power(bool),
    /// Brightness/hue/saturation triple
    Color(Bhs),
}
