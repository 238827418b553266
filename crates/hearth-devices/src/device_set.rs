//! Device trait and tag-selectable device sets

use std::ops::Sub;
use std::sync::Arc;

use tracing::{debug, trace};

use hearth_core::Bhs;

use crate::Command;

/// An addressable actuator
///
/// Implementations handle any hardware errors internally; applying a command
/// cannot fail from the kernel's point of view.
pub trait Device: Send + Sync {
    /// Unique device name, e.g. `"hue-bedroom-bed"`
    fn name(&self) -> &str;

    /// Selection tags carried by this device, without the `#` prefix
    fn tags(&self) -> &[String];

    /// Apply one command to the physical device
    fn apply(&self, command: &Command);
}

/// An ordered set of devices supporting selection and bulk commands
///
/// Cheap to clone; members are shared handles. Bulk setters return `&Self`
/// so command sequences chain.
#[derive(Clone, Default)]
pub struct DeviceSet {
    devices: Vec<Arc<dyn Device>>,
}

impl DeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device, returning the shared handle for further wiring
    pub fn add(&mut self, device: Arc<dyn Device>) -> Arc<dyn Device> {
        debug!(device = device.name(), "adding device to set");
        self.devices.push(device.clone());
        device
    }

    /// Select a subset of devices
    ///
    /// A selector starting with `#` matches every device carrying that tag;
    /// anything else matches by exact name.
    pub fn select(&self, selector: &str) -> DeviceSet {
        let devices = match selector.strip_prefix('#') {
            Some(tag) => self
                .devices
                .iter()
                .filter(|device| device.tags().iter().any(|t| t == tag))
                .cloned()
                .collect(),
            None => self
                .devices
                .iter()
                .filter(|device| device.name() == selector)
                .cloned()
                .collect(),
        };
        DeviceSet { devices }
    }

    /// Apply an on/off flag to every member
    pub fn set_power(&self, on: bool) -> &Self {
        self.apply(&Command::Power(on))
    }

    /// Apply a color triple to every member
    pub fn set_color(&self, bhs: Bhs) -> &Self {
        self.apply(&Command::Color(bhs))
    }

    /// Apply an arbitrary command to every member
    pub fn apply(&self, command: &Command) -> &Self {
        for device in &self.devices {
            trace!(device = device.name(), ?command, "applying command");
            device.apply(command);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Device>> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Set difference by device name
impl Sub<&DeviceSet> for &DeviceSet {
    type Output = DeviceSet;

    fn sub(self, other: &DeviceSet) -> DeviceSet {
        let devices = self
            .devices
            .iter()
            .filter(|device| !other.devices.iter().any(|d| d.name() == device.name()))
            .cloned()
            .collect();
        DeviceSet { devices }
    }
}
