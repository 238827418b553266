//! Transport-decoupled inbound sensor/control events

use std::fmt;

/// An event delivered by a sensor or user-control source
///
/// Carries a named measurement or command value; the transport that produced
/// it (network node, local GPIO, test harness) is invisible to consumers.
#[derive(Debug, Clone)]
pub struct SensorEvent {
    /// The measurement or command name, e.g. `"motion"` or `"user_control"`
    pub name: String,
    /// The event payload
    pub value: serde_json::Value,
}

impl SensorEvent {
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for SensorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Something that produces inbound events
///
/// The kernel only requires "register a handler invoked with an event
/// value"; delivery threading and transport are the implementation's
/// business.
pub trait EventSource {
    fn subscribe(&mut self, handler: Box<dyn FnMut(&SensorEvent) + Send>);
}
