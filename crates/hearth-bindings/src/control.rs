//! Textual control surface over the state machine
//!
//! The surrounding control plane (a virtual filesystem in the original hub)
//! only ever sees strings: a composite read of the current state plus every
//! valid option, and a write accepting a trimmed token. Unrecognized tokens
//! are silently ignored, never errors.

use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, info};

use hearth_property_store::{PropertyStore, ROOT_PATH};

use crate::SharedStateMachine;

/// Top-level property the user-control listeners publish to
pub const USER_CONTROL_KEY: &str = "user_control";

/// The preset tokens accepted as bare aliases for `manual:*` states
const PRESET_TOKENS: [&str; 5] = ["on", "low", "off", "sleep", "read"];

/// Textual read/write access to the state machine
pub struct ControlSurface {
    machine: SharedStateMachine,
}

impl ControlSurface {
    pub fn new(machine: SharedStateMachine) -> Self {
        Self { machine }
    }

    /// Render the current composite state
    ///
    /// The current `"category:subcategory"` string, then `Options:`, then
    /// every valid state sorted, one per line, tab-prefixed, with a trailing
    /// newline.
    pub fn read(&self) -> String {
        let machine = self.machine.lock().expect("state machine mutex poisoned");
        let mut lines = vec![machine.current_string(), "Options:".to_string()];
        let mut options: Vec<String> = machine
            .all_states()
            .into_iter()
            .map(|state| format!("\t{state}"))
            .collect();
        options.sort();
        lines.extend(options);
        lines.join("\n") + "\n"
    }

    /// Accept a control token and forward it as an unguarded transition
    ///
    /// The token is trimmed. A valid `"category:subcategory"` string goes to
    /// the machine directly; a bare preset token (`on`, `low`, ...) is
    /// aliased to `manual:<token>`. Anything else is silently ignored.
    /// Returns whether a transition was performed.
    pub fn write(&self, token: &str) -> bool {
        let token = token.trim();
        let Some(target) = self.resolve(token) else {
            debug!(token = %token, "ignoring unrecognized control token");
            return false;
        };
        info!(token = %token, to = %target, "control write");
        let mut machine = self.machine.lock().expect("state machine mutex poisoned");
        machine.change_user_state(&target)
    }

    fn resolve(&self, token: &str) -> Option<String> {
        let machine = self.machine.lock().expect("state machine mutex poisoned");
        if let Ok(state) = token.parse() {
            if machine.is_valid(&state) {
                return Some(token.to_string());
            }
            return None;
        }
        let aliased = format!("manual:{token}");
        aliased
            .parse()
            .ok()
            .filter(|state| machine.is_valid(state))
            .map(|_| aliased)
    }
}

/// Binding-owned current lighting preset
///
/// The original hub kept this as a mutable variable captured by reference in
/// module-level closures; here the surface owns the value explicitly.
pub struct LightingPreset {
    surface: ControlSurface,
    current: Mutex<String>,
}

impl LightingPreset {
    pub fn new(machine: SharedStateMachine) -> Self {
        Self {
            surface: ControlSurface::new(machine),
            current: Mutex::new("unset".to_string()),
        }
    }

    /// Render the current preset and the accepted tokens
    pub fn read(&self) -> String {
        format!(
            "Current value: {} -- possible values: {}",
            self.current.lock().expect("preset mutex poisoned"),
            PRESET_TOKENS.join(", ")
        )
    }

    /// Accept a bare preset token; unknown tokens are silently ignored
    pub fn write(&self, token: &str) {
        let token = token.trim();
        if !PRESET_TOKENS.contains(&token) {
            debug!(token = %token, "ignoring unknown lighting preset");
            return;
        }
        self.surface.write(token);
        *self.current.lock().expect("preset mutex poisoned") = token.to_string();
    }

    /// The currently-selected preset token
    pub fn current(&self) -> String {
        self.current.lock().expect("preset mutex poisoned").clone()
    }
}

/// Drive unguarded transitions from the top-level `user_control` property
///
/// Inbound listener nodes publish command strings there; every touch is
/// forwarded to the machine as a user transition.
pub fn forward_user_control(store: &PropertyStore, machine: SharedStateMachine) {
    let surface = ControlSurface::new(machine);
    store.listen(ROOT_PATH, USER_CONTROL_KEY, move |value: &Value| {
        if let Some(token) = value.as_str() {
            surface.write(token);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hearth_core::StateRegistry;
    use hearth_state_machine::NestedStateMachine;
    use serde_json::json;

    fn machine(initial: &str) -> SharedStateMachine {
        let registry = StateRegistry::from_categories([
            ("auto", vec!["daytime", "sleep"]),
            ("manual", vec!["on", "low", "off", "sleep", "read"]),
        ]);
        Arc::new(Mutex::new(
            NestedStateMachine::new(initial, registry, "manual").unwrap(),
        ))
    }

    #[test]
    fn test_read_lists_current_then_sorted_options() {
        let surface = ControlSurface::new(machine("auto:daytime"));
        let text = surface.read();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "auto:daytime");
        assert_eq!(lines[1], "Options:");
        assert_eq!(lines.len(), 9);
        let options: Vec<&str> = lines[2..].to_vec();
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(options, sorted);
        assert!(options.contains(&"\tmanual:read"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_write_forwards_valid_state() {
        let machine = machine("auto:daytime");
        let surface = ControlSurface::new(machine.clone());
        assert!(surface.write("manual:on"));
        assert_eq!(machine.lock().unwrap().current_string(), "manual:on");
    }

    #[test]
    fn test_write_trims_token() {
        let machine = machine("auto:daytime");
        let surface = ControlSurface::new(machine.clone());
        assert!(surface.write("  manual:sleep\n"));
        assert_eq!(machine.lock().unwrap().current_string(), "manual:sleep");
    }

    #[test]
    fn test_write_aliases_bare_preset_token() {
        let machine = machine("auto:daytime");
        let surface = ControlSurface::new(machine.clone());
        assert!(surface.write("read"));
        assert_eq!(machine.lock().unwrap().current_string(), "manual:read");
    }

    #[test]
    fn test_write_ignores_unknown_tokens() {
        let machine = machine("auto:daytime");
        let surface = ControlSurface::new(machine.clone());
        assert!(!surface.write("party"));
        assert!(!surface.write("vacation:on"));
        assert!(!surface.write(""));
        assert_eq!(machine.lock().unwrap().current_string(), "auto:daytime");
    }

    #[test]
    fn test_write_bypasses_sticky_guard() {
        let machine = machine("manual:on");
        let surface = ControlSurface::new(machine.clone());
        assert!(surface.write("auto:sleep"));
        assert_eq!(machine.lock().unwrap().current_string(), "auto:sleep");
    }

    #[test]
    fn test_lighting_preset_tracks_current() {
        let machine = machine("auto:daytime");
        let preset = LightingPreset::new(machine.clone());
        assert_eq!(preset.current(), "unset");
        assert!(preset.read().starts_with("Current value: unset"));

        preset.write(" sleep ");
        assert_eq!(preset.current(), "sleep");
        assert_eq!(machine.lock().unwrap().current_string(), "manual:sleep");

        preset.write("party");
        assert_eq!(preset.current(), "sleep");
    }

    #[test]
    fn test_forward_user_control() {
        let machine = machine("auto:daytime");
        let store = PropertyStore::new();
        forward_user_control(&store, machine.clone());

        store
            .set(ROOT_PATH, USER_CONTROL_KEY, json!("manual:low"))
            .unwrap();
        assert_eq!(machine.lock().unwrap().current_string(), "manual:low");

        // Non-string and unrecognized values are ignored.
        store.set(ROOT_PATH, USER_CONTROL_KEY, json!(42)).unwrap();
        store
            .set(ROOT_PATH, USER_CONTROL_KEY, json!("nonsense"))
            .unwrap();
        assert_eq!(machine.lock().unwrap().current_string(), "manual:low");
    }
}
