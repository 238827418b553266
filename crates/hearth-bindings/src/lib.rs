//! Preset reactions and the textual control surface
//!
//! This crate is the glue between the state machine and the physical world:
//! enter listeners that issue bulk light commands (snapping or fading through
//! the animation scheduler), the daylight/moonlight preset functions, and the
//! small textual surface the surrounding control plane reads and writes.

mod control;
mod presets;
mod reactions;

pub use control::{forward_user_control, ControlSurface, LightingPreset, USER_CONTROL_KEY};
pub use presets::{daylight, moonlight};
pub use reactions::{bind_preset_fades, bind_preset_states};

use std::sync::{Arc, Mutex};

use hearth_state_machine::NestedStateMachine;

/// The state machine handle shared between bindings and the control surface
///
/// Transitions and listener dispatch run under this mutex, on the thread
/// that initiated the transition.
pub type SharedStateMachine = Arc<Mutex<NestedStateMachine>>;
