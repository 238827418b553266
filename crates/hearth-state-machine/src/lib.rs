//! Sticky-category nested state machine for the hearth control kernel
//!
//! This crate provides the NestedStateMachine, the synchronous heart of the
//! hub. It tracks the current `"category:subcategory"` state, validates
//! transitions against a fixed StateRegistry, enforces the sticky-category
//! rule, and dispatches exit/enter listeners registered against exact state
//! strings. Dispatch runs inline on whatever thread initiated the transition,
//! so listeners must not block.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};

use hearth_core::{NestedState, StateEvent, StateRegistry};

/// Error type for state machine construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("initial state {0:?} is malformed")]
    MalformedInitialState(String),

    #[error("initial state {0:?} is not in the registry")]
    InvalidInitialState(String),
}

/// A state transition listener
///
/// Returning `false` from an exit listener vetoes the transition; returning
/// `false` from an enter listener is reported in the transition result but
/// does not undo the state change.
pub type Listener = Box<dyn FnMut(&StateEvent) -> bool + Send>;

/// Outcome of the shared switch procedure
///
/// `changed` and `enter_ok` are deliberately separate: a transition can
/// mutate the state and still report listener failure. The public boolean
/// returned by the transition entry points is their conjunction.
#[derive(Debug, Clone, Copy)]
struct SwitchOutcome {
    changed: bool,
    enter_ok: bool,
}

impl SwitchOutcome {
    fn as_bool(self) -> bool {
        self.changed && self.enter_ok
    }
}

/// A two-level state machine with one "sticky" category
///
/// Once the current category equals the sticky category, guarded transitions
/// (`change_state`) to a different category are rejected. Unguarded
/// transitions (`change_user_state`) bypass that rule and the same-state
/// no-op check; both entry points validate the target against the registry.
///
/// Listeners are keyed by exact state string and invoked in registration
/// order. Dispatch never short-circuits: every listener for a state runs on
/// every transition through it, and the aggregate is false if any returned
/// false.
pub struct NestedStateMachine {
    state: NestedState,
    registry: StateRegistry,
    sticky_category: String,
    enter_listeners: HashMap<String, Vec<Listener>>,
    exit_listeners: HashMap<String, Vec<Listener>>,
}

impl std::fmt::Debug for NestedStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestedStateMachine")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("sticky_category", &self.sticky_category)
            .finish_non_exhaustive()
    }
}

impl NestedStateMachine {
    /// Create a machine in the given initial state
    ///
    /// Fails if the initial state is malformed or not a member of the
    /// registry.
    pub fn new(
        initial: &str,
        registry: StateRegistry,
        sticky_category: impl Into<String>,
    ) -> Result<Self, StateError> {
        let state: NestedState = initial
            .parse()
            .map_err(|_| StateError::MalformedInitialState(initial.to_string()))?;
        if !registry.contains(&state) {
            return Err(StateError::InvalidInitialState(initial.to_string()));
        }

        Ok(Self {
            state,
            registry,
            sticky_category: sticky_category.into(),
            enter_listeners: HashMap::new(),
            exit_listeners: HashMap::new(),
        })
    }

    /// The current state
    pub fn current(&self) -> &NestedState {
        &self.state
    }

    /// The current state as a `"category:subcategory"` string
    pub fn current_string(&self) -> String {
        self.state.to_string()
    }

    /// Every valid `"category:subcategory"` string
    pub fn all_states(&self) -> Vec<String> {
        self.registry.all_states()
    }

    /// Check whether a state is a member of the registry
    pub fn is_valid(&self, state: &NestedState) -> bool {
        self.registry.contains(state)
    }

    /// Register a listener invoked when entering the exact given state
    ///
    /// # Panics
    ///
    /// Panics if `state` is malformed or not a member of the registry;
    /// listening on an unknown state is a programmer error.
    pub fn listen_enter(
        &mut self,
        state: &str,
        listener: impl FnMut(&StateEvent) -> bool + Send + 'static,
    ) {
        let state = self.require_registered(state);
        debug!(state = %state, "listening for enter-state");
        self.enter_listeners
            .entry(state)
            .or_default()
            .push(Box::new(listener));
    }

    /// Register a listener invoked when leaving the exact given state
    ///
    /// # Panics
    ///
    /// Panics if `state` is malformed or not a member of the registry.
    pub fn listen_exit(
        &mut self,
        state: &str,
        listener: impl FnMut(&StateEvent) -> bool + Send + 'static,
    ) {
        let state = self.require_registered(state);
        debug!(state = %state, "listening for exit-state");
        self.exit_listeners
            .entry(state)
            .or_default()
            .push(Box::new(listener));
    }

    /// Guarded transition: rejects same-state no-ops and transitions that
    /// would leave the sticky category
    ///
    /// Returns true only if the state changed and every enter listener for
    /// the new state reported success.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a well-formed `"category:subcategory"`
    /// string. An out-of-registry target is rejected with `false` instead.
    pub fn change_state(&mut self, target: &str) -> bool {
        let new_state = parse_target(target);
        if !self.registry.contains(&new_state) {
            warn!(to = %new_state, "rejecting transition to unregistered state");
            return false;
        }
        if self.state == new_state {
            info!(state = %new_state, "skipping transition: same state");
            return false;
        }
        if self.state.category() == self.sticky_category
            && new_state.category() != self.sticky_category
        {
            info!(
                prior = %self.state,
                to = %new_state,
                sticky = %self.sticky_category,
                "skipping transition: would leave sticky category"
            );
            return false;
        }
        debug!(prior = %self.state, to = %new_state, "guarded transition accepted");
        self.switch_state(new_state).as_bool()
    }

    /// Unguarded transition: bypasses the sticky guard and the same-state
    /// no-op check
    ///
    /// The target must still be a member of the registry; invalid states
    /// stay unreachable through every entry point.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a well-formed `"category:subcategory"`
    /// string.
    pub fn change_user_state(&mut self, target: &str) -> bool {
        let new_state = parse_target(target);
        if !self.registry.contains(&new_state) {
            warn!(to = %new_state, "rejecting user transition to unregistered state");
            return false;
        }
        debug!(prior = %self.state, to = %new_state, "user transition accepted");
        self.switch_state(new_state).as_bool()
    }

    /// The shared switch procedure
    ///
    /// Dispatches exit listeners for the prior state; any veto aborts with
    /// the state unchanged. Otherwise mutates the state and dispatches enter
    /// listeners for the new state.
    fn switch_state(&mut self, new_state: NestedState) -> SwitchOutcome {
        info!(prior = %self.state, new = %new_state, "switching state");
        let event = StateEvent::new(self.state.clone(), new_state.clone());

        let exit_ok = dispatch(self.exit_listeners.get_mut(&self.state.to_string()), &event);
        if !exit_ok {
            info!(
                prior = %self.state,
                new = %new_state,
                "aborted state change: exit listener vetoed"
            );
            return SwitchOutcome {
                changed: false,
                enter_ok: false,
            };
        }

        self.state = new_state;

        let enter_ok = dispatch(self.enter_listeners.get_mut(&self.state.to_string()), &event);
        if !enter_ok {
            warn!(state = %self.state, "enter listener reported failure after state change");
        }
        SwitchOutcome {
            changed: true,
            enter_ok,
        }
    }

    fn require_registered(&self, state: &str) -> String {
        let parsed = parse_target(state);
        assert!(
            self.registry.contains(&parsed),
            "cannot listen on unregistered state {state:?}"
        );
        parsed.to_string()
    }
}

fn parse_target(target: &str) -> NestedState {
    target
        .parse()
        .unwrap_or_else(|err| panic!("malformed state string {target:?}: {err}"))
}

/// Invoke every listener in registration order; false if any returned false
///
/// All listeners are called regardless of earlier results.
fn dispatch(listeners: Option<&mut Vec<Listener>>, event: &StateEvent) -> bool {
    let Some(listeners) = listeners else {
        return true;
    };
    let mut all_ok = true;
    for listener in listeners.iter_mut() {
        if !listener(event) {
            all_ok = false;
        }
    }
    all_ok
}
