//! Transition event snapshot passed to state listeners

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::NestedState;

/// An immutable (prior, new) snapshot of a state transition
///
/// Built once per switch attempt and handed to every exit and enter listener
/// for that transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEvent {
    /// The state the machine is leaving
    pub prior: NestedState,

    /// The state the machine is entering
    pub new: NestedState,

    /// When the transition was initiated
    pub time_fired: DateTime<Utc>,
}

impl StateEvent {
    pub fn new(prior: NestedState, new: NestedState) -> Self {
        Self {
            prior,
            new,
            time_fired: Utc::now(),
        }
    }
}

impl fmt::Display for StateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateEvent({} -> {})", self.prior, self.new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let event = StateEvent::new(
            "manual:on".parse().unwrap(),
            "auto:daytime".parse().unwrap(),
        );
        assert_eq!(event.to_string(), "StateEvent(manual:on -> auto:daytime)");
    }
}
