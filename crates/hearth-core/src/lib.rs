//! Core types for the hearth control kernel
//!
//! This crate provides the fundamental value types used throughout hearth:
//! NestedState, StateRegistry, StateEvent, and the Bhs color triple.

mod color;
mod event;
mod nested_state;
mod registry;

pub use color::Bhs;
pub use event::StateEvent;
pub use nested_state::{NestedState, NestedStateError};
pub use registry::StateRegistry;

/// Delimiter between the category and subcategory of a state string
pub const STATE_DELIMITER: char = ':';
