//! Animations and the interval-driven animation scheduler
//!
//! An [`Animation`] describes one time-bounded or indefinite transition: a
//! no-op placeholder, a polled callback, or a linear interpolation between
//! two values over a wall-clock duration. The [`AnimationScheduler`] owns at
//! most one active animation and evaluates it on a dedicated loop thread,
//! either periodically or immediately after install/cancel.

mod animation;
mod lerp;
mod scheduler;

pub use animation::Animation;
pub use lerp::Lerp;
pub use scheduler::AnimationScheduler;
