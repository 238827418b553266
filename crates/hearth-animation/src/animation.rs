//! Animation variants: null, callback-polled, and linear interpolation

use std::time::{Duration, Instant};

use crate::Lerp;

/// A single time-bounded or indefinite transition
///
/// Every variant exposes [`animate`](Animation::animate), one evaluation
/// step, and [`is_over`](Animation::is_over). Animations carry no threading
/// of their own; the scheduler drives them.
pub struct Animation {
    kind: Kind,
}

enum Kind {
    /// Placeholder occupying the scheduler's active slot; never over.
    Null,
    /// Polls a predicate; over iff a call returns `false`.
    Callback {
        predicate: Box<dyn FnMut() -> bool + Send>,
        over: bool,
    },
    /// Interpolates between two values over a wall-clock duration.
    Linear {
        driver: Box<dyn Step + Send>,
        over: bool,
    },
}

impl Animation {
    /// An animation that does nothing and never reports itself over
    ///
    /// Only removed from the scheduler by external replacement.
    pub fn null() -> Self {
        Self { kind: Kind::Null }
    }

    /// An animation that re-invokes `predicate` on every tick until it
    /// returns `false`
    pub fn callback(predicate: impl FnMut() -> bool + Send + 'static) -> Self {
        Self {
            kind: Kind::Callback {
                predicate: Box::new(predicate),
                over: false,
            },
        }
    }

    /// A linear interpolation from `start` to `end` over `duration`
    ///
    /// Each tick calls `on_tick` with the current interpolated value. Once
    /// the wall-clock elapsed time reaches `duration`, the final tick
    /// delivers the exact `end` value (never an extrapolation), the
    /// animation marks itself over, and `on_finish` runs exactly once. The
    /// clock starts at construction, not at the first tick.
    pub fn linear<V>(
        start: V,
        end: V,
        duration: Duration,
        on_tick: impl FnMut(V) + Send + 'static,
        on_finish: impl FnOnce() + Send + 'static,
    ) -> Self
    where
        V: Lerp + Send + 'static,
    {
        Self {
            kind: Kind::Linear {
                driver: Box::new(LinearDriver {
                    start,
                    end,
                    started: Instant::now(),
                    duration,
                    on_tick: Box::new(on_tick),
                    on_finish: Some(Box::new(on_finish)),
                }),
                over: false,
            },
        }
    }

    /// Perform one evaluation step
    pub fn animate(&mut self) {
        match &mut self.kind {
            Kind::Null => {}
            Kind::Callback { predicate, over } => {
                *over = !predicate();
            }
            Kind::Linear { driver, over } => {
                if !*over {
                    *over = driver.step();
                }
            }
        }
    }

    /// Whether this animation has run to completion
    pub fn is_over(&self) -> bool {
        match &self.kind {
            Kind::Null => false,
            Kind::Callback { over, .. } | Kind::Linear { over, .. } => *over,
        }
    }

    /// Whether this is the null placeholder
    pub fn is_null(&self) -> bool {
        matches!(self.kind, Kind::Null)
    }
}

/// One type-erased interpolation step; returns true when finished
trait Step {
    fn step(&mut self) -> bool;
}

struct LinearDriver<V: Lerp> {
    start: V,
    end: V,
    started: Instant,
    duration: Duration,
    on_tick: Box<dyn FnMut(V) + Send>,
    on_finish: Option<Box<dyn FnOnce() + Send>>,
}

impl<V: Lerp> Step for LinearDriver<V> {
    fn step(&mut self) -> bool {
        let elapsed = self.started.elapsed();
        if elapsed >= self.duration {
            (self.on_tick)(self.end);
            if let Some(on_finish) = self.on_finish.take() {
                on_finish();
            }
            return true;
        }

        let fraction = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.on_tick)(self.start.lerp(self.end, fraction));
        false
    }
}
