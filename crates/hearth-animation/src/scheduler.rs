//! Interval scheduler driving the single active animation

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, trace};

use crate::Animation;

/// A single-slot interval scheduler for animations
///
/// One dedicated loop thread evaluates the currently-active animation, at
/// most every `interval` and immediately after [`install`] or
/// [`cancel_active`]. The slot holds exactly one animation (the null
/// placeholder by default); installing a new one discards the old without
/// running its completion callback.
///
/// All slot mutation is serialized through one internal mutex, so
/// install/cancel/stop and the tick itself are mutually exclusive. Animation
/// callbacks run on the loop thread while that mutex is held: they must be
/// short, must not block, and must not call back into the scheduler, since
/// the mutex is not reentrant.
///
/// [`install`]: AnimationScheduler::install
/// [`cancel_active`]: AnimationScheduler::cancel_active
pub struct AnimationScheduler {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

struct Shared {
    slot: Mutex<Slot>,
    wake: Condvar,
}

struct Slot {
    active: Animation,
    /// One-shot wake flag; set together with a condvar notify so the loop
    /// re-evaluates immediately instead of waiting out its interval.
    woken: bool,
    want_exit: bool,
}

impl AnimationScheduler {
    /// Start the scheduler loop thread with the given evaluation interval
    ///
    /// The interval bounds staleness between wakes; the timing of a linear
    /// animation is driven by wall-clock elapsed time, not tick count.
    pub fn spawn(interval: Duration) -> Self {
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                active: Animation::null(),
                woken: false,
                want_exit: false,
            }),
            wake: Condvar::new(),
        });

        let loop_shared = shared.clone();
        let handle = thread::Builder::new()
            .name("animation-scheduler".to_string())
            .spawn(move || run_loop(&loop_shared, interval))
            .expect("failed to spawn animation scheduler thread");

        Self {
            shared,
            handle: Some(handle),
        }
    }

    /// Replace the active animation unconditionally
    ///
    /// The previous animation is discarded between ticks; its completion
    /// callback never runs. The loop is woken so the new animation gets its
    /// first tick promptly.
    pub fn install(&self, animation: Animation) {
        let mut slot = self.lock_slot();
        trace!("installing animation, replacing active slot");
        slot.active = animation;
        self.wake_locked(&mut slot);
    }

    /// Replace the active animation with the null placeholder
    pub fn cancel_active(&self) {
        let mut slot = self.lock_slot();
        trace!("cancelling active animation");
        slot.active = Animation::null();
        self.wake_locked(&mut slot);
    }

    /// Whether the active slot currently holds the null placeholder
    pub fn is_idle(&self) -> bool {
        self.lock_slot().active.is_null()
    }

    /// Stop the loop thread and wait for it to exit
    pub fn stop(&mut self) {
        {
            let mut slot = self.lock_slot();
            slot.want_exit = true;
            self.wake_locked(&mut slot);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("animation scheduler stopped");
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        // A poisoning panic can only come from the loop thread, which
        // isolates callback panics itself; recover rather than propagate.
        self.shared
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn wake_locked(&self, slot: &mut Slot) {
        slot.woken = true;
        self.shared.wake.notify_one();
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(shared: &Shared, interval: Duration) {
    let mut slot = shared
        .slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    loop {
        if !slot.woken {
            let (guard, _) = shared
                .wake
                .wait_timeout_while(slot, interval, |slot| !slot.woken)
                .unwrap_or_else(PoisonError::into_inner);
            slot = guard;
        }
        slot.woken = false;

        if slot.want_exit {
            return;
        }

        evaluate(&mut slot);
    }
}

/// Tick the active animation once, demoting it to null when it completes
///
/// A panic escaping a callback is isolated here so one misbehaving animation
/// cannot kill the loop thread.
fn evaluate(slot: &mut Slot) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| slot.active.animate()));
    if outcome.is_err() {
        error!("animation callback panicked; dropping active animation");
        slot.active = Animation::null();
        return;
    }

    if slot.active.is_over() {
        trace!("animation finished; resetting slot to null");
        slot.active = Animation::null();
    }
}
