//! Enter-state reactions driving the actuators

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use hearth_animation::{Animation, AnimationScheduler};
use hearth_devices::DeviceSet;
use hearth_state_machine::NestedStateMachine;

use crate::presets::{daylight, moonlight};

/// Bind the manual preset states to instant bulk commands
///
/// Each `manual:*` state gets an enter listener that snaps the actuators to
/// the preset: everything daylight for `on`/`low`, everything off for `off`,
/// the bed light separated from the rest for `sleep`/`read`.
pub fn bind_preset_states(machine: &mut NestedStateMachine, actuators: &DeviceSet) {
    let all = actuators.clone();
    machine.listen_enter("manual:on", move |_| {
        all.set_power(true).set_color(daylight(1.0));
        true
    });

    let all = actuators.clone();
    machine.listen_enter("manual:low", move |_| {
        all.set_power(true).set_color(daylight(0.0));
        true
    });

    let all = actuators.clone();
    machine.listen_enter("manual:off", move |_| {
        all.set_power(false);
        true
    });

    let all = actuators.clone();
    machine.listen_enter("manual:sleep", move |_| {
        let bed = all.select("#bed");
        bed.set_power(false).set_color(moonlight(0.0));
        (&all - &bed).set_power(true).set_color(moonlight(0.0));
        true
    });

    let all = actuators.clone();
    machine.listen_enter("manual:read", move |_| {
        let bed = all.select("#bed");
        bed.set_power(true).set_color(daylight(1.0));
        (&all - &bed).set_power(true).set_color(daylight(0.0));
        true
    });
}

/// Bind the manual preset states to smooth fades through the scheduler
///
/// Instead of snapping, entering a preset installs a linear animation that
/// walks the brightness into the target over `fade`. Installing over a
/// running fade replaces it; the snapping presets (`manual:off`,
/// `manual:read`) cancel any fade first so it cannot keep ticking over
/// their colors.
pub fn bind_preset_fades(
    machine: &mut NestedStateMachine,
    actuators: &DeviceSet,
    scheduler: Arc<AnimationScheduler>,
    fade: Duration,
) {
    let all = actuators.clone();
    let animator = scheduler.clone();
    machine.listen_enter("manual:on", move |_| {
        all.set_power(true);
        let lights = all.clone();
        animator.install(Animation::linear(
            0.0,
            1.0,
            fade,
            move |brightness| {
                lights.set_color(daylight(brightness));
            },
            || debug!("fade to manual:on complete"),
        ));
        true
    });

    let all = actuators.clone();
    let animator = scheduler.clone();
    machine.listen_enter("manual:low", move |_| {
        all.set_power(true);
        let lights = all.clone();
        animator.install(Animation::linear(
            1.0,
            0.0,
            fade,
            move |brightness| {
                lights.set_color(daylight(brightness));
            },
            || debug!("fade to manual:low complete"),
        ));
        true
    });

    let all = actuators.clone();
    let animator = scheduler.clone();
    machine.listen_enter("manual:off", move |_| {
        animator.cancel_active();
        all.set_power(false);
        true
    });

    let all = actuators.clone();
    let animator = scheduler.clone();
    machine.listen_enter("manual:sleep", move |_| {
        let bed = all.select("#bed");
        bed.set_power(false);
        let rest = &all - &bed;
        rest.set_power(true);
        animator.install(Animation::linear(
            1.0,
            0.0,
            fade,
            move |brightness| {
                rest.set_color(moonlight(brightness));
            },
            || debug!("fade to manual:sleep complete"),
        ));
        true
    });

    let all = actuators.clone();
    let animator = scheduler;
    machine.listen_enter("manual:read", move |_| {
        animator.cancel_active();
        let bed = all.select("#bed");
        bed.set_power(true).set_color(daylight(1.0));
        (&all - &bed).set_power(true).set_color(daylight(0.0));
        true
    });
}
