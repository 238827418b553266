//! End-to-end wiring of the control kernel: config -> machine -> bindings ->
//! scheduler -> devices, driven through the property store and the textual
//! control surface.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use hearth_animation::AnimationScheduler;
use hearth_bindings::{
    bind_preset_fades, bind_preset_states, daylight, forward_user_control, ControlSurface,
    SharedStateMachine, USER_CONTROL_KEY,
};
use hearth_config::HubConfig;
use hearth_core::Bhs;
use hearth_devices::{Command, Device, DeviceSet};
use hearth_property_store::{PropertyStore, ROOT_PATH};
use hearth_state_machine::NestedStateMachine;

const CONFIG_YAML: &str = r#"
states:
  auto: [wakeup, daytime, bedtime, sleep]
  manual: [on, low, off, sleep, read]
sticky_category: manual
initial_state: "auto:daytime"
tick_interval_ms: 5
fade_ms: 30
"#;

struct FakeLight {
    name: String,
    tags: Vec<String>,
    commands: Mutex<Vec<Command>>,
}

impl FakeLight {
    fn new(name: &str, tags: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            commands: Mutex::new(Vec::new()),
        })
    }

    fn last_color(&self) -> Option<Bhs> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|command| match command {
                Command::Color(bhs) => Some(*bhs),
                Command::Power(_) => None,
            })
    }

    fn powered_on(&self) -> Option<bool> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|command| match command {
                Command::Power(on) => Some(*on),
                Command::Color(_) => None,
            })
    }
}

impl Device for FakeLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn apply(&self, command: &Command) {
        self.commands.lock().unwrap().push(*command);
    }
}

struct Hub {
    machine: SharedStateMachine,
    store: PropertyStore,
    bed: Arc<FakeLight>,
    desk: Arc<FakeLight>,
}

fn build_hub(fades: bool) -> (Hub, Arc<AnimationScheduler>) {
    let config = HubConfig::from_yaml(CONFIG_YAML).unwrap();
    let mut machine = NestedStateMachine::new(
        &config.initial_state,
        config.registry(),
        config.sticky_category.clone(),
    )
    .unwrap();

    let bed = FakeLight::new("hue-bedroom-bed", &["bed"]);
    let desk = FakeLight::new("hue-bedroom-desk", &["desk"]);
    let mut actuators = DeviceSet::new();
    actuators.add(bed.clone());
    actuators.add(desk.clone());

    let scheduler = Arc::new(AnimationScheduler::spawn(config.tick_interval()));
    if fades {
        bind_preset_fades(&mut machine, &actuators, scheduler.clone(), config.fade());
    } else {
        bind_preset_states(&mut machine, &actuators);
    }

    let machine: SharedStateMachine = Arc::new(Mutex::new(machine));
    let store = PropertyStore::new();
    forward_user_control(&store, machine.clone());

    (
        Hub {
            machine,
            store,
            bed,
            desk,
        },
        scheduler,
    )
}

#[test]
fn user_control_write_drives_lights() {
    let (hub, _scheduler) = build_hub(false);

    hub.store
        .set(ROOT_PATH, USER_CONTROL_KEY, json!("manual:on"))
        .unwrap();

    assert_eq!(hub.machine.lock().unwrap().current_string(), "manual:on");
    for light in [&hub.bed, &hub.desk] {
        assert_eq!(light.powered_on(), Some(true));
        assert_eq!(light.last_color(), Some(daylight(1.0)));
    }
}

#[test]
fn sticky_category_holds_against_guarded_transitions() {
    let (hub, _scheduler) = build_hub(false);

    hub.store
        .set(ROOT_PATH, USER_CONTROL_KEY, json!("manual:sleep"))
        .unwrap();

    // A sensor-driven guarded transition cannot pull the dwelling out of
    // manual control.
    let mut machine = hub.machine.lock().unwrap();
    assert!(!machine.change_state("auto:bedtime"));
    assert_eq!(machine.current_string(), "manual:sleep");

    // But the user can.
    assert!(machine.change_user_state("auto:bedtime"));
    assert_eq!(machine.current_string(), "auto:bedtime");
}

#[test]
fn control_surface_round_trip() {
    let (hub, _scheduler) = build_hub(false);
    let surface = ControlSurface::new(hub.machine.clone());

    assert!(surface.read().starts_with("auto:daytime\nOptions:\n"));
    assert!(surface.write("manual:read"));
    assert!(surface.read().starts_with("manual:read\n"));

    assert_eq!(hub.bed.last_color(), Some(daylight(1.0)));
    assert_eq!(hub.desk.last_color(), Some(daylight(0.0)));
}

#[test]
fn fade_binding_settles_on_preset_color() {
    let (hub, scheduler) = build_hub(true);

    hub.store
        .set(ROOT_PATH, USER_CONTROL_KEY, json!("manual:on"))
        .unwrap();

    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(hub.bed.last_color(), Some(daylight(1.0)));
    assert_eq!(hub.desk.last_color(), Some(daylight(1.0)));
    assert!(scheduler.is_idle());
}
