//! Round-trips of the persisted formats: config TOML, mapping strings,
//! combo table and the registry's JSON store.

use jackline::{
    Action, Dispatcher, DispatcherState, EventMode, InputConfig, JoyMapping, KeyCode, KeyMapping,
    MappingStore, Mod, PhysicalJoystick,
};

fn dispatcher() -> Dispatcher<()> {
    let mut d = Dispatcher::new(());
    d.set_default_key_mappings();
    d.set_state(DispatcherState::Emulation);
    d
}

#[test]
fn config_survives_a_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.toml");

    let mut d = dispatcher();
    d.set_allow_all_directions(true);
    d.set_combo(3, &[Action::SaveState, Action::TakeSnapshot]);
    d.key_map_mut().add(
        Action::ConsoleSelect,
        KeyMapping::new(EventMode::Emulation, KeyCode::G, Mod::CTRL),
    );

    let mut config = InputConfig::default();
    d.store_config(&mut config);
    config.save(&path).unwrap();

    let loaded = InputConfig::load(&path).unwrap();
    let mut d2 = Dispatcher::new(());
    d2.apply_config(&loaded);
    d2.set_state(DispatcherState::Emulation);

    d2.handle_key(KeyCode::G, Mod::CTRL, true, false);
    assert_eq!(d2.latch().get(Action::ConsoleSelect), 1);
    assert_eq!(d2.combo(3).unwrap()[0], Action::SaveState);
    assert_eq!(d2.combo(3).unwrap()[1], Action::TakeSnapshot);
}

#[test]
fn missing_config_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    assert!(InputConfig::load(dir.path().join("absent.toml")).is_err());
}

#[test]
fn stale_event_version_in_config_resets_combos() {
    let mut d = dispatcher();
    d.set_combo(0, &[Action::SaveState]);

    let mut config = InputConfig::default();
    d.store_config(&mut config);
    config.event_version = config.event_version + 1;

    let mut d2 = Dispatcher::new(());
    d2.apply_config(&config);
    for slot in 0..jackline::COMBO_SIZE {
        assert!(d2
            .combo(slot)
            .unwrap()
            .iter()
            .all(|a| *a == Action::NoAction));
    }
    // the key mappings are unaffected by combo version skew
    d2.set_state(DispatcherState::Emulation);
    d2.handle_key(KeyCode::Space, Mod::empty(), true, false);
    assert_eq!(d2.latch().get(Action::JoystickZeroFire), 1);
}

#[test]
fn garbled_keymap_entries_do_not_poison_the_rest() {
    let mut config = InputConfig::default();
    let mut d = dispatcher();
    d.store_config(&mut config);
    config.keymap_emulation = format!("rubbish|{}", config.keymap_emulation);

    let mut d2 = Dispatcher::new(());
    d2.apply_config(&config);
    d2.set_state(DispatcherState::Emulation);
    d2.handle_key(KeyCode::Space, Mod::empty(), true, false);
    assert_eq!(d2.latch().get(Action::JoystickZeroFire), 1);
}

#[test]
fn registry_store_restores_devices_in_a_new_session() {
    let mut d = dispatcher();
    let id = d.registry_mut().add(PhysicalJoystick::new("Arcade Stick", 2, 10, 1));
    d.registry_mut().add_mapping(
        Action::ConsoleSelect,
        EventMode::Emulation,
        id,
        JoyMapping::button(EventMode::Emulation, 8),
    );
    let json = d.registry_mut().save_all().to_json().unwrap();

    // a fresh process: load the store, then the device reconnects
    let mut d2 = dispatcher();
    d2.registry_mut()
        .load_store(&MappingStore::from_json(&json).unwrap());
    let id2 = d2
        .registry_mut()
        .add(PhysicalJoystick::new("Arcade Stick", 2, 10, 1));
    d2.handle_joy_button(id2, 8, true, false);
    assert_eq!(d2.latch().get(Action::ConsoleSelect), 1);
}

#[test]
fn corrupt_store_json_is_an_error_value() {
    assert!(MappingStore::from_json("{not json").is_err());
}
