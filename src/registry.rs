//! Registry of physical joystick-like devices.
//!
//! Tracks two collections, mirroring the split between "plugged in right
//! now" and "seen before": a live table keyed by runtime id, and a
//! name-keyed database of remembered per-device mapping strings. When a
//! device named like a remembered one reconnects it gets its saved
//! bindings back without the user rebinding anything; records leave the
//! database only through an explicit [`JoystickRegistry::forget`].
//!
//! Bindings for emulation are stored under controller-family modes
//! (joystick, paddles, keypad, CompuMate, common). Whenever the
//! controller kind attached to a jack changes, the registry rebuilds the
//! derived emulation-mode table from the active families — the same
//! recomputed-on-demand view it uses instead of patching global tables
//! in place.

use crate::action::Action;
use crate::detector::ControllerKind;
use crate::device::PhysicalJoystick;
use crate::joy_map::JoyMapping;
use crate::mode::{EventMode, Jack, JoyAxis, JoyDir, JoyHat, JOY_CTRL_NONE};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default physical input for one action.
#[derive(Clone, Copy, Debug)]
enum DefaultInput {
    Button(i32),
    Axis(JoyAxis, JoyDir),
    Hat(i32, JoyHat),
}

impl DefaultInput {
    fn mapping(self, mode: EventMode) -> JoyMapping {
        match self {
            DefaultInput::Button(b) => JoyMapping::button(mode, b),
            DefaultInput::Axis(axis, dir) => {
                JoyMapping::axis(mode, JOY_CTRL_NONE, axis, dir)
            }
            DefaultInput::Hat(hat, dir) => JoyMapping::hat(mode, JOY_CTRL_NONE, hat, dir),
        }
    }
}

// Known-good starter sets per controller family. Installed only where
// the user has not bound anything, so customizations survive.
static DEFAULT_LEFT_JOYSTICK: &[(Action, DefaultInput)] = &[
    (Action::JoystickZeroUp, DefaultInput::Axis(JoyAxis::Y, JoyDir::Neg)),
    (Action::JoystickZeroDown, DefaultInput::Axis(JoyAxis::Y, JoyDir::Pos)),
    (Action::JoystickZeroLeft, DefaultInput::Axis(JoyAxis::X, JoyDir::Neg)),
    (Action::JoystickZeroRight, DefaultInput::Axis(JoyAxis::X, JoyDir::Pos)),
    (Action::JoystickZeroUp, DefaultInput::Hat(0, JoyHat::Up)),
    (Action::JoystickZeroDown, DefaultInput::Hat(0, JoyHat::Down)),
    (Action::JoystickZeroLeft, DefaultInput::Hat(0, JoyHat::Left)),
    (Action::JoystickZeroRight, DefaultInput::Hat(0, JoyHat::Right)),
    (Action::JoystickZeroFire, DefaultInput::Button(0)),
    (Action::JoystickZeroFire5, DefaultInput::Button(1)),
    (Action::JoystickZeroFire9, DefaultInput::Button(2)),
];

static DEFAULT_RIGHT_JOYSTICK: &[(Action, DefaultInput)] = &[
    (Action::JoystickOneUp, DefaultInput::Axis(JoyAxis::Y, JoyDir::Neg)),
    (Action::JoystickOneDown, DefaultInput::Axis(JoyAxis::Y, JoyDir::Pos)),
    (Action::JoystickOneLeft, DefaultInput::Axis(JoyAxis::X, JoyDir::Neg)),
    (Action::JoystickOneRight, DefaultInput::Axis(JoyAxis::X, JoyDir::Pos)),
    (Action::JoystickOneUp, DefaultInput::Hat(0, JoyHat::Up)),
    (Action::JoystickOneDown, DefaultInput::Hat(0, JoyHat::Down)),
    (Action::JoystickOneLeft, DefaultInput::Hat(0, JoyHat::Left)),
    (Action::JoystickOneRight, DefaultInput::Hat(0, JoyHat::Right)),
    (Action::JoystickOneFire, DefaultInput::Button(0)),
    (Action::JoystickOneFire5, DefaultInput::Button(1)),
    (Action::JoystickOneFire9, DefaultInput::Button(2)),
];

static DEFAULT_LEFT_PADDLES: &[(Action, DefaultInput)] = &[
    (Action::PaddleZeroDecrease, DefaultInput::Axis(JoyAxis::X, JoyDir::Neg)),
    (Action::PaddleZeroIncrease, DefaultInput::Axis(JoyAxis::X, JoyDir::Pos)),
    (Action::PaddleZeroFire, DefaultInput::Button(0)),
    (Action::PaddleOneDecrease, DefaultInput::Axis(JoyAxis::Y, JoyDir::Neg)),
    (Action::PaddleOneIncrease, DefaultInput::Axis(JoyAxis::Y, JoyDir::Pos)),
    (Action::PaddleOneFire, DefaultInput::Button(1)),
];

static DEFAULT_RIGHT_PADDLES: &[(Action, DefaultInput)] = &[
    (Action::PaddleTwoDecrease, DefaultInput::Axis(JoyAxis::X, JoyDir::Neg)),
    (Action::PaddleTwoIncrease, DefaultInput::Axis(JoyAxis::X, JoyDir::Pos)),
    (Action::PaddleTwoFire, DefaultInput::Button(0)),
    (Action::PaddleThreeDecrease, DefaultInput::Axis(JoyAxis::Y, JoyDir::Neg)),
    (Action::PaddleThreeIncrease, DefaultInput::Axis(JoyAxis::Y, JoyDir::Pos)),
    (Action::PaddleThreeFire, DefaultInput::Button(1)),
];

static DEFAULT_LEFT_KEYPAD: &[(Action, DefaultInput)] = &[
    (Action::KeypadZero1, DefaultInput::Button(0)),
    (Action::KeypadZero2, DefaultInput::Button(1)),
    (Action::KeypadZero3, DefaultInput::Button(2)),
    (Action::KeypadZero4, DefaultInput::Button(3)),
    (Action::KeypadZero5, DefaultInput::Button(4)),
    (Action::KeypadZero6, DefaultInput::Button(5)),
    (Action::KeypadZero7, DefaultInput::Button(6)),
    (Action::KeypadZero8, DefaultInput::Button(7)),
    (Action::KeypadZero9, DefaultInput::Button(8)),
    (Action::KeypadZeroStar, DefaultInput::Button(9)),
    (Action::KeypadZero0, DefaultInput::Button(10)),
    (Action::KeypadZeroPound, DefaultInput::Button(11)),
];

static DEFAULT_RIGHT_KEYPAD: &[(Action, DefaultInput)] = &[
    (Action::KeypadOne1, DefaultInput::Button(0)),
    (Action::KeypadOne2, DefaultInput::Button(1)),
    (Action::KeypadOne3, DefaultInput::Button(2)),
    (Action::KeypadOne4, DefaultInput::Button(3)),
    (Action::KeypadOne5, DefaultInput::Button(4)),
    (Action::KeypadOne6, DefaultInput::Button(5)),
    (Action::KeypadOne7, DefaultInput::Button(6)),
    (Action::KeypadOne8, DefaultInput::Button(7)),
    (Action::KeypadOne9, DefaultInput::Button(8)),
    (Action::KeypadOneStar, DefaultInput::Button(9)),
    (Action::KeypadOne0, DefaultInput::Button(10)),
    (Action::KeypadOnePound, DefaultInput::Button(11)),
];

static DEFAULT_COMMON: &[(Action, DefaultInput)] = &[
    (Action::ConsoleSelect, DefaultInput::Button(4)),
    (Action::ConsoleReset, DefaultInput::Button(5)),
    (Action::CmdMenuMode, DefaultInput::Button(6)),
];

static DEFAULT_MENU: &[(Action, DefaultInput)] = &[
    (Action::UIUp, DefaultInput::Axis(JoyAxis::Y, JoyDir::Neg)),
    (Action::UIDown, DefaultInput::Axis(JoyAxis::Y, JoyDir::Pos)),
    (Action::UILeft, DefaultInput::Axis(JoyAxis::X, JoyDir::Neg)),
    (Action::UIRight, DefaultInput::Axis(JoyAxis::X, JoyDir::Pos)),
    (Action::UIUp, DefaultInput::Hat(0, JoyHat::Up)),
    (Action::UIDown, DefaultInput::Hat(0, JoyHat::Down)),
    (Action::UILeft, DefaultInput::Hat(0, JoyHat::Left)),
    (Action::UIRight, DefaultInput::Hat(0, JoyHat::Right)),
    (Action::UISelect, DefaultInput::Button(0)),
    (Action::UICancel, DefaultInput::Button(1)),
    (Action::UITabPrev, DefaultInput::Button(2)),
    (Action::UITabNext, DefaultInput::Button(3)),
];

fn family_defaults(mode: EventMode, jack: Jack) -> &'static [(Action, DefaultInput)] {
    match (mode, jack) {
        (EventMode::Joystick, Jack::Left) => DEFAULT_LEFT_JOYSTICK,
        (EventMode::Joystick, Jack::Right) => DEFAULT_RIGHT_JOYSTICK,
        (EventMode::Paddles, Jack::Left) => DEFAULT_LEFT_PADDLES,
        (EventMode::Paddles, Jack::Right) => DEFAULT_RIGHT_PADDLES,
        (EventMode::Keypad, Jack::Left) => DEFAULT_LEFT_KEYPAD,
        (EventMode::Keypad, Jack::Right) => DEFAULT_RIGHT_KEYPAD,
        _ => &[],
    }
}

/// Controller-family mode a kind's emulation bindings live under.
pub fn family_mode(kind: ControllerKind) -> EventMode {
    match kind {
        ControllerKind::Paddles => EventMode::Paddles,
        ControllerKind::Keypad => EventMode::Keypad,
        ControllerKind::CompuMate => EventMode::CompuMate,
        _ => EventMode::Joystick,
    }
}

/// Family mode an action's emulation binding belongs to.
pub fn event_mode_for(action: Action, requested: EventMode) -> EventMode {
    if requested != EventMode::Emulation {
        return requested;
    }
    if action.is_joystick() {
        EventMode::Joystick
    } else if action.is_paddle() {
        EventMode::Paddles
    } else if action.is_keypad() {
        EventMode::Keypad
    } else {
        EventMode::Common
    }
}

/// Serializable snapshot of every remembered device's mapping strings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MappingStore {
    pub sticks: BTreeMap<String, HashMap<EventMode, String>>,
}

impl MappingStore {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<MappingStore, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Live and remembered joystick-like devices.
#[derive(Debug)]
pub struct JoystickRegistry {
    // currently connected, by runtime id
    sticks: BTreeMap<i32, PhysicalJoystick>,
    // every device ever seen, by name
    database: HashMap<String, HashMap<EventMode, String>>,
    left_mode: EventMode,
    right_mode: EventMode,
}

impl JoystickRegistry {
    pub fn new() -> Self {
        Self {
            sticks: BTreeMap::new(),
            database: HashMap::new(),
            left_mode: EventMode::Joystick,
            right_mode: EventMode::Joystick,
        }
    }

    /// Attach a device. Returns its runtime id, or `-1` for devices with
    /// no bindable controls. A remembered name gets its saved bindings
    /// restored; a new one gets the default mapping for every family.
    pub fn add(&mut self, mut stick: PhysicalJoystick) -> i32 {
        if stick.is_unusable() {
            warn!("ignoring {} without any bindable controls", stick.name);
            return -1;
        }

        let id = self.lowest_free_id();
        stick.id = id;

        match self.database.get(&stick.name) {
            Some(maps) if !maps.is_empty() => {
                let restored = stick.apply_mapping_strings(maps);
                info!("restored {} saved bindings for {}", restored, stick.about());
            }
            _ => {
                // even ids serve the left jack, odd ids the right
                let jack = if id % 2 == 0 { Jack::Left } else { Jack::Right };
                for mode in [EventMode::Joystick, EventMode::Paddles, EventMode::Keypad] {
                    install_defaults(&mut stick, mode, jack);
                }
                install_default_table(&mut stick, EventMode::Common, DEFAULT_COMMON);
                install_default_table(&mut stick, EventMode::Menu, DEFAULT_MENU);
                info!("added {} with default bindings", stick.about());
            }
        }

        self.database
            .insert(stick.name.clone(), stick.mapping_strings());
        self.sticks.insert(id, stick);
        self.rebuild_emulation_mappings();
        id
    }

    /// Detach a device by id, keeping its database record.
    pub fn remove(&mut self, id: i32) -> bool {
        match self.sticks.remove(&id) {
            Some(stick) => {
                self.database
                    .insert(stick.name.clone(), stick.mapping_strings());
                info!("removed {}", stick.about());
                true
            }
            None => false,
        }
    }

    /// Detach a device by name, keeping its database record.
    pub fn remove_name(&mut self, name: &str) -> bool {
        let id = self
            .sticks
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, _)| *id);
        match id {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    /// Drop a remembered device's saved bindings for good.
    pub fn forget(&mut self, name: &str) -> bool {
        self.database.remove(name).is_some()
    }

    pub fn stick(&self, id: i32) -> Option<&PhysicalJoystick> {
        self.sticks.get(&id)
    }

    pub fn stick_mut(&mut self, id: i32) -> Option<&mut PhysicalJoystick> {
        self.sticks.get_mut(&id)
    }

    /// `(name, attached id)` pairs for UI enumeration, remembered
    /// devices included with `None`.
    pub fn database_list(&self) -> Vec<(String, Option<i32>)> {
        let mut out: Vec<(String, Option<i32>)> = self
            .database
            .keys()
            .map(|name| {
                let id = self
                    .sticks
                    .values()
                    .find(|s| &s.name == name)
                    .map(|s| s.id);
                (name.clone(), id)
            })
            .collect();
        out.sort();
        out
    }

    /// Record which controller kind sits in a jack and rebuild the
    /// derived emulation-mode bindings accordingly.
    pub fn define_controller_mappings(&mut self, kind: ControllerKind, jack: Jack) {
        let mode = family_mode(kind);
        match jack {
            Jack::Left => self.left_mode = mode,
            Jack::Right => self.right_mode = mode,
        }
        self.rebuild_emulation_mappings();
    }

    /// Write the starter bindings for `kind` into a stick's family-mode
    /// table, leaving existing user bindings alone.
    pub fn install_default_mapping(&mut self, id: i32, kind: ControllerKind, jack: Jack) {
        if let Some(stick) = self.sticks.get_mut(&id) {
            install_defaults(stick, family_mode(kind), jack);
            self.persist(id);
            self.rebuild_emulation_mappings();
        }
    }

    /// Bind a descriptor to an action on one stick. An emulation-mode
    /// request is routed to the action's controller family so it
    /// survives controller changes.
    pub fn add_mapping(
        &mut self,
        action: Action,
        mode: EventMode,
        id: i32,
        mut mapping: JoyMapping,
    ) -> bool {
        let effective = event_mode_for(action, mode);
        mapping.mode = effective;
        match self.sticks.get_mut(&id) {
            Some(stick) => {
                stick.joy_map.add(action, mapping);
                self.persist(id);
                self.rebuild_emulation_mappings();
                true
            }
            None => false,
        }
    }

    /// Remove every descriptor bound to an action, on every stick.
    pub fn erase_mapping(&mut self, action: Action, mode: EventMode) {
        let effective = event_mode_for(action, mode);
        let ids: Vec<i32> = self.sticks.keys().copied().collect();
        for id in ids {
            if let Some(stick) = self.sticks.get_mut(&id) {
                stick.joy_map.erase_action(action, effective);
            }
            self.persist(id);
        }
        self.rebuild_emulation_mappings();
    }

    /// Action for a button press, `NoAction` for unknown devices.
    pub fn action_for_button(&self, mode: EventMode, id: i32, button: i32) -> Action {
        self.sticks
            .get(&id)
            .map_or(Action::NoAction, |s| s.joy_map.get_button(mode, button))
    }

    /// Action for an axis move, `NoAction` for unknown devices.
    pub fn action_for_axis(&self, mode: EventMode, id: i32, axis: JoyAxis, value: i32) -> Action {
        self.sticks.get(&id).map_or(Action::NoAction, |s| {
            s.joy_map.get_axis(mode, JOY_CTRL_NONE, axis, value)
        })
    }

    /// Action for a hat move, `NoAction` for unknown devices.
    pub fn action_for_hat(&self, mode: EventMode, id: i32, hat: i32, hdir: JoyHat) -> Action {
        self.sticks.get(&id).map_or(Action::NoAction, |s| {
            s.joy_map.get_hat(mode, JOY_CTRL_NONE, hat, hdir)
        })
    }

    /// Joined display string of every live binding for an action, each
    /// prefixed with its device, e.g. `Joy0 Button 3, Joy1 Hat 0 Up`.
    pub fn map_desc(&self, action: Action, mode: EventMode) -> String {
        let mut parts = Vec::new();
        for stick in self.sticks.values() {
            for m in stick.joy_map.mappings_for(action, mode) {
                parts.push(format!("Joy{} {}", stick.id, m.desc()));
            }
        }
        parts.join(", ")
    }

    /// Snapshot of the full name-keyed database for persistence.
    pub fn save_all(&mut self) -> MappingStore {
        let ids: Vec<i32> = self.sticks.keys().copied().collect();
        for id in ids {
            self.persist(id);
        }
        MappingStore {
            sticks: self.database.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    /// Merge a persisted store into the database. Live sticks pick up
    /// their entry immediately.
    pub fn load_store(&mut self, store: &MappingStore) {
        for (name, maps) in &store.sticks {
            self.database.insert(name.clone(), maps.clone());
            if let Some(stick) = self.sticks.values_mut().find(|s| &s.name == name) {
                stick.apply_mapping_strings(maps);
            }
        }
        self.rebuild_emulation_mappings();
    }

    fn lowest_free_id(&self) -> i32 {
        let mut id = 0;
        while self.sticks.contains_key(&id) {
            id += 1;
        }
        id
    }

    fn persist(&mut self, id: i32) {
        if let Some(stick) = self.sticks.get(&id) {
            self.database
                .insert(stick.name.clone(), stick.mapping_strings());
        }
    }

    /// Rebuild every stick's emulation-mode table from the common set
    /// plus the families active on each jack.
    fn rebuild_emulation_mappings(&mut self) {
        let (left_mode, right_mode) = (self.left_mode, self.right_mode);
        for stick in self.sticks.values_mut() {
            stick.joy_map.erase_mode(EventMode::Emulation);

            let mut enabled: Vec<(JoyMapping, Action)> = Vec::new();
            for (m, a) in stick.joy_map.entries_for_mode(EventMode::Common) {
                enabled.push((m, a));
            }
            for (m, a) in stick.joy_map.entries_for_mode(left_mode) {
                if a.jack() == Some(Jack::Left) {
                    enabled.push((m, a));
                }
            }
            for (m, a) in stick.joy_map.entries_for_mode(right_mode) {
                if a.jack() == Some(Jack::Right) {
                    enabled.push((m, a));
                }
            }
            for (mut m, a) in enabled {
                m.mode = EventMode::Emulation;
                stick.joy_map.add(a, m);
            }
        }
    }
}

fn install_defaults(stick: &mut PhysicalJoystick, mode: EventMode, jack: Jack) {
    install_default_table(stick, mode, family_defaults(mode, jack));
}

fn install_default_table(
    stick: &mut PhysicalJoystick,
    mode: EventMode,
    table: &[(Action, DefaultInput)],
) {
    for &(action, input) in table {
        let mapping = input.mapping(mode);
        // never clobber a user binding, in either direction
        if stick.joy_map.check(mapping)
            || !stick.joy_map.mappings_for(action, mode).is_empty()
        {
            continue;
        }
        stick.joy_map.add(action, mapping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(name: &str) -> PhysicalJoystick {
        PhysicalJoystick::new(name, 2, 12, 1)
    }

    #[test]
    fn ids_are_lowest_free_and_recycled() {
        let mut reg = JoystickRegistry::new();
        let a = reg.add(pad("A"));
        let b = reg.add(pad("B"));
        assert_eq!((a, b), (0, 1));
        reg.remove(0);
        assert_eq!(reg.add(pad("C")), 0);
    }

    #[test]
    fn unusable_devices_are_rejected() {
        let mut reg = JoystickRegistry::new();
        assert_eq!(reg.add(PhysicalJoystick::new("Ghost", 0, 0, 0)), -1);
    }

    #[test]
    fn new_devices_get_joystick_defaults() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("A"));
        assert_eq!(
            reg.action_for_axis(EventMode::Emulation, id, JoyAxis::Y, -1000),
            Action::JoystickZeroUp
        );
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, id, 0),
            Action::JoystickZeroFire
        );
        assert_eq!(
            reg.action_for_button(EventMode::Menu, id, 0),
            Action::UISelect
        );
    }

    #[test]
    fn reconnect_restores_saved_bindings() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("Foo"));
        reg.add_mapping(
            Action::ConsoleSelect,
            EventMode::Emulation,
            id,
            JoyMapping::button(EventMode::Emulation, 7),
        );
        reg.remove(id);

        let id2 = reg.add(pad("Foo"));
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, id2, 7),
            Action::ConsoleSelect
        );
    }

    #[test]
    fn forget_purges_saved_bindings() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("Foo"));
        reg.add_mapping(
            Action::ConsoleSelect,
            EventMode::Emulation,
            id,
            JoyMapping::button(EventMode::Emulation, 7),
        );
        reg.remove(id);
        reg.forget("Foo");

        let id2 = reg.add(pad("Foo"));
        // back to defaults: button 7 is unbound again
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, id2, 7),
            Action::NoAction
        );
    }

    #[test]
    fn paddles_swap_in_when_jack_reconfigured() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("A"));
        reg.define_controller_mappings(ControllerKind::Paddles, Jack::Left);
        assert_eq!(
            reg.action_for_axis(EventMode::Emulation, id, JoyAxis::X, -1000),
            Action::PaddleZeroDecrease
        );
        // the right jack still runs a joystick
        reg.define_controller_mappings(ControllerKind::Joystick, Jack::Right);
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, id, 0),
            Action::PaddleZeroFire
        );
    }

    #[test]
    fn defaults_never_clobber_user_bindings() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("A"));
        // user rebinds fire to button 3
        reg.erase_mapping(Action::JoystickZeroFire, EventMode::Emulation);
        reg.add_mapping(
            Action::JoystickZeroFire,
            EventMode::Emulation,
            id,
            JoyMapping::button(EventMode::Emulation, 3),
        );
        reg.install_default_mapping(id, ControllerKind::Joystick, Jack::Left);
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, id, 3),
            Action::JoystickZeroFire
        );
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, id, 0),
            Action::NoAction
        );
    }

    #[test]
    fn disconnected_ids_resolve_to_no_action() {
        let reg = JoystickRegistry::new();
        assert_eq!(
            reg.action_for_button(EventMode::Emulation, 5, 0),
            Action::NoAction
        );
    }

    #[test]
    fn store_round_trips_through_json() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("Foo"));
        reg.add_mapping(
            Action::ConsoleReset,
            EventMode::Emulation,
            id,
            JoyMapping::button(EventMode::Emulation, 9),
        );
        let json = reg.save_all().to_json().unwrap();

        let mut reg2 = JoystickRegistry::new();
        reg2.load_store(&MappingStore::from_json(&json).unwrap());
        let id2 = reg2.add(pad("Foo"));
        assert_eq!(
            reg2.action_for_button(EventMode::Emulation, id2, 9),
            Action::ConsoleReset
        );
    }

    #[test]
    fn map_desc_names_device_and_input() {
        let mut reg = JoystickRegistry::new();
        let id = reg.add(pad("A"));
        assert_eq!(
            reg.map_desc(Action::JoystickZeroFire, EventMode::Emulation),
            "Joy0 Button 0"
        );
        let _ = id;
    }
}
