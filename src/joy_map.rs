//! Stick binding table.
//!
//! Maps `(mode, button, axis+direction, hat+direction)` descriptors onto
//! logical actions. Exactly one of {button-only, axis, hat} carries the
//! event; the button field additionally participates in axis and hat
//! descriptors so a held button can qualify an axis move (shifted
//! mappings). Matching is exact, unlike the keyboard table's fuzzy
//! modifier rule. Each physical stick owns one of these tables.

use crate::action::{self, Action};
use crate::mode::{EventMode, JoyAxis, JoyDir, JoyHat, JOY_CTRL_NONE};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Descriptor for one stick input within a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JoyMapping {
    pub mode: EventMode,
    pub button: i32,
    pub axis: JoyAxis,
    pub adir: JoyDir,
    pub hat: i32,
    pub hdir: JoyHat,
}

impl JoyMapping {
    /// Button-only descriptor.
    pub fn button(mode: EventMode, button: i32) -> Self {
        Self {
            mode,
            button,
            axis: JoyAxis::None,
            adir: JoyDir::None,
            hat: JOY_CTRL_NONE,
            hdir: JoyHat::Center,
        }
    }

    /// Axis descriptor, optionally qualified by a held button.
    pub fn axis(mode: EventMode, button: i32, axis: JoyAxis, adir: JoyDir) -> Self {
        Self {
            mode,
            button,
            axis,
            adir,
            hat: JOY_CTRL_NONE,
            hdir: JoyHat::Center,
        }
    }

    /// Hat descriptor, optionally qualified by a held button.
    pub fn hat(mode: EventMode, button: i32, hat: i32, hdir: JoyHat) -> Self {
        Self {
            mode,
            button,
            axis: JoyAxis::None,
            adir: JoyDir::None,
            hat,
            hdir,
        }
    }

    /// Human-readable form without the device prefix, e.g. `Button 3`,
    /// `Axis Y-` or `Button 0 + Hat 0 Up`.
    pub fn desc(&self) -> String {
        let mut parts = Vec::new();
        if self.button != JOY_CTRL_NONE {
            parts.push(format!("Button {}", self.button));
        }
        if self.axis != JoyAxis::None {
            let dir = match self.adir {
                JoyDir::Neg => "-",
                JoyDir::Pos => "+",
                JoyDir::Analog => "*",
                JoyDir::None => "",
            };
            parts.push(format!("Axis {}{}", self.axis.label(), dir));
        }
        if self.hat != JOY_CTRL_NONE {
            parts.push(format!("Hat {} {}", self.hat, self.hdir.label()));
        }
        parts.join(" + ")
    }
}

impl fmt::Display for JoyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.desc())
    }
}

/// Binding table for one physical stick.
#[derive(Clone, Debug, Default)]
pub struct JoyMap {
    map: HashMap<JoyMapping, Action>,
}

impl JoyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a binding; an existing binding for the same
    /// descriptor is silently replaced.
    pub fn add(&mut self, action: Action, mapping: JoyMapping) {
        self.map.insert(mapping, action);
    }

    /// Action bound to a descriptor, `NoAction` on miss.
    pub fn get(&self, mapping: JoyMapping) -> Action {
        self.map.get(&mapping).copied().unwrap_or(Action::NoAction)
    }

    /// Button-only lookup.
    pub fn get_button(&self, mode: EventMode, button: i32) -> Action {
        self.get(JoyMapping::button(mode, button))
    }

    /// Axis lookup; `value` is the raw signed axis position.
    pub fn get_axis(&self, mode: EventMode, button: i32, axis: JoyAxis, value: i32) -> Action {
        self.get(JoyMapping::axis(mode, button, axis, JoyDir::from_value(value)))
    }

    /// Hat lookup.
    pub fn get_hat(&self, mode: EventMode, button: i32, hat: i32, hdir: JoyHat) -> Action {
        self.get(JoyMapping::hat(mode, button, hat, hdir))
    }

    pub fn check(&self, mapping: JoyMapping) -> bool {
        self.map.contains_key(&mapping)
    }

    pub fn erase(&mut self, mapping: JoyMapping) {
        self.map.remove(&mapping);
    }

    pub fn erase_mode(&mut self, mode: EventMode) {
        self.map.retain(|m, _| m.mode != mode);
    }

    pub fn erase_action(&mut self, action: Action, mode: EventMode) {
        self.map.retain(|m, a| m.mode != mode || *a != action);
    }

    /// All descriptors currently bound to `action` in `mode`.
    pub fn mappings_for(&self, action: Action, mode: EventMode) -> Vec<JoyMapping> {
        self.map
            .iter()
            .filter(|(m, a)| m.mode == mode && **a == action)
            .map(|(m, _)| *m)
            .collect()
    }

    /// All `(descriptor, action)` pairs stored under `mode`.
    pub fn entries_for_mode(&self, mode: EventMode) -> Vec<(JoyMapping, Action)> {
        self.map
            .iter()
            .filter(|(m, _)| m.mode == mode)
            .map(|(m, a)| (*m, *a))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Serialize one mode's bindings as `index:button:axis:adir:hat:hdir`
    /// entries joined by `|`.
    pub fn save_mapping(&self, mode: EventMode) -> String {
        let menu = mode == EventMode::Menu;
        let mut entries = Vec::new();
        for (m, a) in &self.map {
            if m.mode != mode {
                continue;
            }
            if let Some(idx) = action::index_of(*a, menu) {
                entries.push(format!(
                    "{}:{}:{}:{}:{}:{}",
                    idx,
                    m.button,
                    m.axis.code(),
                    m.adir.code(),
                    m.hat,
                    m.hdir.code()
                ));
            }
        }
        entries.join("|")
    }

    /// Repopulate one mode from a serialized string, replacing its
    /// current contents. Malformed entries are skipped; returns the
    /// number of bindings applied.
    pub fn load_mapping(&mut self, list: &str, mode: EventMode) -> usize {
        let menu = mode == EventMode::Menu;
        self.erase_mode(mode);

        let mut count = 0;
        for token in list.split('|').filter(|t| !t.is_empty()) {
            let fields: Vec<i64> = token
                .split(':')
                .filter_map(|f| f.parse::<i64>().ok())
                .collect();
            if fields.len() != 6 || fields[0] < 0 {
                debug!("skipping malformed stick mapping entry '{token}'");
                continue;
            }
            let action = action::action_at(fields[0] as usize, menu);
            let decoded = (
                JoyAxis::from_code(fields[2] as i32),
                JoyDir::from_code(fields[3] as i32),
                JoyHat::from_code(fields[5] as i32),
            );
            let (Some(axis), Some(adir), Some(hdir)) = decoded else {
                debug!("skipping stick mapping entry '{token}' with unknown codes");
                continue;
            };
            if action == Action::NoAction {
                debug!("skipping stick mapping entry '{token}' with stale action index");
                continue;
            }
            self.add(
                action,
                JoyMapping {
                    mode,
                    button: fields[1] as i32,
                    axis,
                    adir,
                    hat: fields[4] as i32,
                    hdir,
                },
            );
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_then_lookup_by_kind() {
        let mut map = JoyMap::new();
        map.add(
            Action::JoystickZeroFire,
            JoyMapping::button(EventMode::Emulation, 0),
        );
        map.add(
            Action::JoystickZeroLeft,
            JoyMapping::axis(EventMode::Emulation, JOY_CTRL_NONE, JoyAxis::X, JoyDir::Neg),
        );
        map.add(
            Action::JoystickZeroUp,
            JoyMapping::hat(EventMode::Emulation, JOY_CTRL_NONE, 0, JoyHat::Up),
        );

        assert_eq!(map.get_button(EventMode::Emulation, 0), Action::JoystickZeroFire);
        assert_eq!(
            map.get_axis(EventMode::Emulation, JOY_CTRL_NONE, JoyAxis::X, -32000),
            Action::JoystickZeroLeft
        );
        assert_eq!(
            map.get_hat(EventMode::Emulation, JOY_CTRL_NONE, 0, JoyHat::Up),
            Action::JoystickZeroUp
        );
    }

    #[test]
    fn axis_directions_are_distinct() {
        let mut map = JoyMap::new();
        map.add(
            Action::JoystickZeroLeft,
            JoyMapping::axis(EventMode::Emulation, JOY_CTRL_NONE, JoyAxis::X, JoyDir::Neg),
        );
        assert_eq!(
            map.get_axis(EventMode::Emulation, JOY_CTRL_NONE, JoyAxis::X, 1000),
            Action::NoAction
        );
    }

    #[test]
    fn erase_action_removes_every_descriptor() {
        let mut map = JoyMap::new();
        map.add(Action::ConsoleSelect, JoyMapping::button(EventMode::Emulation, 1));
        map.add(Action::ConsoleSelect, JoyMapping::button(EventMode::Emulation, 2));
        map.add(Action::ConsoleReset, JoyMapping::button(EventMode::Emulation, 3));
        map.erase_action(Action::ConsoleSelect, EventMode::Emulation);
        assert_eq!(map.get_button(EventMode::Emulation, 1), Action::NoAction);
        assert_eq!(map.get_button(EventMode::Emulation, 2), Action::NoAction);
        assert_eq!(map.get_button(EventMode::Emulation, 3), Action::ConsoleReset);
    }

    #[test]
    fn save_load_round_trips_as_sets() {
        let mut map = JoyMap::new();
        map.add(Action::JoystickZeroFire, JoyMapping::button(EventMode::Joystick, 0));
        map.add(
            Action::JoystickZeroRight,
            JoyMapping::axis(EventMode::Joystick, JOY_CTRL_NONE, JoyAxis::X, JoyDir::Pos),
        );
        map.add(
            Action::JoystickZeroDown,
            JoyMapping::hat(EventMode::Joystick, JOY_CTRL_NONE, 0, JoyHat::Down),
        );

        let saved = map.save_mapping(EventMode::Joystick);
        let mut other = JoyMap::new();
        assert_eq!(other.load_mapping(&saved, EventMode::Joystick), 3);

        let mut a: Vec<(JoyMapping, Action)> = map.entries_for_mode(EventMode::Joystick);
        let mut b: Vec<(JoyMapping, Action)> = other.entries_for_mode(EventMode::Joystick);
        a.sort_by_key(|(m, _)| format!("{m:?}"));
        b.sort_by_key(|(m, _)| format!("{m:?}"));
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_entries_do_not_abort_load() {
        let mut map = JoyMap::new();
        let list = "junk|1:2:3|0:0:-1:0:-1:4|77777:0:-1:0:-1:4";
        assert_eq!(map.load_mapping(list, EventMode::Emulation), 1);
        assert_eq!(map.get_button(EventMode::Emulation, 0), Action::Quit);
    }

    #[test]
    fn descriptions_name_the_input() {
        assert_eq!(JoyMapping::button(EventMode::Emulation, 3).desc(), "Button 3");
        assert_eq!(
            JoyMapping::axis(EventMode::Emulation, JOY_CTRL_NONE, JoyAxis::Y, JoyDir::Neg).desc(),
            "Axis Y-"
        );
        assert_eq!(
            JoyMapping::hat(EventMode::Emulation, 0, 0, JoyHat::Up).desc(),
            "Button 0 + Hat 0 Up"
        );
    }
}
