//! Physical stick record.

use crate::joy_map::JoyMap;
use crate::mode::EventMode;
use std::collections::HashMap;
use std::fmt;

/// Binding modes persisted per device. The emulation-mode table is
/// derived from these by the registry and never saved directly.
pub const PERSISTED_MODES: &[EventMode] = &[
    EventMode::Joystick,
    EventMode::Paddles,
    EventMode::Keypad,
    EventMode::CompuMate,
    EventMode::Common,
    EventMode::Menu,
];

/// A connected joystick-like device and its binding table.
///
/// The runtime `id` is assigned by the registry on connect and recycled
/// across reconnects of the same name; `-1` means "not attached".
#[derive(Clone, Debug)]
pub struct PhysicalJoystick {
    pub name: String,
    pub id: i32,
    pub num_axes: u32,
    pub num_buttons: u32,
    pub num_hats: u32,
    pub joy_map: JoyMap,
}

impl PhysicalJoystick {
    pub fn new(name: impl Into<String>, num_axes: u32, num_buttons: u32, num_hats: u32) -> Self {
        Self {
            name: name.into(),
            id: -1,
            num_axes,
            num_buttons,
            num_hats,
            joy_map: JoyMap::new(),
        }
    }

    /// True when the device exposes nothing bindable.
    pub fn is_unusable(&self) -> bool {
        self.num_axes == 0 && self.num_buttons == 0 && self.num_hats == 0
    }

    pub fn about(&self) -> String {
        format!(
            "{} with {} axes, {} buttons, {} hats",
            self.name, self.num_axes, self.num_buttons, self.num_hats
        )
    }

    /// Serialized per-mode mapping strings for every persisted mode.
    pub fn mapping_strings(&self) -> HashMap<EventMode, String> {
        let mut out = HashMap::new();
        for &mode in PERSISTED_MODES {
            let s = self.joy_map.save_mapping(mode);
            if !s.is_empty() {
                out.insert(mode, s);
            }
        }
        out
    }

    /// Restore per-mode mapping strings; returns total bindings applied.
    pub fn apply_mapping_strings(&mut self, maps: &HashMap<EventMode, String>) -> usize {
        let mut count = 0;
        for (&mode, list) in maps {
            count += self.joy_map.load_mapping(list, mode);
        }
        count
    }
}

impl fmt::Display for PhysicalJoystick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Joy{} ({})", self.id, self.name)
    }
}
