//! Keyboard binding table.
//!
//! Maps `(mode, key, modifiers)` descriptors onto logical actions.
//!
//! # Modifier matching
//! Modifier comparison is per-family (Shift, Ctrl, Alt, Gui): two
//! descriptors are equal when, for every family with a bit set in either
//! of them, both have it set; families absent from both never
//! discriminate. On top of that a global `mod_enabled` toggle exists —
//! when off, modifiers are stripped from descriptors on both bind and
//! lookup, so a plain `A` binding matches `Shift+A` presses. A solo press
//! of a modifier key itself always carries an empty mask, letting Ctrl
//! act as a fire button without triggering Ctrl combos.
//!
//! # Persistence
//! [`KeyMap::save_mapping`] emits one mode's entries as a flat
//! `actionIndex:key:mods` token stream; [`KeyMap::load_mapping`] parses
//! the same format, skipping malformed entries individually and never
//! failing the whole load.

use crate::action::{self, Action};
use crate::mode::EventMode;
use bitflags::bitflags;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

bitflags! {
    /// Modifier families tracked by key bindings.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Mod: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const GUI   = 1 << 3;
    }
}

impl Mod {
    fn label(self) -> &'static str {
        if self == Mod::SHIFT {
            "Shift"
        } else if self == Mod::CTRL {
            "Ctrl"
        } else if self == Mod::ALT {
            "Alt"
        } else if self == Mod::GUI {
            "Gui"
        } else {
            ""
        }
    }
}

/// Physical key identifier, independent of the windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Up, Down, Left, Right,
    Home, End, PageUp, PageDown, Insert, Delete,
    Return, Escape, Space, Tab, Backspace,
    Comma, Period, Slash, Semicolon, Quote, Minus, Equals,
    LeftBracket, RightBracket, Backslash, Backquote,
    LShift, RShift, LCtrl, RCtrl, LAlt, RAlt, LGui, RGui,
    Pause,
}

impl KeyCode {
    const ALL: &'static [KeyCode] = &[
        KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E,
        KeyCode::F, KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J,
        KeyCode::K, KeyCode::L, KeyCode::M, KeyCode::N, KeyCode::O,
        KeyCode::P, KeyCode::Q, KeyCode::R, KeyCode::S, KeyCode::T,
        KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X, KeyCode::Y,
        KeyCode::Z, KeyCode::Num0, KeyCode::Num1, KeyCode::Num2,
        KeyCode::Num3, KeyCode::Num4, KeyCode::Num5, KeyCode::Num6,
        KeyCode::Num7, KeyCode::Num8, KeyCode::Num9, KeyCode::F1,
        KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
        KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11,
        KeyCode::F12, KeyCode::Up, KeyCode::Down, KeyCode::Left,
        KeyCode::Right, KeyCode::Home, KeyCode::End, KeyCode::PageUp,
        KeyCode::PageDown, KeyCode::Insert, KeyCode::Delete,
        KeyCode::Return, KeyCode::Escape, KeyCode::Space, KeyCode::Tab,
        KeyCode::Backspace, KeyCode::Comma, KeyCode::Period,
        KeyCode::Slash, KeyCode::Semicolon, KeyCode::Quote, KeyCode::Minus,
        KeyCode::Equals, KeyCode::LeftBracket, KeyCode::RightBracket,
        KeyCode::Backslash, KeyCode::Backquote, KeyCode::LShift,
        KeyCode::RShift, KeyCode::LCtrl, KeyCode::RCtrl, KeyCode::LAlt,
        KeyCode::RAlt, KeyCode::LGui, KeyCode::RGui, KeyCode::Pause,
    ];

    /// Stable numeric code used by the mapping string format.
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<KeyCode> {
        KeyCode::ALL.iter().copied().find(|k| k.code() == code)
    }

    /// True for keys that are themselves modifiers.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::LShift
                | KeyCode::RShift
                | KeyCode::LCtrl
                | KeyCode::RCtrl
                | KeyCode::LAlt
                | KeyCode::RAlt
                | KeyCode::LGui
                | KeyCode::RGui
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyCode::A => "A", KeyCode::B => "B", KeyCode::C => "C",
            KeyCode::D => "D", KeyCode::E => "E", KeyCode::F => "F",
            KeyCode::G => "G", KeyCode::H => "H", KeyCode::I => "I",
            KeyCode::J => "J", KeyCode::K => "K", KeyCode::L => "L",
            KeyCode::M => "M", KeyCode::N => "N", KeyCode::O => "O",
            KeyCode::P => "P", KeyCode::Q => "Q", KeyCode::R => "R",
            KeyCode::S => "S", KeyCode::T => "T", KeyCode::U => "U",
            KeyCode::V => "V", KeyCode::W => "W", KeyCode::X => "X",
            KeyCode::Y => "Y", KeyCode::Z => "Z",
            KeyCode::Num0 => "0", KeyCode::Num1 => "1", KeyCode::Num2 => "2",
            KeyCode::Num3 => "3", KeyCode::Num4 => "4", KeyCode::Num5 => "5",
            KeyCode::Num6 => "6", KeyCode::Num7 => "7", KeyCode::Num8 => "8",
            KeyCode::Num9 => "9",
            KeyCode::F1 => "F1", KeyCode::F2 => "F2", KeyCode::F3 => "F3",
            KeyCode::F4 => "F4", KeyCode::F5 => "F5", KeyCode::F6 => "F6",
            KeyCode::F7 => "F7", KeyCode::F8 => "F8", KeyCode::F9 => "F9",
            KeyCode::F10 => "F10", KeyCode::F11 => "F11", KeyCode::F12 => "F12",
            KeyCode::Up => "Up", KeyCode::Down => "Down",
            KeyCode::Left => "Left", KeyCode::Right => "Right",
            KeyCode::Home => "Home", KeyCode::End => "End",
            KeyCode::PageUp => "PgUp", KeyCode::PageDown => "PgDown",
            KeyCode::Insert => "Ins", KeyCode::Delete => "Del",
            KeyCode::Return => "Return", KeyCode::Escape => "Escape",
            KeyCode::Space => "Space", KeyCode::Tab => "Tab",
            KeyCode::Backspace => "Backspace",
            KeyCode::Comma => ",", KeyCode::Period => ".",
            KeyCode::Slash => "/", KeyCode::Semicolon => ";",
            KeyCode::Quote => "'", KeyCode::Minus => "-",
            KeyCode::Equals => "=", KeyCode::LeftBracket => "[",
            KeyCode::RightBracket => "]", KeyCode::Backslash => "\\",
            KeyCode::Backquote => "`",
            KeyCode::LShift => "LShift", KeyCode::RShift => "RShift",
            KeyCode::LCtrl => "LCtrl", KeyCode::RCtrl => "RCtrl",
            KeyCode::LAlt => "LAlt", KeyCode::RAlt => "RAlt",
            KeyCode::LGui => "LGui", KeyCode::RGui => "RGui",
            KeyCode::Pause => "Pause",
        }
    }
}

/// Descriptor for one keyboard input within a mode.
#[derive(Clone, Copy, Debug)]
pub struct KeyMapping {
    pub mode: EventMode,
    pub key: KeyCode,
    pub mods: Mod,
}

impl KeyMapping {
    pub fn new(mode: EventMode, key: KeyCode, mods: Mod) -> Self {
        Self { mode, key, mods }
    }

    /// Human-readable form, e.g. `Ctrl+A` or `Shift+F5`.
    pub fn desc(&self) -> String {
        let mut out = String::new();
        for family in [Mod::SHIFT, Mod::CTRL, Mod::ALT, Mod::GUI] {
            if self.mods.contains(family) {
                out.push_str(family.label());
                out.push('+');
            }
        }
        out.push_str(self.key.label());
        out
    }

    fn family_matches(&self, other: &KeyMapping, family: Mod) -> bool {
        if (self.mods | other.mods).contains(family) {
            self.mods.contains(family) && other.mods.contains(family)
        } else {
            true
        }
    }
}

impl PartialEq for KeyMapping {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.key == other.key
            && self.family_matches(other, Mod::SHIFT)
            && self.family_matches(other, Mod::CTRL)
            && self.family_matches(other, Mod::ALT)
            && self.family_matches(other, Mod::GUI)
    }
}

impl Eq for KeyMapping {}

impl Hash for KeyMapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
        self.key.hash(state);
        // one presence bit per family, consistent with the equality above
        for family in [Mod::SHIFT, Mod::CTRL, Mod::ALT, Mod::GUI] {
            self.mods.contains(family).hash(state);
        }
    }
}

impl fmt::Display for KeyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.desc())
    }
}

/// Keyboard binding table shared by all modes.
#[derive(Clone, Debug)]
pub struct KeyMap {
    map: HashMap<KeyMapping, Action>,
    mod_enabled: bool,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            mod_enabled: true,
        }
    }

    /// Whether modifier combos participate in matching.
    pub fn mod_enabled(&self) -> bool {
        self.mod_enabled
    }

    pub fn set_mod_enabled(&mut self, enabled: bool) {
        self.mod_enabled = enabled;
    }

    fn normalize(&self, mapping: KeyMapping) -> KeyMapping {
        let mut m = mapping;
        if m.key.is_modifier() || !self.mod_enabled {
            m.mods = Mod::empty();
        }
        m
    }

    /// Insert or overwrite a binding; an existing binding for the same
    /// descriptor is silently replaced.
    pub fn add(&mut self, action: Action, mapping: KeyMapping) {
        let m = self.normalize(mapping);
        self.map.insert(m, action);
    }

    /// Action bound to a descriptor, `NoAction` on miss.
    pub fn get(&self, mapping: KeyMapping) -> Action {
        let m = self.normalize(mapping);
        self.map.get(&m).copied().unwrap_or(Action::NoAction)
    }

    /// True if the descriptor is currently bound.
    pub fn check(&self, mapping: KeyMapping) -> bool {
        self.map.contains_key(&self.normalize(mapping))
    }

    pub fn erase(&mut self, mapping: KeyMapping) {
        let m = self.normalize(mapping);
        self.map.remove(&m);
    }

    /// Remove every binding in one mode.
    pub fn erase_mode(&mut self, mode: EventMode) {
        self.map.retain(|m, _| m.mode != mode);
    }

    /// Remove every descriptor bound to `action` in `mode`.
    pub fn erase_action(&mut self, action: Action, mode: EventMode) {
        self.map.retain(|m, a| m.mode != mode || *a != action);
    }

    /// All descriptors currently bound to `action` in `mode`.
    pub fn mappings_for(&self, action: Action, mode: EventMode) -> Vec<KeyMapping> {
        self.map
            .iter()
            .filter(|(m, a)| m.mode == mode && **a == action)
            .map(|(m, _)| *m)
            .collect()
    }

    /// Joined display string of all bindings for `action` in `mode`.
    pub fn action_desc(&self, action: Action, mode: EventMode) -> String {
        let descs: Vec<String> = self
            .mappings_for(action, mode)
            .iter()
            .map(|m| m.desc())
            .collect();
        descs.join(", ")
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Serialize one mode's bindings as `index:key:mods` entries joined
    /// by `|`. Iteration order is not stable across runs; the table is
    /// regenerated on load, so it does not need to be.
    pub fn save_mapping(&self, mode: EventMode) -> String {
        let menu = mode == EventMode::Menu;
        let mut entries = Vec::new();
        for (m, a) in &self.map {
            if m.mode != mode {
                continue;
            }
            if let Some(idx) = action::index_of(*a, menu) {
                entries.push(format!("{}:{}:{}", idx, m.key.code(), m.mods.bits()));
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
            let fields: Vec<&str> = token.split(':').collect();
            if fields.len() != 3 {
                debug!("skipping malformed key mapping entry '{token}'");
                continue;
            }
            let parsed = (
                fields[0].parse::<usize>(),
                fields[1].parse::<u16>(),
                fields[2].parse::<u8>(),
            );
            let (Ok(idx), Ok(key_code), Ok(mod_bits)) = parsed else {
                debug!("skipping malformed key mapping entry '{token}'");
                continue;
            };
            let action = action::action_at(idx, menu);
            let (Some(key), Some(mods)) =
                (KeyCode::from_code(key_code), Mod::from_bits(mod_bits))
            else {
                debug!("skipping key mapping entry '{token}' with unknown codes");
                continue;
            };
            if action == Action::NoAction {
                debug!("skipping key mapping entry '{token}' with stale action index");
                continue;
            }
            self.add(action, KeyMapping::new(mode, key, mods));
            count += 1;
        }
        count
    }
}
