//! Persisted input settings.
//!
//! One TOML file holds the global toggles, the keyboard mapping strings,
//! the combo table and the per-jack controller selections. Unknown or
//! missing fields fall back to defaults, so configs survive upgrades;
//! the mapping/combo strings themselves carry their own per-entry error
//! recovery in the tables that parse them.

use crate::action::Action;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("mapping store is not valid JSON: {0}")]
    Store(#[from] serde_json::Error),
}

/// Persistent input settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Whether modifier-key combos take part in keyboard matching.
    pub use_modifiers: bool,
    /// Permit opposite joystick directions simultaneously.
    pub allow_all_directions: bool,
    /// Drive the left virtual port from the right physical one and
    /// vice versa.
    pub swap_ports: bool,
    /// Controller selection per jack; `auto` means autodetect.
    pub left_controller: String,
    pub right_controller: String,
    /// Action-table version the combo string below was written against.
    pub event_version: u32,
    pub combo_map: String,
    pub keymap_emulation: String,
    pub keymap_menu: String,
    /// Inputs held during the ROM's first frames.
    pub hold_select: bool,
    pub hold_reset: bool,
    /// Letters out of `UDLRF` per virtual joystick.
    pub hold_joy0: String,
    pub hold_joy1: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            use_modifiers: true,
            allow_all_directions: false,
            swap_ports: false,
            left_controller: "auto".into(),
            right_controller: "auto".into(),
            event_version: Action::VERSION,
            combo_map: String::new(),
            keymap_emulation: String::new(),
            keymap_menu: String::new(),
            hold_select: false,
            hold_reset: false,
            hold_joy0: String::new(),
            hold_joy1: String::new(),
        }
    }
}

impl InputConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<InputConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = InputConfig::default();
        assert!(config.use_modifiers);
        assert!(!config.allow_all_directions);
        assert_eq!(config.left_controller, "auto");
        assert_eq!(config.event_version, Action::VERSION);
    }

    #[test]
    fn toml_round_trip_preserves_fields() {
        let mut config = InputConfig::default();
        config.swap_ports = true;
        config.combo_map = "16:1,2".into();
        config.hold_joy0 = "UF".into();

        let text = toml::to_string_pretty(&config).unwrap();
        let back: InputConfig = toml::from_str(&text).unwrap();
        assert!(back.swap_ports);
        assert_eq!(back.combo_map, "16:1,2");
        assert_eq!(back.hold_joy0, "UF");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: InputConfig = toml::from_str("swap_ports = true\n").unwrap();
        assert!(back.swap_ports);
        assert!(back.use_modifiers);
        assert_eq!(back.right_controller, "auto");
    }
}
