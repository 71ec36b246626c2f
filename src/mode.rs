//! Shared input-context enums: binding modes, jacks, axis/hat directions.

use serde::{Deserialize, Serialize};

/// Sentinel for "no button/hat involved" in a stick mapping.
pub const JOY_CTRL_NONE: i32 = -1;

/// Context a binding is scoped to.
///
/// `Emulation` and `Menu` are the two modes lookups run against. The
/// controller-family modes (`Joystick`, `Paddles`, `Keypad`, `CompuMate`)
/// plus `Common` hold the per-controller-type binding sets; the registry
/// copies the active families into `Emulation` whenever the attached
/// controller kinds change, so a lookup still names exactly one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Emulation,
    Menu,
    Joystick,
    Paddles,
    Keypad,
    CompuMate,
    Common,
}

impl EventMode {
    /// Stable numeric tag used by the mapping string format.
    pub fn code(self) -> u32 {
        match self {
            EventMode::Emulation => 0,
            EventMode::Menu => 1,
            EventMode::Joystick => 2,
            EventMode::Paddles => 3,
            EventMode::Keypad => 4,
            EventMode::CompuMate => 5,
            EventMode::Common => 6,
        }
    }

    pub fn from_code(code: u32) -> Option<EventMode> {
        match code {
            0 => Some(EventMode::Emulation),
            1 => Some(EventMode::Menu),
            2 => Some(EventMode::Joystick),
            3 => Some(EventMode::Paddles),
            4 => Some(EventMode::Keypad),
            5 => Some(EventMode::CompuMate),
            6 => Some(EventMode::Common),
            _ => None,
        }
    }
}

/// One of the two controller ports on the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jack {
    Left,
    Right,
}

/// Stick axis referenced by a mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoyAxis {
    X,
    Y,
    Z,
    None,
}

impl JoyAxis {
    pub fn code(self) -> i32 {
        match self {
            JoyAxis::X => 0,
            JoyAxis::Y => 1,
            JoyAxis::Z => 2,
            JoyAxis::None => JOY_CTRL_NONE,
        }
    }

    pub fn from_code(code: i32) -> Option<JoyAxis> {
        match code {
            0 => Some(JoyAxis::X),
            1 => Some(JoyAxis::Y),
            2 => Some(JoyAxis::Z),
            JOY_CTRL_NONE => Some(JoyAxis::None),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JoyAxis::X => "X",
            JoyAxis::Y => "Y",
            JoyAxis::Z => "Z",
            JoyAxis::None => "",
        }
    }
}

/// Direction of travel on an axis. `Analog` marks mappings that consume
/// the raw axis value rather than a digital edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoyDir {
    Neg,
    None,
    Pos,
    Analog,
}

impl JoyDir {
    pub fn code(self) -> i32 {
        match self {
            JoyDir::Neg => -1,
            JoyDir::None => 0,
            JoyDir::Pos => 1,
            JoyDir::Analog => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<JoyDir> {
        match code {
            -1 => Some(JoyDir::Neg),
            0 => Some(JoyDir::None),
            1 => Some(JoyDir::Pos),
            2 => Some(JoyDir::Analog),
            _ => None,
        }
    }

    /// Digital direction for a raw axis value.
    pub fn from_value(value: i32) -> JoyDir {
        if value == 0 {
            JoyDir::None
        } else if value > 0 {
            JoyDir::Pos
        } else {
            JoyDir::Neg
        }
    }
}

/// Hat (POV/D-pad) position referenced by a mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoyHat {
    Up,
    Down,
    Left,
    Right,
    Center,
}

impl JoyHat {
    pub fn code(self) -> i32 {
        match self {
            JoyHat::Up => 0,
            JoyHat::Down => 1,
            JoyHat::Left => 2,
            JoyHat::Right => 3,
            JoyHat::Center => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<JoyHat> {
        match code {
            0 => Some(JoyHat::Up),
            1 => Some(JoyHat::Down),
            2 => Some(JoyHat::Left),
            3 => Some(JoyHat::Right),
            4 => Some(JoyHat::Center),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JoyHat::Up => "Up",
            JoyHat::Down => "Down",
            JoyHat::Left => "Left",
            JoyHat::Right => "Right",
            JoyHat::Center => "Center",
        }
    }
}

/// Mouse buttons the dispatcher latches in emulation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    WheelUp,
    WheelDown,
}
