//! Logical actions and their per-mode label tables.
//!
//! An [`Action`] is an emulator-level effect, independent of whichever
//! physical input triggered it. The set is fixed at build time; binding
//! tables map physical descriptors onto these values and the dispatcher
//! forwards them to the machine's input latch or intercepts them itself.
//!
//! The per-mode tables ([`EMUL_ACTIONS`], [`MENU_ACTIONS`]) pair each
//! bindable action with its human label. Table position doubles as the
//! action index used by the mapping and combo string formats, so the
//! tables are append-only; [`Action::VERSION`] is bumped whenever entries
//! are inserted or reordered, which invalidates persisted combo tables.

/// Number of user-definable combo slots.
pub const COMBO_SIZE: usize = 16;

/// Maximum actions a single combo expands into.
pub const EVENTS_PER_COMBO: usize = 8;

/// An emulator-level semantic event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    #[default]
    NoAction,

    // Application control
    Quit,
    ExitMode,
    OptionsMenuMode,
    CmdMenuMode,
    DebuggerMode,
    TimeMachineMode,
    TogglePauseMode,
    StartPauseMode,
    ReloadConsole,
    Fry,

    // Console switches
    ConsoleSelect,
    ConsoleReset,
    ConsoleColor,
    ConsoleBlackWhite,
    ConsoleColorToggle,
    Console7800Pause,
    ConsoleLeftDiffA,
    ConsoleLeftDiffB,
    ConsoleLeftDiffToggle,
    ConsoleRightDiffA,
    ConsoleRightDiffB,
    ConsoleRightDiffToggle,

    // Save states and rewind
    SaveState,
    LoadState,
    ChangeState,
    ToggleAutoSlot,
    SaveAllStates,
    LoadAllStates,
    RewindPause,
    UnwindPause,
    Rewind1Menu,
    Rewind10Menu,
    RewindAllMenu,
    Unwind1Menu,
    Unwind10Menu,
    UnwindAllMenu,
    TakeSnapshot,

    // Sound
    VolumeDecrease,
    VolumeIncrease,
    SoundToggle,

    // Left port joystick
    JoystickZeroUp,
    JoystickZeroDown,
    JoystickZeroLeft,
    JoystickZeroRight,
    JoystickZeroFire,
    JoystickZeroFire5,
    JoystickZeroFire9,

    // Right port joystick
    JoystickOneUp,
    JoystickOneDown,
    JoystickOneLeft,
    JoystickOneRight,
    JoystickOneFire,
    JoystickOneFire5,
    JoystickOneFire9,

    // Paddles (two per jack)
    PaddleZeroDecrease,
    PaddleZeroIncrease,
    PaddleZeroFire,
    PaddleOneDecrease,
    PaddleOneIncrease,
    PaddleOneFire,
    PaddleTwoDecrease,
    PaddleTwoIncrease,
    PaddleTwoFire,
    PaddleThreeDecrease,
    PaddleThreeIncrease,
    PaddleThreeFire,

    // Left port keypad
    KeypadZero1,
    KeypadZero2,
    KeypadZero3,
    KeypadZero4,
    KeypadZero5,
    KeypadZero6,
    KeypadZero7,
    KeypadZero8,
    KeypadZero9,
    KeypadZeroStar,
    KeypadZero0,
    KeypadZeroPound,

    // Right port keypad
    KeypadOne1,
    KeypadOne2,
    KeypadOne3,
    KeypadOne4,
    KeypadOne5,
    KeypadOne6,
    KeypadOne7,
    KeypadOne8,
    KeypadOne9,
    KeypadOneStar,
    KeypadOne0,
    KeypadOnePound,

    // Combo slots
    Combo1,
    Combo2,
    Combo3,
    Combo4,
    Combo5,
    Combo6,
    Combo7,
    Combo8,
    Combo9,
    Combo10,
    Combo11,
    Combo12,
    Combo13,
    Combo14,
    Combo15,
    Combo16,

    // Menu navigation
    UIUp,
    UIDown,
    UILeft,
    UIRight,
    UIHome,
    UIEnd,
    UIPgUp,
    UIPgDown,
    UISelect,
    UIOk,
    UICancel,
    UINavPrev,
    UINavNext,
    UITabPrev,
    UITabNext,
    UIPrevDir,

    // Mouse latch values (set directly by the dispatcher, not bindable)
    MouseAxisXValue,
    MouseAxisYValue,
    MouseButtonLeftValue,
    MouseButtonRightValue,
}

/// A bindable action paired with its display label.
#[derive(Clone, Copy, Debug)]
pub struct ActionEntry {
    pub action: Action,
    pub label: &'static str,
}

const fn entry(action: Action, label: &'static str) -> ActionEntry {
    ActionEntry { action, label }
}

/// Actions bindable in emulation mode, in action-index order.
pub static EMUL_ACTIONS: &[ActionEntry] = &[
    entry(Action::Quit, "Quit"),
    entry(Action::ExitMode, "Exit current mode"),
    entry(Action::OptionsMenuMode, "Enter options menu"),
    entry(Action::CmdMenuMode, "Toggle commands menu"),
    entry(Action::DebuggerMode, "Toggle debugger"),
    entry(Action::TimeMachineMode, "Toggle time machine"),
    entry(Action::TogglePauseMode, "Toggle pause"),
    entry(Action::StartPauseMode, "Start pause"),
    entry(Action::ReloadConsole, "Reload console"),
    entry(Action::Fry, "Fry console"),
    entry(Action::ConsoleSelect, "Select"),
    entry(Action::ConsoleReset, "Reset"),
    entry(Action::ConsoleColor, "Color TV"),
    entry(Action::ConsoleBlackWhite, "Black & white TV"),
    entry(Action::ConsoleColorToggle, "Swap color / B&W TV"),
    entry(Action::Console7800Pause, "7800 pause key"),
    entry(Action::ConsoleLeftDiffA, "Left difficulty A"),
    entry(Action::ConsoleLeftDiffB, "Left difficulty B"),
    entry(Action::ConsoleLeftDiffToggle, "Swap left difficulty"),
    entry(Action::ConsoleRightDiffA, "Right difficulty A"),
    entry(Action::ConsoleRightDiffB, "Right difficulty B"),
    entry(Action::ConsoleRightDiffToggle, "Swap right difficulty"),
    entry(Action::SaveState, "Save state"),
    entry(Action::LoadState, "Load state"),
    entry(Action::ChangeState, "Change state slot"),
    entry(Action::ToggleAutoSlot, "Toggle automatic state slot"),
    entry(Action::SaveAllStates, "Save all states"),
    entry(Action::LoadAllStates, "Load all states"),
    entry(Action::RewindPause, "Rewind and pause"),
    entry(Action::UnwindPause, "Unwind and pause"),
    entry(Action::Rewind1Menu, "Rewind one state and open menu"),
    entry(Action::Rewind10Menu, "Rewind 10 states and open menu"),
    entry(Action::RewindAllMenu, "Rewind all states and open menu"),
    entry(Action::Unwind1Menu, "Unwind one state and open menu"),
    entry(Action::Unwind10Menu, "Unwind 10 states and open menu"),
    entry(Action::UnwindAllMenu, "Unwind all states and open menu"),
    entry(Action::TakeSnapshot, "Snapshot"),
    entry(Action::VolumeDecrease, "Decrease volume"),
    entry(Action::VolumeIncrease, "Increase volume"),
    entry(Action::SoundToggle, "Toggle sound"),
    entry(Action::JoystickZeroUp, "P0 joystick up"),
    entry(Action::JoystickZeroDown, "P0 joystick down"),
    entry(Action::JoystickZeroLeft, "P0 joystick left"),
    entry(Action::JoystickZeroRight, "P0 joystick right"),
    entry(Action::JoystickZeroFire, "P0 joystick fire"),
    entry(Action::JoystickZeroFire5, "P0 booster top trigger"),
    entry(Action::JoystickZeroFire9, "P0 Genesis C button"),
    entry(Action::JoystickOneUp, "P1 joystick up"),
    entry(Action::JoystickOneDown, "P1 joystick down"),
    entry(Action::JoystickOneLeft, "P1 joystick left"),
    entry(Action::JoystickOneRight, "P1 joystick right"),
    entry(Action::JoystickOneFire, "P1 joystick fire"),
    entry(Action::JoystickOneFire5, "P1 booster top trigger"),
    entry(Action::JoystickOneFire9, "P1 Genesis C button"),
    entry(Action::PaddleZeroDecrease, "Paddle 0 turn left"),
    entry(Action::PaddleZeroIncrease, "Paddle 0 turn right"),
    entry(Action::PaddleZeroFire, "Paddle 0 fire"),
    entry(Action::PaddleOneDecrease, "Paddle 1 turn left"),
    entry(Action::PaddleOneIncrease, "Paddle 1 turn right"),
    entry(Action::PaddleOneFire, "Paddle 1 fire"),
    entry(Action::PaddleTwoDecrease, "Paddle 2 turn left"),
    entry(Action::PaddleTwoIncrease, "Paddle 2 turn right"),
    entry(Action::PaddleTwoFire, "Paddle 2 fire"),
    entry(Action::PaddleThreeDecrease, "Paddle 3 turn left"),
    entry(Action::PaddleThreeIncrease, "Paddle 3 turn right"),
    entry(Action::PaddleThreeFire, "Paddle 3 fire"),
    entry(Action::KeypadZero1, "P0 keypad 1"),
    entry(Action::KeypadZero2, "P0 keypad 2"),
    entry(Action::KeypadZero3, "P0 keypad 3"),
    entry(Action::KeypadZero4, "P0 keypad 4"),
    entry(Action::KeypadZero5, "P0 keypad 5"),
    entry(Action::KeypadZero6, "P0 keypad 6"),
    entry(Action::KeypadZero7, "P0 keypad 7"),
    entry(Action::KeypadZero8, "P0 keypad 8"),
    entry(Action::KeypadZero9, "P0 keypad 9"),
    entry(Action::KeypadZeroStar, "P0 keypad *"),
    entry(Action::KeypadZero0, "P0 keypad 0"),
    entry(Action::KeypadZeroPound, "P0 keypad #"),
    entry(Action::KeypadOne1, "P1 keypad 1"),
    entry(Action::KeypadOne2, "P1 keypad 2"),
    entry(Action::KeypadOne3, "P1 keypad 3"),
    entry(Action::KeypadOne4, "P1 keypad 4"),
    entry(Action::KeypadOne5, "P1 keypad 5"),
    entry(Action::KeypadOne6, "P1 keypad 6"),
    entry(Action::KeypadOne7, "P1 keypad 7"),
    entry(Action::KeypadOne8, "P1 keypad 8"),
    entry(Action::KeypadOne9, "P1 keypad 9"),
    entry(Action::KeypadOneStar, "P1 keypad *"),
    entry(Action::KeypadOne0, "P1 keypad 0"),
    entry(Action::KeypadOnePound, "P1 keypad #"),
    entry(Action::Combo1, "Combo 1"),
    entry(Action::Combo2, "Combo 2"),
    entry(Action::Combo3, "Combo 3"),
    entry(Action::Combo4, "Combo 4"),
    entry(Action::Combo5, "Combo 5"),
    entry(Action::Combo6, "Combo 6"),
    entry(Action::Combo7, "Combo 7"),
    entry(Action::Combo8, "Combo 8"),
    entry(Action::Combo9, "Combo 9"),
    entry(Action::Combo10, "Combo 10"),
    entry(Action::Combo11, "Combo 11"),
    entry(Action::Combo12, "Combo 12"),
    entry(Action::Combo13, "Combo 13"),
    entry(Action::Combo14, "Combo 14"),
    entry(Action::Combo15, "Combo 15"),
    entry(Action::Combo16, "Combo 16"),
];

/// Actions bindable in menu mode, in action-index order.
pub static MENU_ACTIONS: &[ActionEntry] = &[
    entry(Action::UIUp, "Move up"),
    entry(Action::UIDown, "Move down"),
    entry(Action::UILeft, "Move left"),
    entry(Action::UIRight, "Move right"),
    entry(Action::UIHome, "Home"),
    entry(Action::UIEnd, "End"),
    entry(Action::UIPgUp, "Page up"),
    entry(Action::UIPgDown, "Page down"),
    entry(Action::UISelect, "Select item"),
    entry(Action::UIOk, "OK"),
    entry(Action::UICancel, "Cancel"),
    entry(Action::UINavPrev, "Previous object"),
    entry(Action::UINavNext, "Next object"),
    entry(Action::UITabPrev, "Previous tab"),
    entry(Action::UITabNext, "Next tab"),
    entry(Action::UIPrevDir, "Parent directory"),
];

impl Action {
    /// Bumped whenever the action tables change shape; persisted combo
    /// tables tagged with another version are discarded wholesale.
    pub const VERSION: u32 = 3;

    /// Zero-based combo slot for `Combo1..=Combo16`.
    pub fn combo_slot(self) -> Option<usize> {
        let first = Action::Combo1 as usize;
        let idx = self as usize;
        if (first..first + COMBO_SIZE).contains(&idx) {
            Some(idx - first)
        } else {
            None
        }
    }

    pub fn is_joystick(self) -> bool {
        matches!(
            self,
            Action::JoystickZeroUp
                | Action::JoystickZeroDown
                | Action::JoystickZeroLeft
                | Action::JoystickZeroRight
                | Action::JoystickZeroFire
                | Action::JoystickZeroFire5
                | Action::JoystickZeroFire9
                | Action::JoystickOneUp
                | Action::JoystickOneDown
                | Action::JoystickOneLeft
                | Action::JoystickOneRight
                | Action::JoystickOneFire
                | Action::JoystickOneFire5
                | Action::JoystickOneFire9
        )
    }

    pub fn is_paddle(self) -> bool {
        matches!(
            self,
            Action::PaddleZeroDecrease
                | Action::PaddleZeroIncrease
                | Action::PaddleZeroFire
                | Action::PaddleOneDecrease
                | Action::PaddleOneIncrease
                | Action::PaddleOneFire
                | Action::PaddleTwoDecrease
                | Action::PaddleTwoIncrease
                | Action::PaddleTwoFire
                | Action::PaddleThreeDecrease
                | Action::PaddleThreeIncrease
                | Action::PaddleThreeFire
        )
    }

    pub fn is_keypad(self) -> bool {
        let first = Action::KeypadZero1 as usize;
        let last = Action::KeypadOnePound as usize;
        (first..=last).contains(&(self as usize))
    }

    /// Jack owning a port-specific action (`None` for shared actions).
    pub fn jack(self) -> Option<crate::mode::Jack> {
        use crate::mode::Jack;
        match self {
            Action::JoystickZeroUp
            | Action::JoystickZeroDown
            | Action::JoystickZeroLeft
            | Action::JoystickZeroRight
            | Action::JoystickZeroFire
            | Action::JoystickZeroFire5
            | Action::JoystickZeroFire9
            | Action::PaddleZeroDecrease
            | Action::PaddleZeroIncrease
            | Action::PaddleZeroFire
            | Action::PaddleOneDecrease
            | Action::PaddleOneIncrease
            | Action::PaddleOneFire => Some(Jack::Left),
            Action::JoystickOneUp
            | Action::JoystickOneDown
            | Action::JoystickOneLeft
            | Action::JoystickOneRight
            | Action::JoystickOneFire
            | Action::JoystickOneFire5
            | Action::JoystickOneFire9
            | Action::PaddleTwoDecrease
            | Action::PaddleTwoIncrease
            | Action::PaddleTwoFire
            | Action::PaddleThreeDecrease
            | Action::PaddleThreeIncrease
            | Action::PaddleThreeFire => Some(Jack::Right),
            _ if self.is_keypad() => {
                if (self as usize) < Action::KeypadOne1 as usize {
                    Some(Jack::Left)
                } else {
                    Some(Jack::Right)
                }
            }
            _ => None,
        }
    }

    /// Label from the per-mode tables, if the action is bindable there.
    pub fn label(self, menu: bool) -> Option<&'static str> {
        let table = if menu { MENU_ACTIONS } else { EMUL_ACTIONS };
        table.iter().find(|e| e.action == self).map(|e| e.label)
    }
}

/// Action at `index` in the given table, `NoAction` when out of range.
pub fn action_at(index: usize, menu: bool) -> Action {
    let table = if menu { MENU_ACTIONS } else { EMUL_ACTIONS };
    table.get(index).map_or(Action::NoAction, |e| e.action)
}

/// Table index for an action, if it is bindable in the given table.
pub fn index_of(action: Action, menu: bool) -> Option<usize> {
    let table = if menu { MENU_ACTIONS } else { EMUL_ACTIONS };
    table.iter().position(|e| e.action == action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combo_slots_cover_all_sixteen() {
        assert_eq!(Action::Combo1.combo_slot(), Some(0));
        assert_eq!(Action::Combo16.combo_slot(), Some(15));
        assert_eq!(Action::JoystickZeroUp.combo_slot(), None);
        assert_eq!(Action::NoAction.combo_slot(), None);
    }

    #[test]
    fn action_index_round_trips() {
        for (i, e) in EMUL_ACTIONS.iter().enumerate() {
            assert_eq!(index_of(e.action, false), Some(i));
            assert_eq!(action_at(i, false), e.action);
        }
        assert_eq!(action_at(EMUL_ACTIONS.len(), false), Action::NoAction);
    }

    #[test]
    fn tables_hold_no_duplicates() {
        for (i, a) in EMUL_ACTIONS.iter().enumerate() {
            for b in &EMUL_ACTIONS[i + 1..] {
                assert_ne!(a.action, b.action, "duplicate {:?}", a.action);
            }
        }
    }

    #[test]
    fn family_checks_are_disjoint() {
        for e in EMUL_ACTIONS {
            let hits = [
                e.action.is_joystick(),
                e.action.is_paddle(),
                e.action.is_keypad(),
            ];
            assert!(hits.iter().filter(|h| **h).count() <= 1);
        }
    }
}
