//! Narrow interface toward the surrounding emulator and GUI layers.

use crate::action::Action;
use crate::dispatcher::DispatcherState;
use crate::mode::MouseButton;

/// Callbacks the dispatcher invokes on the embedding application.
///
/// Intercepted actions (volume, snapshots, state save/load, quitting)
/// and mode transitions land here instead of in the input latch; overlay
/// methods carry resolved menu actions and raw text/mouse input to
/// whichever dialog is active. Every method defaults to a no-op so hosts
/// implement only what they care about.
pub trait Host {
    fn adjust_volume(&mut self, _delta: i32) {}
    fn toggle_mute(&mut self) {}
    fn set_mute(&mut self, _muted: bool) {}

    fn save_state(&mut self) {}
    fn load_state(&mut self) {}
    fn save_all_states(&mut self) {}
    fn load_all_states(&mut self) {}
    fn change_state_slot(&mut self) {}
    fn toggle_auto_slot(&mut self) {}
    fn rewind_states(&mut self, _count: u32) {}
    fn unwind_states(&mut self, _count: u32) {}

    fn take_snapshot(&mut self) {}
    fn reload_console(&mut self) {}
    fn fry_console(&mut self, _held: bool) {}
    fn quit_requested(&mut self) {}

    /// Console switch latches changed; the machine should re-read them.
    fn switches_updated(&mut self) {}

    /// The dispatcher entered a new state.
    fn state_changed(&mut self, _state: DispatcherState) {}

    fn show_message(&mut self, _message: &str) {}

    /// Resolved menu-mode action for the active overlay.
    fn overlay_action(&mut self, _action: Action, _pressed: bool) {}
    /// Raw text input for the active overlay.
    fn overlay_text(&mut self, _ch: char) {}
    fn overlay_mouse_motion(&mut self, _x: i32, _y: i32) {}
    fn overlay_mouse_button(&mut self, _button: MouseButton, _pressed: bool, _x: i32, _y: i32) {}
}

/// Host that ignores everything; handy for tests and headless use.
impl Host for () {}
