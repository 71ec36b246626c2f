//! Top-level input dispatch state machine.
//!
//! One [`Dispatcher`] sits between the platform layer's raw input
//! notifications and the emulated machine's input latch. Each raw event
//! is resolved through the keyboard table or the owning stick's table,
//! post-processed (opposite-direction suppression, combo expansion) and
//! then either latched for the core, handed to the active overlay, or
//! intercepted and turned into a [`Host`] callback.
//!
//! The dispatcher is synchronous and poll-driven: the embedding main
//! loop feeds it events and calls [`Dispatcher::poll`] once per frame.
//! Mode transitions clear the latch so no press leaks across a mode
//! boundary, and a "press an input to bind" flow is just a pending
//! rebind consuming the next event instead of dispatching it.

use crate::action::{self, Action, COMBO_SIZE, EVENTS_PER_COMBO};
use crate::config::InputConfig;
use crate::host::Host;
use crate::key_map::{KeyCode, KeyMap, KeyMapping, Mod};
use crate::latch::EventLatch;
use crate::mode::{EventMode, JoyAxis, JoyDir, JoyHat, MouseButton, JOY_CTRL_NONE};
use crate::registry::JoystickRegistry;
use crate::joy_map::JoyMapping;
use log::{debug, info};
use std::collections::HashMap;

/// Axis value below which a move counts as centered.
const AXIS_DEAD_ZONE: i32 = 3200;

/// Application states the dispatcher cycles through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatcherState {
    #[default]
    Uninitialized,
    Emulation,
    Pause,
    OptionsMenu,
    CmdMenu,
    TimeMachine,
    Launcher,
    Debugger,
}

impl DispatcherState {
    /// True when a dialog overlay owns raw text/mouse input.
    pub fn overlay_active(self) -> bool {
        matches!(
            self,
            DispatcherState::OptionsMenu
                | DispatcherState::CmdMenu
                | DispatcherState::TimeMachine
                | DispatcherState::Launcher
                | DispatcherState::Debugger
        )
    }
}

// Port-symmetric actions exchanged by a port swap.
static SWAP_PAIRS: &[(Action, Action)] = &[
    (Action::JoystickZeroUp, Action::JoystickOneUp),
    (Action::JoystickZeroDown, Action::JoystickOneDown),
    (Action::JoystickZeroLeft, Action::JoystickOneLeft),
    (Action::JoystickZeroRight, Action::JoystickOneRight),
    (Action::JoystickZeroFire, Action::JoystickOneFire),
    (Action::JoystickZeroFire5, Action::JoystickOneFire5),
    (Action::JoystickZeroFire9, Action::JoystickOneFire9),
    (Action::PaddleZeroDecrease, Action::PaddleTwoDecrease),
    (Action::PaddleZeroIncrease, Action::PaddleTwoIncrease),
    (Action::PaddleZeroFire, Action::PaddleTwoFire),
    (Action::PaddleOneDecrease, Action::PaddleThreeDecrease),
    (Action::PaddleOneIncrease, Action::PaddleThreeIncrease),
    (Action::PaddleOneFire, Action::PaddleThreeFire),
];

fn swapped(action: Action) -> Action {
    for &(a, b) in SWAP_PAIRS {
        if action == a {
            return b;
        }
        if action == b {
            return a;
        }
    }
    action
}

// Cardinal pairs subject to opposite-direction suppression.
fn opposite_direction(action: Action) -> Option<Action> {
    match action {
        Action::JoystickZeroUp => Some(Action::JoystickZeroDown),
        Action::JoystickZeroDown => Some(Action::JoystickZeroUp),
        Action::JoystickZeroLeft => Some(Action::JoystickZeroRight),
        Action::JoystickZeroRight => Some(Action::JoystickZeroLeft),
        Action::JoystickOneUp => Some(Action::JoystickOneDown),
        Action::JoystickOneDown => Some(Action::JoystickOneUp),
        Action::JoystickOneLeft => Some(Action::JoystickOneRight),
        Action::JoystickOneRight => Some(Action::JoystickOneLeft),
        _ => None,
    }
}

// Starter keyboard layout, installed only over unbound descriptors.
static DEFAULT_EMUL_KEYS: &[(Action, KeyCode, Mod)] = &[
    (Action::JoystickZeroUp, KeyCode::Up, Mod::empty()),
    (Action::JoystickZeroDown, KeyCode::Down, Mod::empty()),
    (Action::JoystickZeroLeft, KeyCode::Left, Mod::empty()),
    (Action::JoystickZeroRight, KeyCode::Right, Mod::empty()),
    (Action::JoystickZeroFire, KeyCode::Space, Mod::empty()),
    (Action::JoystickZeroFire5, KeyCode::Num4, Mod::empty()),
    (Action::JoystickZeroFire9, KeyCode::Num5, Mod::empty()),
    (Action::JoystickOneUp, KeyCode::O, Mod::empty()),
    (Action::JoystickOneDown, KeyCode::L, Mod::empty()),
    (Action::JoystickOneLeft, KeyCode::K, Mod::empty()),
    (Action::JoystickOneRight, KeyCode::Semicolon, Mod::empty()),
    (Action::JoystickOneFire, KeyCode::J, Mod::empty()),
    (Action::ConsoleSelect, KeyCode::F1, Mod::empty()),
    (Action::ConsoleReset, KeyCode::F2, Mod::empty()),
    (Action::ConsoleColor, KeyCode::F3, Mod::empty()),
    (Action::ConsoleBlackWhite, KeyCode::F4, Mod::empty()),
    (Action::ConsoleLeftDiffA, KeyCode::F5, Mod::empty()),
    (Action::ConsoleLeftDiffB, KeyCode::F6, Mod::empty()),
    (Action::ConsoleRightDiffA, KeyCode::F7, Mod::empty()),
    (Action::ConsoleRightDiffB, KeyCode::F8, Mod::empty()),
    (Action::SaveState, KeyCode::F9, Mod::empty()),
    (Action::ChangeState, KeyCode::F10, Mod::empty()),
    (Action::LoadState, KeyCode::F11, Mod::empty()),
    (Action::TakeSnapshot, KeyCode::F12, Mod::empty()),
    (Action::TogglePauseMode, KeyCode::Pause, Mod::empty()),
    (Action::OptionsMenuMode, KeyCode::Tab, Mod::empty()),
    (Action::CmdMenuMode, KeyCode::Backslash, Mod::empty()),
    (Action::TimeMachineMode, KeyCode::T, Mod::SHIFT),
    (Action::DebuggerMode, KeyCode::Backquote, Mod::empty()),
    (Action::ExitMode, KeyCode::Escape, Mod::empty()),
    (Action::Quit, KeyCode::Q, Mod::CTRL),
    (Action::VolumeDecrease, KeyCode::LeftBracket, Mod::ALT),
    (Action::VolumeIncrease, KeyCode::RightBracket, Mod::ALT),
    (Action::SoundToggle, KeyCode::F12, Mod::ALT),
    (Action::RewindPause, KeyCode::Left, Mod::ALT),
    (Action::UnwindPause, KeyCode::Right, Mod::ALT),
];

static DEFAULT_MENU_KEYS: &[(Action, KeyCode, Mod)] = &[
    (Action::UIUp, KeyCode::Up, Mod::empty()),
    (Action::UIDown, KeyCode::Down, Mod::empty()),
    (Action::UILeft, KeyCode::Left, Mod::empty()),
    (Action::UIRight, KeyCode::Right, Mod::empty()),
    (Action::UIHome, KeyCode::Home, Mod::empty()),
    (Action::UIEnd, KeyCode::End, Mod::empty()),
    (Action::UIPgUp, KeyCode::PageUp, Mod::empty()),
    (Action::UIPgDown, KeyCode::PageDown, Mod::empty()),
    (Action::UISelect, KeyCode::Return, Mod::empty()),
    (Action::UICancel, KeyCode::Escape, Mod::empty()),
    (Action::UINavNext, KeyCode::Tab, Mod::empty()),
    (Action::UINavPrev, KeyCode::Tab, Mod::SHIFT),
    (Action::UIPrevDir, KeyCode::Backspace, Mod::empty()),
];

/// The input dispatch core.
pub struct Dispatcher<H: Host> {
    host: H,
    state: DispatcherState,
    latch: EventLatch,
    key_map: KeyMap,
    registry: JoystickRegistry,
    combo_table: [[Action; EVENTS_PER_COMBO]; COMBO_SIZE],
    allow_all_directions: bool,
    swap_ports: bool,
    skip_mouse_motion: bool,
    pending_rebind: Option<(Action, EventMode)>,
    axis_state: HashMap<(i32, JoyAxis), JoyDir>,
    hat_state: HashMap<(i32, i32), JoyHat>,
}

impl<H: Host> Dispatcher<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: DispatcherState::Uninitialized,
            latch: EventLatch::new(),
            key_map: KeyMap::new(),
            registry: JoystickRegistry::new(),
            combo_table: [[Action::NoAction; EVENTS_PER_COMBO]; COMBO_SIZE],
            allow_all_directions: false,
            swap_ports: false,
            skip_mouse_motion: true,
            pending_rebind: None,
            axis_state: HashMap::new(),
            hat_state: HashMap::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn latch(&self) -> &EventLatch {
        &self.latch
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn key_map_mut(&mut self) -> &mut KeyMap {
        &mut self.key_map
    }

    pub fn registry(&self) -> &JoystickRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut JoystickRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn set_allow_all_directions(&mut self, allow: bool) {
        self.allow_all_directions = allow;
    }

    pub fn set_swap_ports(&mut self, swap: bool) {
        self.swap_ports = swap;
    }

    pub fn swap_ports(&self) -> bool {
        self.swap_ports
    }

    /// Binding mode raw input currently resolves against.
    pub fn input_mode(&self) -> EventMode {
        match self.state {
            DispatcherState::Emulation | DispatcherState::Pause => EventMode::Emulation,
            _ => EventMode::Menu,
        }
    }

    /// Enter a new application state: update mute, notify the host,
    /// drop all latched values and swallow the next mouse motion.
    pub fn set_state(&mut self, state: DispatcherState) {
        self.state = state;
        self.host.set_mute(state != DispatcherState::Emulation);
        self.host.state_changed(state);
        self.skip_mouse_motion = true;
        self.latch.clear();
        debug!("dispatcher state is now {state:?}");
    }

    fn change_state_by_action(&mut self, action: Action) -> bool {
        match action {
            Action::TogglePauseMode => match self.state {
                DispatcherState::Emulation => {
                    self.set_state(DispatcherState::Pause);
                    true
                }
                DispatcherState::Pause => {
                    self.set_state(DispatcherState::Emulation);
                    true
                }
                _ => false,
            },
            Action::OptionsMenuMode => {
                if matches!(
                    self.state,
                    DispatcherState::Emulation | DispatcherState::Pause
                ) {
                    self.set_state(DispatcherState::OptionsMenu);
                    true
                } else {
                    false
                }
            }
            Action::CmdMenuMode => match self.state {
                DispatcherState::Emulation | DispatcherState::Pause => {
                    self.set_state(DispatcherState::CmdMenu);
                    true
                }
                DispatcherState::CmdMenu => {
                    self.set_state(DispatcherState::Emulation);
                    true
                }
                _ => false,
            },
            Action::TimeMachineMode => match self.state {
                DispatcherState::Emulation | DispatcherState::Pause => {
                    self.set_state(DispatcherState::TimeMachine);
                    true
                }
                DispatcherState::TimeMachine => {
                    self.set_state(DispatcherState::Emulation);
                    true
                }
                _ => false,
            },
            Action::DebuggerMode => match self.state {
                DispatcherState::Emulation
                | DispatcherState::Pause
                | DispatcherState::TimeMachine => {
                    self.set_state(DispatcherState::Debugger);
                    true
                }
                DispatcherState::Debugger => {
                    self.set_state(DispatcherState::Emulation);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Combined display string of every binding for an action across
    /// the keyboard and all attached sticks, recomputed on demand so it
    /// always reflects the devices currently present.
    pub fn binding_desc(&self, action: Action, mode: EventMode) -> String {
        let keys = self.key_map.action_desc(action, mode);
        let joys = self.registry.map_desc(action, mode);
        match (keys.is_empty(), joys.is_empty()) {
            (true, true) => String::new(),
            (false, true) => keys,
            (true, false) => joys,
            (false, false) => format!("{keys}, {joys}"),
        }
    }

    /// Start a "press an input to bind" flow; the next key, button,
    /// axis or hat event is captured instead of dispatched.
    pub fn begin_rebind(&mut self, action: Action, mode: EventMode) {
        self.pending_rebind = Some((action, mode));
    }

    /// Abandon an in-progress rebind. Nothing was committed, so there
    /// is nothing to roll back.
    pub fn cancel_rebind(&mut self) {
        self.pending_rebind = None;
    }

    pub fn rebinding(&self) -> bool {
        self.pending_rebind.is_some()
    }

    /// Feed a raw keyboard transition.
    pub fn handle_key(&mut self, key: KeyCode, mods: Mod, pressed: bool, repeated: bool) {
        if pressed && !repeated {
            if let Some((action, mode)) = self.pending_rebind.take() {
                self.key_map.add(action, KeyMapping::new(mode, key, mods));
                info!("bound {:?} to {}", action, KeyMapping::new(mode, key, mods));
                return;
            }
        }

        let mode = self.input_mode();
        let action = self.key_map.get(KeyMapping::new(mode, key, mods));
        self.route(action, i32::from(pressed), repeated);
    }

    /// Feed a raw stick button transition.
    pub fn handle_joy_button(&mut self, stick: i32, button: i32, pressed: bool, repeated: bool) {
        if pressed && !repeated {
            if let Some((action, mode)) = self.pending_rebind.take() {
                self.registry
                    .add_mapping(action, mode, stick, JoyMapping::button(mode, button));
                return;
            }
        }

        let mode = self.input_mode();
        let action = self.registry.action_for_button(mode, stick, button);
        self.route(action, i32::from(pressed), repeated);
    }

    /// Feed a raw axis position. Digital edges are derived here: moves
    /// within the dead zone release, a direction change releases the
    /// old side before pressing the new one, and holding a direction
    /// does not re-dispatch.
    pub fn handle_joy_axis(&mut self, stick: i32, axis: JoyAxis, value: i32) {
        let dir = if value.abs() < AXIS_DEAD_ZONE {
            JoyDir::None
        } else {
            JoyDir::from_value(value)
        };

        if dir != JoyDir::None {
            if let Some((action, mode)) = self.pending_rebind.take() {
                self.registry.add_mapping(
                    action,
                    mode,
                    stick,
                    JoyMapping::axis(mode, JOY_CTRL_NONE, axis, dir),
                );
                return;
            }
        }

        let prev = self
            .axis_state
            .get(&(stick, axis))
            .copied()
            .unwrap_or(JoyDir::None);
        if dir == prev {
            return;
        }
        self.axis_state.insert((stick, axis), dir);

        let mode = self.input_mode();
        if prev != JoyDir::None {
            let action = self
                .registry
                .action_for_axis(mode, stick, axis, prev.code());
            self.route(action, 0, false);
        }
        if dir != JoyDir::None {
            let action = self.registry.action_for_axis(mode, stick, axis, value);
            self.route(action, 1, false);
        }
    }

    /// Feed a raw hat transition.
    pub fn handle_joy_hat(&mut self, stick: i32, hat: i32, hdir: JoyHat) {
        if hdir != JoyHat::Center {
            if let Some((action, mode)) = self.pending_rebind.take() {
                self.registry.add_mapping(
                    action,
                    mode,
                    stick,
                    JoyMapping::hat(mode, JOY_CTRL_NONE, hat, hdir),
                );
                return;
            }
        }

        let prev = self
            .hat_state
            .get(&(stick, hat))
            .copied()
            .unwrap_or(JoyHat::Center);
        if hdir == prev {
            return;
        }
        self.hat_state.insert((stick, hat), hdir);

        let mode = self.input_mode();
        if prev != JoyHat::Center {
            let action = self.registry.action_for_hat(mode, stick, hat, prev);
            self.route(action, 0, false);
        }
        if hdir != JoyHat::Center {
            let action = self.registry.action_for_hat(mode, stick, hat, hdir);
            self.route(action, 1, false);
        }
    }

    /// Feed relative mouse motion.
    pub fn handle_mouse_motion(&mut self, x: i32, y: i32, xrel: i32, yrel: i32) {
        if self.state.overlay_active() {
            self.host.overlay_mouse_motion(x, y);
            return;
        }
        if self.state == DispatcherState::Emulation {
            // a state change generates one stray motion event; drop it
            if !self.skip_mouse_motion {
                self.latch.set(Action::MouseAxisXValue, xrel);
                self.latch.set(Action::MouseAxisYValue, yrel);
            }
            self.skip_mouse_motion = false;
        }
    }

    /// Feed a mouse button transition.
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool, x: i32, y: i32) {
        if self.state.overlay_active() {
            self.host.overlay_mouse_button(button, pressed, x, y);
            return;
        }
        if self.state == DispatcherState::Emulation {
            match button {
                MouseButton::Left => self.latch.set(Action::MouseButtonLeftValue, i32::from(pressed)),
                MouseButton::Right => {
                    self.latch.set(Action::MouseButtonRightValue, i32::from(pressed))
                }
                _ => {}
            }
        }
    }

    /// Feed a text character (overlay input only).
    pub fn handle_text(&mut self, ch: char) {
        if self.state.overlay_active() {
            self.host.overlay_text(ch);
        }
    }

    /// Per-frame tick: mouse deltas not consumed this frame are invalid
    /// by the next one.
    pub fn poll(&mut self) {
        self.latch.set(Action::MouseAxisXValue, 0);
        self.latch.set(Action::MouseAxisYValue, 0);
    }

    fn route(&mut self, action: Action, value: i32, repeated: bool) {
        if action == Action::NoAction {
            return;
        }
        if self.state.overlay_active() {
            self.host.overlay_action(action, value != 0);
        } else {
            self.handle_action(action, value, repeated);
        }
    }

    /// Resolve one logical action: suppress impossible directions,
    /// expand combos, intercept host-level actions, latch the rest.
    pub fn handle_action(&mut self, action: Action, value: i32, repeated: bool) {
        let pressed = value != 0;
        let action = if self.swap_ports { swapped(action) } else { action };

        if let Some(opposite) = opposite_direction(action) {
            if pressed && !self.allow_all_directions {
                self.latch.set(opposite, 0);
            }
            if !repeated {
                self.latch.set(action, value);
            }
            return;
        }

        if let Some(slot) = action.combo_slot() {
            // a combo is simply this routine re-entered per entry
            for i in 0..EVENTS_PER_COMBO {
                let sub = self.combo_table[slot][i];
                if sub != Action::NoAction {
                    self.handle_action(sub, value, repeated);
                }
            }
            return;
        }

        match action {
            Action::NoAction => {}

            Action::Fry => {
                if !repeated {
                    self.host.fry_console(pressed);
                }
            }
            Action::ReloadConsole => {
                if pressed && !repeated {
                    self.host.reload_console();
                }
            }
            Action::VolumeDecrease => {
                if pressed {
                    self.host.adjust_volume(-1);
                }
            }
            Action::VolumeIncrease => {
                if pressed {
                    self.host.adjust_volume(1);
                }
            }
            Action::SoundToggle => {
                if pressed && !repeated {
                    self.host.toggle_mute();
                }
            }
            Action::SaveState => {
                if pressed && !repeated {
                    self.host.save_state();
                }
            }
            Action::LoadState => {
                if pressed && !repeated {
                    self.host.load_state();
                }
            }
            Action::SaveAllStates => {
                if pressed && !repeated {
                    self.host.save_all_states();
                }
            }
            Action::LoadAllStates => {
                if pressed && !repeated {
                    self.host.load_all_states();
                }
            }
            Action::ChangeState => {
                if pressed {
                    self.host.change_state_slot();
                }
            }
            Action::ToggleAutoSlot => {
                if pressed {
                    self.host.toggle_auto_slot();
                }
            }
            Action::TakeSnapshot => {
                if pressed && !repeated {
                    self.host.take_snapshot();
                }
            }
            Action::RewindPause => {
                if pressed {
                    self.host.rewind_states(1);
                }
                if self.state == DispatcherState::Emulation {
                    self.set_state(DispatcherState::Pause);
                }
            }
            Action::UnwindPause => {
                if pressed {
                    self.host.unwind_states(1);
                }
                if self.state == DispatcherState::Emulation {
                    self.set_state(DispatcherState::Pause);
                }
            }
            Action::Rewind1Menu => self.rewind_into_menu(pressed, 1, false),
            Action::Rewind10Menu => self.rewind_into_menu(pressed, 10, false),
            Action::RewindAllMenu => self.rewind_into_menu(pressed, 1000, false),
            Action::Unwind1Menu => self.rewind_into_menu(pressed, 1, true),
            Action::Unwind10Menu => self.rewind_into_menu(pressed, 10, true),
            Action::UnwindAllMenu => self.rewind_into_menu(pressed, 1000, true),

            Action::ExitMode => self.exit_current_mode(pressed, repeated),
            Action::Quit => {
                if pressed && !repeated {
                    self.host.quit_requested();
                }
            }
            Action::StartPauseMode => {
                if pressed && !repeated && self.state == DispatcherState::Emulation {
                    self.set_state(DispatcherState::Pause);
                }
            }
            Action::TogglePauseMode
            | Action::OptionsMenuMode
            | Action::CmdMenuMode
            | Action::TimeMachineMode
            | Action::DebuggerMode => {
                if pressed && !repeated {
                    self.change_state_by_action(action);
                }
            }

            Action::ConsoleColor => {
                if pressed && !repeated {
                    self.latch.set(Action::ConsoleBlackWhite, 0);
                    self.latch.set(Action::ConsoleColor, 1);
                    self.host.show_message("Color TV");
                    self.host.switches_updated();
                }
            }
            Action::ConsoleBlackWhite => {
                if pressed && !repeated {
                    self.latch.set(Action::ConsoleBlackWhite, 1);
                    self.latch.set(Action::ConsoleColor, 0);
                    self.host.show_message("B/W TV");
                    self.host.switches_updated();
                }
            }
            Action::ConsoleColorToggle => {
                if pressed && !repeated {
                    if self.latch.get(Action::ConsoleColor) != 0 {
                        self.handle_action(Action::ConsoleBlackWhite, 1, false);
                    } else {
                        self.handle_action(Action::ConsoleColor, 1, false);
                    }
                }
            }
            Action::Console7800Pause => {
                if pressed && !repeated {
                    self.latch.set(Action::Console7800Pause, 1);
                    self.host.switches_updated();
                }
            }
            Action::ConsoleLeftDiffA => {
                if pressed && !repeated {
                    self.latch.set(Action::ConsoleLeftDiffA, 1);
                    self.latch.set(Action::ConsoleLeftDiffB, 0);
                    self.host.show_message("Left difficulty A");
                    self.host.switches_updated();
                }
            }
            Action::ConsoleLeftDiffB => {
                if pressed && !repeated {
                    self.latch.set(Action::ConsoleLeftDiffA, 0);
                    self.latch.set(Action::ConsoleLeftDiffB, 1);
                    self.host.show_message("Left difficulty B");
                    self.host.switches_updated();
                }
            }
            Action::ConsoleLeftDiffToggle => {
                if pressed && !repeated {
                    if self.latch.get(Action::ConsoleLeftDiffA) != 0 {
                        self.handle_action(Action::ConsoleLeftDiffB, 1, false);
                    } else {
                        self.handle_action(Action::ConsoleLeftDiffA, 1, false);
                    }
                }
            }
            Action::ConsoleRightDiffA => {
                if pressed && !repeated {
                    self.latch.set(Action::ConsoleRightDiffA, 1);
                    self.latch.set(Action::ConsoleRightDiffB, 0);
                    self.host.show_message("Right difficulty A");
                    self.host.switches_updated();
                }
            }
            Action::ConsoleRightDiffB => {
                if pressed && !repeated {
                    self.latch.set(Action::ConsoleRightDiffA, 0);
                    self.latch.set(Action::ConsoleRightDiffB, 1);
                    self.host.show_message("Right difficulty B");
                    self.host.switches_updated();
                }
            }
            Action::ConsoleRightDiffToggle => {
                if pressed && !repeated {
                    if self.latch.get(Action::ConsoleRightDiffA) != 0 {
                        self.handle_action(Action::ConsoleRightDiffB, 1, false);
                    } else {
                        self.handle_action(Action::ConsoleRightDiffA, 1, false);
                    }
                }
            }

            _ => {
                // everything else belongs to the machine; held-key
                // repeats must not re-latch an already pressed action
                if !repeated {
                    self.latch.set(action, value);
                }
            }
        }
    }

    fn rewind_into_menu(&mut self, pressed: bool, count: u32, unwind: bool) {
        if !pressed {
            return;
        }
        if unwind {
            self.host.unwind_states(count);
        } else {
            self.host.rewind_states(count);
        }
        if matches!(
            self.state,
            DispatcherState::Emulation | DispatcherState::Pause
        ) {
            self.set_state(DispatcherState::TimeMachine);
        }
    }

    /// Leave whatever mode is active; from emulation this means handing
    /// control back to the launcher.
    fn exit_current_mode(&mut self, pressed: bool, repeated: bool) {
        if !pressed || repeated {
            return;
        }
        match self.state {
            DispatcherState::Pause => {
                self.change_state_by_action(Action::TogglePauseMode);
            }
            DispatcherState::CmdMenu => {
                self.change_state_by_action(Action::CmdMenuMode);
            }
            DispatcherState::TimeMachine => {
                self.change_state_by_action(Action::TimeMachineMode);
            }
            DispatcherState::Emulation => {
                self.set_state(DispatcherState::Launcher);
            }
            _ => {}
        }
    }

    /// Replace one combo slot. Combo actions themselves are not allowed
    /// inside a combo and are stored as `NoAction`.
    pub fn set_combo(&mut self, slot: usize, actions: &[Action]) {
        if slot >= COMBO_SIZE {
            return;
        }
        let mut entry = [Action::NoAction; EVENTS_PER_COMBO];
        for (i, &a) in actions.iter().take(EVENTS_PER_COMBO).enumerate() {
            entry[i] = if a.combo_slot().is_some() { Action::NoAction } else { a };
        }
        self.combo_table[slot] = entry;
    }

    pub fn combo(&self, slot: usize) -> Option<&[Action; EVENTS_PER_COMBO]> {
        self.combo_table.get(slot)
    }

    /// Serialize the combo table: leading slot count, then one
    /// comma-separated group of action indices per slot (`-1` = empty).
    pub fn save_combo_map(&self) -> String {
        let mut out = COMBO_SIZE.to_string();
        for slot in &self.combo_table {
            let group: Vec<String> = slot
                .iter()
                .map(|a| match action::index_of(*a, false) {
                    Some(idx) => idx.to_string(),
                    None => "-1".to_string(),
                })
                .collect();
            out.push(':');
            out.push_str(&group.join(","));
        }
        out
    }

    /// Load a persisted combo table. Any version skew, wrong slot count
    /// or unparsable layout resets every slot to empty rather than
    /// trusting the string halfway.
    pub fn load_combo_map(&mut self, list: &str, version: u32) {
        self.combo_table = [[Action::NoAction; EVENTS_PER_COMBO]; COMBO_SIZE];

        if version != Action::VERSION {
            debug!("combo table version {version} is stale, resetting");
            return;
        }
        let mut groups = list.split(':');
        let count_ok = groups
            .next()
            .and_then(|c| c.parse::<usize>().ok())
            .map_or(false, |c| c == COMBO_SIZE);
        if !count_ok {
            debug!("combo table has unexpected shape, resetting");
            return;
        }

        for (slot, group) in groups.take(COMBO_SIZE).enumerate() {
            for (i, token) in group.split(',').take(EVENTS_PER_COMBO).enumerate() {
                let action = token
                    .parse::<i64>()
                    .ok()
                    .filter(|idx| *idx >= 0)
                    .map_or(Action::NoAction, |idx| action::action_at(idx as usize, false));
                // combos never nest
                self.combo_table[slot][i] = if action.combo_slot().is_some() {
                    Action::NoAction
                } else {
                    action
                };
            }
        }
    }

    /// Latch configured hold-on-startup inputs so the ROM sees them
    /// held during its first frames.
    pub fn apply_startup_holds(&mut self, config: &InputConfig) {
        if config.hold_select {
            self.handle_action(Action::ConsoleSelect, 1, false);
        }
        if config.hold_reset {
            self.handle_action(Action::ConsoleReset, 1, false);
        }
        for (letters, up, down, left, right, fire) in [
            (
                &config.hold_joy0,
                Action::JoystickZeroUp,
                Action::JoystickZeroDown,
                Action::JoystickZeroLeft,
                Action::JoystickZeroRight,
                Action::JoystickZeroFire,
            ),
            (
                &config.hold_joy1,
                Action::JoystickOneUp,
                Action::JoystickOneDown,
                Action::JoystickOneLeft,
                Action::JoystickOneRight,
                Action::JoystickOneFire,
            ),
        ] {
            let letters = letters.to_ascii_uppercase();
            for (letter, act) in [('U', up), ('D', down), ('L', left), ('R', right), ('F', fire)] {
                if letters.contains(letter) {
                    self.handle_action(act, 1, false);
                }
            }
        }
    }

    /// Install the starter keyboard layout over unbound descriptors.
    pub fn set_default_key_mappings(&mut self) {
        for &(action, key, mods) in DEFAULT_EMUL_KEYS {
            let mapping = KeyMapping::new(EventMode::Emulation, key, mods);
            if !self.key_map.check(mapping)
                && self
                    .key_map
                    .mappings_for(action, EventMode::Emulation)
                    .is_empty()
            {
                self.key_map.add(action, mapping);
            }
        }
        for &(action, key, mods) in DEFAULT_MENU_KEYS {
            let mapping = KeyMapping::new(EventMode::Menu, key, mods);
            if !self.key_map.check(mapping)
                && self.key_map.mappings_for(action, EventMode::Menu).is_empty()
            {
                self.key_map.add(action, mapping);
            }
        }
    }

    /// Apply persisted settings: toggles, key maps and the combo table.
    /// Empty mapping strings fall back to the default layout.
    pub fn apply_config(&mut self, config: &InputConfig) {
        self.allow_all_directions = config.allow_all_directions;
        self.swap_ports = config.swap_ports;
        self.key_map.set_mod_enabled(config.use_modifiers);

        if config.keymap_emulation.is_empty() && config.keymap_menu.is_empty() {
            self.set_default_key_mappings();
        } else {
            self.key_map
                .load_mapping(&config.keymap_emulation, EventMode::Emulation);
            self.key_map.load_mapping(&config.keymap_menu, EventMode::Menu);
        }
        self.load_combo_map(&config.combo_map, config.event_version);
    }

    /// Write current settings back into a config record.
    pub fn store_config(&self, config: &mut InputConfig) {
        config.allow_all_directions = self.allow_all_directions;
        config.swap_ports = self.swap_ports;
        config.use_modifiers = self.key_map.mod_enabled();
        config.keymap_emulation = self.key_map.save_mapping(EventMode::Emulation);
        config.keymap_menu = self.key_map.save_mapping(EventMode::Menu);
        config.combo_map = self.save_combo_map();
        config.event_version = Action::VERSION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher<()> {
        let mut d = Dispatcher::new(());
        d.set_default_key_mappings();
        d.set_state(DispatcherState::Emulation);
        d
    }

    #[test]
    fn pressing_up_clears_latched_down() {
        let mut d = dispatcher();
        d.handle_action(Action::JoystickZeroDown, 1, false);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 1);
        d.handle_action(Action::JoystickZeroUp, 1, false);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 0);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 1);
    }

    #[test]
    fn allow_all_directions_keeps_both() {
        let mut d = dispatcher();
        d.set_allow_all_directions(true);
        d.handle_action(Action::JoystickZeroDown, 1, false);
        d.handle_action(Action::JoystickZeroUp, 1, false);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 1);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 1);
    }

    #[test]
    fn releasing_a_direction_does_not_clear_its_opposite() {
        let mut d = dispatcher();
        d.handle_action(Action::JoystickZeroDown, 1, false);
        d.handle_action(Action::JoystickZeroUp, 0, false);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 1);
    }

    #[test]
    fn combo_expands_in_slot_order_skipping_empties() {
        let mut d = dispatcher();
        d.set_combo(
            0,
            &[
                Action::ConsoleSelect,
                Action::NoAction,
                Action::ConsoleReset,
            ],
        );
        d.handle_action(Action::Combo1, 1, false);
        assert_eq!(d.latch().get(Action::ConsoleSelect), 1);
        assert_eq!(d.latch().get(Action::ConsoleReset), 1);
    }

    #[test]
    fn combos_cannot_nest() {
        let mut d = dispatcher();
        d.set_combo(0, &[Action::Combo2, Action::ConsoleSelect]);
        d.set_combo(1, &[Action::ConsoleReset]);
        d.handle_action(Action::Combo1, 1, false);
        assert_eq!(d.latch().get(Action::ConsoleSelect), 1);
        assert_eq!(d.latch().get(Action::ConsoleReset), 0);
    }

    #[test]
    fn repeats_do_not_relatch() {
        let mut d = dispatcher();
        d.handle_action(Action::JoystickZeroFire, 1, false);
        d.handle_action(Action::JoystickZeroFire, 0, false);
        d.handle_action(Action::JoystickZeroFire, 1, true);
        assert_eq!(d.latch().get(Action::JoystickZeroFire), 0);
    }

    #[test]
    fn state_change_clears_latch() {
        let mut d = dispatcher();
        d.handle_action(Action::JoystickZeroFire, 1, false);
        d.set_state(DispatcherState::OptionsMenu);
        assert_eq!(d.latch().get(Action::JoystickZeroFire), 0);
    }

    #[test]
    fn pause_toggles_back_and_forth() {
        let mut d = dispatcher();
        d.handle_action(Action::TogglePauseMode, 1, false);
        assert_eq!(d.state(), DispatcherState::Pause);
        d.handle_action(Action::TogglePauseMode, 1, false);
        assert_eq!(d.state(), DispatcherState::Emulation);
    }

    #[test]
    fn exit_mode_cascades_per_state() {
        let mut d = dispatcher();
        d.handle_action(Action::CmdMenuMode, 1, false);
        assert_eq!(d.state(), DispatcherState::CmdMenu);
        d.handle_action(Action::ExitMode, 1, false);
        assert_eq!(d.state(), DispatcherState::Emulation);
        d.handle_action(Action::ExitMode, 1, false);
        assert_eq!(d.state(), DispatcherState::Launcher);
    }

    #[test]
    fn axis_direction_change_releases_old_side() {
        let mut d = dispatcher();
        let id = d
            .registry_mut()
            .add(crate::device::PhysicalJoystick::new("Pad", 2, 8, 1));
        d.handle_joy_axis(id, JoyAxis::Y, -20000);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 1);
        d.handle_joy_axis(id, JoyAxis::Y, 20000);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 0);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 1);
        d.handle_joy_axis(id, JoyAxis::Y, 0);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 0);
    }

    #[test]
    fn dead_zone_moves_do_not_dispatch() {
        let mut d = dispatcher();
        let id = d
            .registry_mut()
            .add(crate::device::PhysicalJoystick::new("Pad", 2, 8, 1));
        d.handle_joy_axis(id, JoyAxis::Y, -100);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 0);
    }

    #[test]
    fn hat_transitions_release_previous_direction() {
        let mut d = dispatcher();
        let id = d
            .registry_mut()
            .add(crate::device::PhysicalJoystick::new("Pad", 2, 8, 1));
        d.handle_joy_hat(id, 0, JoyHat::Up);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 1);
        d.handle_joy_hat(id, 0, JoyHat::Left);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 0);
        assert_eq!(d.latch().get(Action::JoystickZeroLeft), 1);
        d.handle_joy_hat(id, 0, JoyHat::Center);
        assert_eq!(d.latch().get(Action::JoystickZeroLeft), 0);
    }

    #[test]
    fn unmapped_inputs_are_silently_dropped() {
        let mut d = dispatcher();
        d.handle_joy_button(99, 0, true, false); // no such device
        d.handle_key(KeyCode::Z, Mod::empty(), true, false); // unbound key
        assert_eq!(d.latch().get(Action::JoystickZeroFire), 0);
    }

    #[test]
    fn rebind_captures_next_key_instead_of_dispatching() {
        let mut d = dispatcher();
        d.begin_rebind(Action::ConsoleSelect, EventMode::Emulation);
        d.handle_key(KeyCode::G, Mod::empty(), true, false);
        assert!(!d.rebinding());
        assert_eq!(d.latch().get(Action::ConsoleSelect), 0);
        d.handle_key(KeyCode::G, Mod::empty(), true, false);
        assert_eq!(d.latch().get(Action::ConsoleSelect), 1);
    }

    #[test]
    fn cancel_rebind_leaves_bindings_untouched() {
        let mut d = dispatcher();
        d.begin_rebind(Action::ConsoleSelect, EventMode::Emulation);
        d.cancel_rebind();
        d.handle_key(KeyCode::G, Mod::empty(), true, false);
        assert_eq!(d.latch().get(Action::ConsoleSelect), 0);
    }

    #[test]
    fn port_swap_exchanges_virtual_sticks() {
        let mut d = dispatcher();
        d.set_swap_ports(true);
        d.handle_action(Action::JoystickZeroFire, 1, false);
        assert_eq!(d.latch().get(Action::JoystickOneFire), 1);
        assert_eq!(d.latch().get(Action::JoystickZeroFire), 0);
    }

    #[test]
    fn combo_map_round_trips() {
        let mut d = dispatcher();
        d.set_combo(2, &[Action::SaveState, Action::TakeSnapshot]);
        let saved = d.save_combo_map();

        let mut d2 = dispatcher();
        d2.load_combo_map(&saved, Action::VERSION);
        assert_eq!(d2.combo(2).unwrap()[0], Action::SaveState);
        assert_eq!(d2.combo(2).unwrap()[1], Action::TakeSnapshot);
        assert_eq!(d2.combo(2).unwrap()[2], Action::NoAction);
    }

    #[test]
    fn stale_combo_version_resets_whole_table() {
        let mut d = dispatcher();
        d.set_combo(0, &[Action::SaveState]);
        let saved = d.save_combo_map();

        let mut d2 = dispatcher();
        d2.load_combo_map(&saved, Action::VERSION + 1);
        for slot in 0..COMBO_SIZE {
            assert_eq!(d2.combo(slot).unwrap(), &[Action::NoAction; EVENTS_PER_COMBO]);
        }
    }

    #[test]
    fn wrong_combo_count_resets_whole_table() {
        let mut d = dispatcher();
        d.load_combo_map("4:1,2:3,4:5,6:7,8", Action::VERSION);
        for slot in 0..COMBO_SIZE {
            assert_eq!(d.combo(slot).unwrap(), &[Action::NoAction; EVENTS_PER_COMBO]);
        }
    }

    #[test]
    fn mouse_motion_after_state_change_is_swallowed_once() {
        let mut d = dispatcher();
        d.handle_mouse_motion(10, 10, 5, 5);
        assert_eq!(d.latch().get(Action::MouseAxisXValue), 0);
        d.handle_mouse_motion(12, 12, 2, 2);
        assert_eq!(d.latch().get(Action::MouseAxisXValue), 2);
        d.poll();
        assert_eq!(d.latch().get(Action::MouseAxisXValue), 0);
    }

    #[test]
    fn startup_holds_latch_configured_inputs() {
        let mut d = dispatcher();
        let mut config = InputConfig::default();
        config.hold_select = true;
        config.hold_joy0 = "UF".into();
        d.apply_startup_holds(&config);
        assert_eq!(d.latch().get(Action::ConsoleSelect), 1);
        assert_eq!(d.latch().get(Action::JoystickZeroUp), 1);
        assert_eq!(d.latch().get(Action::JoystickZeroFire), 1);
        assert_eq!(d.latch().get(Action::JoystickZeroDown), 0);
    }
}
