//! Jackline — input mapping and dispatch core for a two-jack console
//! emulator.
//!
//! Provides binding tables between physical inputs (keys, stick
//! buttons/axes/hats, mouse) and logical emulator actions, a registry of
//! hot-pluggable stick devices with remembered per-device mappings,
//! controller autodetection from ROM bytes, and the dispatch state
//! machine that resolves raw input into the emulated machine's input
//! latch.
//!
//! The crate is synchronous and poll-driven; the embedding application
//! feeds raw events into [`Dispatcher`] from its main loop and
//! implements [`Host`] for everything that happens outside this core.

pub mod action;
pub mod config;
pub mod detector;
pub mod device;
pub mod dispatcher;
pub mod host;
pub mod joy_map;
pub mod key_map;
pub mod latch;
pub mod mode;
pub mod registry;

pub use action::{Action, ActionEntry, COMBO_SIZE, EVENTS_PER_COMBO};
pub use config::{ConfigError, InputConfig};
pub use detector::{detect, resolve_controller, ControllerKind};
pub use device::PhysicalJoystick;
pub use dispatcher::{Dispatcher, DispatcherState};
pub use host::Host;
pub use joy_map::{JoyMap, JoyMapping};
pub use key_map::{KeyCode, KeyMap, KeyMapping, Mod};
pub use latch::EventLatch;
pub use mode::{EventMode, Jack, JoyAxis, JoyDir, JoyHat, MouseButton};
pub use registry::{JoystickRegistry, MappingStore};
