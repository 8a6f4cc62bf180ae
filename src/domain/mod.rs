//! Domain modules split by discipline.
//! - `controls`: mouse and keyboard into round commands.
//! - `presentation`: board sprites, HUD, menus and overlays.
//! - `simulation`: round rules, timers and authoritative game state.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::{RoundConfig, SimPlugin};
