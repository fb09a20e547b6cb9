//! UI module - menus, end screens, and the in-game HUD.

mod hud;
mod plugin;

pub use hud::signal_bars;
pub use plugin::UiPlugin;
