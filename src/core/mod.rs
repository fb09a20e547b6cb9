//! Core game module - states, events, session flags, and shared building blocks.
//!
//! This module provides the foundation that all other game systems build upon.

mod agent;
mod events;
mod plugin;
mod session;
mod states;
mod tween;

pub use agent::*;
pub use events::*;
pub use plugin::{CorePlugin, GameplaySet};
pub use session::*;
pub use states::*;
pub use tween::*;
