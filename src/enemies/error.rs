//! Errors raised while spawning enemies.

use thiserror::Error;

/// Reasons an enemy cannot be spawned.
///
/// Spawning fails fast instead of producing a guard with nonsense ranges
/// that would silently never detect or always catch the player.
#[derive(Debug, Error, PartialEq)]
pub enum SpawnError {
    /// A tunable is negative, zero where it must be positive, or not finite.
    #[error("Invalid enemy configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    /// The level references an enemy kind with no loaded definition.
    #[error("Unknown enemy kind '{0}'")]
    UnknownKind(String),
}
