//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! enemy behavior only runs while playing, while menu systems only run
//! in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read enemy and level data
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts or retries
/// - `GameOver` when a guard catches the player
/// - `Won` when the download completes
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// A guard caught the player
    GameOver,
    /// The download finished
    Won,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// Pausing is a sub-state so that resuming does not re-enter `InGame`
/// and rebuild the level.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay
    #[default]
    Playing,
    /// Pause overlay is open, the world is frozen
    Paused,
}
