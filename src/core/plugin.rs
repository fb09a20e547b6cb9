//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::agent::sync_agent_sprites;
use super::events::*;
use super::session::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.) and the pause sub-state
/// - Global events (SoundEvent, ChaseChangedEvent)
/// - The session outcome resource and the transitions it drives
/// - The per-frame ordering of gameplay systems (`GameplaySet`)
pub struct CorePlugin;

/// Per-frame order of gameplay. Every set only runs while playing.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Player input, dash, hiding
    Input,
    /// Trigger zones and floor tracking
    Zones,
    /// Guard perception and movement
    Enemies,
    /// Hotspots, download, doors, elevators
    Devices,
    /// Visual feedback and HUD
    Presentation,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<SoundEvent>()
            .add_event::<ChaseChangedEvent>()

            .init_resource::<GameSession>()

            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Zones,
                    GameplaySet::Enemies,
                    GameplaySet::Devices,
                    GameplaySet::Presentation,
                )
                    .chain()
                    .run_if(in_state(PlayState::Playing)),
            )

            // Data loaders run on entering Loading; the transition applies next frame
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)
            .add_systems(OnEnter(GameState::InGame), reset_session)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                follow_session_outcome.run_if(in_state(GameState::InGame)),
            )
            .add_systems(Update, sync_agent_sprites);
    }
}

/// Move on to the main menu once the loaders have run.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Playing => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Playing),
        }
    }
}
