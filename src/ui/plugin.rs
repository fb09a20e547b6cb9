//! UI plugin - menus, pause overlay, end screens, and HUD.

use bevy::prelude::*;

use super::hud;
use crate::core::{GameState, PlayState};

const BUTTON_IDLE: Color = Color::srgb(0.12, 0.14, 0.16);
const BUTTON_HOVERED: Color = Color::srgb(0.2, 0.24, 0.26);
const BUTTON_PRESSED: Color = Color::srgb(0.28, 0.34, 0.36);

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(Update, main_menu_input.run_if(in_state(GameState::MainMenu)))
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)

            // Pause overlay
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(PlayState::Paused)))
            .add_systems(OnExit(PlayState::Paused), cleanup_pause_menu)

            // Caught by a guard
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(Update, end_screen_input.run_if(in_state(GameState::GameOver)))
            .add_systems(OnExit(GameState::GameOver), cleanup_end_screen)

            // Download complete
            .add_systems(OnEnter(GameState::Won), setup_win_screen)
            .add_systems(Update, end_screen_input.run_if(in_state(GameState::Won)))
            .add_systems(OnExit(GameState::Won), cleanup_end_screen);
    }
}

/// Marker for main menu UI entities.
#[derive(Component)]
struct MainMenuUi;

/// Marker for the menu camera (used when no game camera exists).
#[derive(Component)]
struct MenuCamera;

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for game over and win screen entities.
#[derive(Component)]
struct EndScreenUi;

/// Marker for menu buttons.
#[derive(Component, Clone, Copy)]
enum MenuButton {
    NewGame,
    Quit,
    Resume,
    MainMenu,
    Retry,
}

/// Full-screen centred column.
fn overlay_root(background: Color) -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(background),
    )
}

/// Helper to spawn a heading line.
fn spawn_heading(parent: &mut ChildBuilder, text: &str, size: f32, color: Color, gap: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(gap)),
            ..default()
        },
    ));
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.85, 0.85)),
            ));
        });
}

/// Hover/press feedback. Returns the button when it was pressed this frame.
fn pressed_button(
    interaction: &Interaction,
    button: &MenuButton,
    bg_color: &mut BackgroundColor,
) -> Option<MenuButton> {
    match interaction {
        Interaction::Pressed => {
            *bg_color = BUTTON_PRESSED.into();
            Some(*button)
        }
        Interaction::Hovered => {
            *bg_color = BUTTON_HOVERED.into();
            None
        }
        Interaction::None => {
            *bg_color = BUTTON_IDLE.into();
            None
        }
    }
}

/// Set up the main menu.
fn setup_main_menu(mut commands: Commands) {
    // Spawn a camera for UI rendering in menu state
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((overlay_root(Color::srgb(0.03, 0.04, 0.05)), MainMenuUi))
        .with_children(|parent| {
            spawn_heading(parent, "DEAD ZONE", 80.0, Color::srgb(0.55, 0.85, 0.7), 30.0);
            spawn_heading(
                parent,
                "Download the data. Don't get caught.",
                24.0,
                Color::srgb(0.5, 0.55, 0.55),
                20.0,
            );
            spawn_heading(
                parent,
                "A/D move   L dash   Q whistle   E hide/use   C connect   Up/Down ride",
                16.0,
                Color::srgb(0.4, 0.45, 0.45),
                40.0,
            );

            spawn_menu_button(parent, "New Game", MenuButton::NewGame);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Handle main menu button interactions.
fn main_menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match pressed_button(interaction, button, &mut *bg_color) {
            Some(MenuButton::NewGame) => next_state.set(GameState::InGame),
            Some(MenuButton::Quit) => {
                exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}

/// Clean up main menu entities.
fn cleanup_main_menu(
    mut commands: Commands,
    ui_query: Query<Entity, With<MainMenuUi>>,
    camera_query: Query<Entity, With<MenuCamera>>,
) {
    for entity in ui_query.iter().chain(camera_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}

/// Set up the pause overlay. The level stays alive underneath.
fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((overlay_root(Color::srgba(0.0, 0.0, 0.0, 0.7)), PauseMenuUi))
        .with_children(|parent| {
            spawn_heading(parent, "PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85), 40.0);
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Handle pause menu button interactions.
fn pause_menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match pressed_button(interaction, button, &mut *bg_color) {
            Some(MenuButton::Resume) => next_play_state.set(PlayState::Playing),
            Some(MenuButton::MainMenu) => next_state.set(GameState::MainMenu),
            _ => {}
        }
    }
}

/// Clean up pause menu entities.
fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Shared layout of the game over and win screens.
fn spawn_end_screen(commands: &mut Commands, title: &str, title_color: Color, background: Color) {
    // The level (and its camera) is gone by now
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((overlay_root(background), EndScreenUi))
        .with_children(|parent| {
            spawn_heading(parent, title, 72.0, title_color, 60.0);
            spawn_menu_button(parent, "Retry", MenuButton::Retry);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Set up the game over screen.
fn setup_game_over(mut commands: Commands) {
    spawn_end_screen(
        &mut commands,
        "CAUGHT",
        Color::srgb(0.85, 0.2, 0.2),
        Color::srgba(0.1, 0.0, 0.0, 0.9),
    );
}

/// Set up the win screen.
fn setup_win_screen(mut commands: Commands) {
    spawn_end_screen(
        &mut commands,
        "DOWNLOAD COMPLETE",
        Color::srgb(0.3, 0.9, 0.5),
        Color::srgba(0.0, 0.08, 0.04, 0.9),
    );
}

/// Handle game over / win screen button interactions.
fn end_screen_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match pressed_button(interaction, button, &mut *bg_color) {
            Some(MenuButton::Retry) => next_state.set(GameState::InGame),
            Some(MenuButton::MainMenu) => next_state.set(GameState::MainMenu),
            _ => {}
        }
    }
}

/// Clean up end screen entities.
fn cleanup_end_screen(
    mut commands: Commands,
    ui_query: Query<Entity, With<EndScreenUi>>,
    camera_query: Query<Entity, With<MenuCamera>>,
) {
    for entity in ui_query.iter().chain(camera_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}
