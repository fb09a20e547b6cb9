//! In-game HUD - download progress, signal strength, and the hidden indicator.

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::{DownloadProgress, Player, PlayerStatus};
use crate::world::signal_tier;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the download bar fill.
#[derive(Component)]
pub struct DownloadBar;

/// Marker for the download percentage label.
#[derive(Component)]
pub struct DownloadLabel;

/// Marker for the signal strength label.
#[derive(Component)]
pub struct SignalLabel;

/// Marker for the "hidden" indicator.
#[derive(Component)]
pub struct HiddenIndicator;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_download, update_signal, update_hidden_indicator)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Bars shown for a signal tier.
pub fn signal_bars(tier: u8) -> &'static str {
    match tier {
        0 => "no signal",
        1 => "|..",
        2 => "||.",
        _ => "|||",
    }
}

fn label(text: &str, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Phone readout (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                label("Downloading: 0%", 18.0, Color::srgb(0.75, 0.9, 0.8)),
                DownloadLabel,
            ));

            // Bar background
            parent
                .spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(10.0),
                        margin: UiRect::vertical(Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    // Bar fill
                    bg.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.2, 0.8, 0.5)),
                        DownloadBar,
                    ));
                });

            parent.spawn((
                label("Signal: no signal", 16.0, Color::srgb(0.7, 0.7, 0.75)),
                SignalLabel,
            ));

            parent.spawn((
                label("HIDDEN", 22.0, Color::srgb(0.6, 0.6, 0.9)),
                Node {
                    margin: UiRect::top(Val::Px(12.0)),
                    ..default()
                },
                Visibility::Hidden,
                HiddenIndicator,
            ));
        });
}

/// Update download label and bar from the player's progress.
fn update_download(
    player_query: Query<&DownloadProgress, (With<Player>, Changed<DownloadProgress>)>,
    mut label_query: Query<&mut Text, With<DownloadLabel>>,
    mut bar_query: Query<&mut Node, With<DownloadBar>>,
) {
    let Ok(download) = player_query.get_single() else {
        return;
    };

    if let Ok(mut text) = label_query.get_single_mut() {
        text.0 = format!("Downloading: {}%", download.percent());
    }
    if let Ok(mut bar) = bar_query.get_single_mut() {
        bar.width = Val::Percent(download.fraction() * 100.0);
    }
}

/// Show the connection's signal tier.
fn update_signal(
    player_query: Query<&DownloadProgress, (With<Player>, Changed<DownloadProgress>)>,
    mut label_query: Query<&mut Text, With<SignalLabel>>,
) {
    let Ok(download) = player_query.get_single() else {
        return;
    };
    let Ok(mut text) = label_query.get_single_mut() else {
        return;
    };

    let strength = if download.connected.is_some() { download.signal } else { 0.0 };
    text.0 = format!("Signal: {}", signal_bars(signal_tier(strength)));
}

/// Show "HIDDEN" while the player is concealed.
fn update_hidden_indicator(
    player_query: Query<&PlayerStatus, (With<Player>, Changed<PlayerStatus>)>,
    mut indicator_query: Query<&mut Visibility, With<HiddenIndicator>>,
) {
    let Ok(status) = player_query.get_single() else {
        return;
    };
    let Ok(mut visibility) = indicator_query.get_single_mut() else {
        return;
    };

    *visibility = if status.concealed {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
