//! Player-related components and configuration.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::core::Agent;
use crate::enemies::PlayerSnapshot;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Stealth and interaction flags read by guards and world systems.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PlayerStatus {
    /// Hidden inside a hideable object
    pub concealed: bool,
    /// Whistle held; guards turn toward the player
    pub signaling: bool,
    /// Dash active; guards cannot catch the player
    pub evasive: bool,
    /// Riding an elevator; input is ignored
    pub frozen: bool,
    pub floor: i32,
    /// Hideable zone the player is standing in
    pub nearby_hideable: Option<Entity>,
}

impl PlayerStatus {
    /// What guards get to see of the player this frame.
    pub fn snapshot(&self, transform: &Transform, agent: &Agent) -> PlayerSnapshot {
        PlayerSnapshot {
            position: transform.translation.truncate(),
            facing_right: agent.facing_right,
            concealed: self.concealed,
            signaling: self.signaling,
            evasive: self.evasive,
        }
    }

    pub fn approach_hideable(&mut self, hideable: Entity) {
        self.nearby_hideable = Some(hideable);
    }

    /// Walking out of a hideable always reveals the player.
    pub fn leave_hideable(&mut self) {
        self.concealed = false;
        self.nearby_hideable = None;
    }

    /// Hide or come out. Only possible next to a hideable. Returns whether anything changed.
    pub fn toggle_hidden(&mut self) -> bool {
        if self.nearby_hideable.is_none() {
            return false;
        }
        self.concealed = !self.concealed;
        true
    }
}

/// Download progress toward the level's data goal.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    pub downloaded: f32,
    pub target: f32,
    /// Hotspot the player is connected to
    pub connected: Option<Entity>,
    /// Signal strength of the connection this frame, 0 when disconnected
    pub signal: f32,
}

impl DownloadProgress {
    pub fn new(target: f32) -> Self {
        Self {
            downloaded: 0.0,
            target,
            connected: None,
            signal: 0.0,
        }
    }

    /// Downloaded share of the goal in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.target <= 0.0 {
            return 1.0;
        }
        (self.downloaded / self.target).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0) as u32
    }

    pub fn connect(&mut self, hotspot: Entity) {
        self.connected = Some(hotspot);
    }

    pub fn disconnect(&mut self) {
        self.connected = None;
        self.signal = 0.0;
    }

    pub fn receive(&mut self, amount: f32) {
        self.downloaded += amount;
    }

    /// Close enough to the goal to count as done. Snaps to the goal when it is.
    ///
    /// Hotspots hand out data in fractions, so the goal counts as reached
    /// within `margin` below it.
    pub fn try_complete(&mut self, margin: f32) -> bool {
        if self.downloaded + margin < self.target {
            return false;
        }
        self.downloaded = self.target;
        true
    }
}

/// Player tuning loaded from assets/data/config/player.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Speed multiplier while dashing
    pub dash_multiplier: f32,
    pub dash_duration: f32,
    /// Seconds after a dash before the next one is allowed
    pub dash_cooldown: f32,
    /// Seconds between dash-trail ghosts
    pub ghost_spawn_delay: f32,
    /// Seconds each ghost stays visible
    pub ghost_display_time: f32,
    /// Slack allowed when checking the download goal
    pub rounding_margin: f32,
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
    pub hidden_color: (f32, f32, f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            dash_multiplier: 4.0,
            dash_duration: 0.25,
            dash_cooldown: 1.0,
            ghost_spawn_delay: 0.1,
            ghost_display_time: 0.2,
            rounding_margin: 1.0,
            size: (0.6, 1.6),
            color: (0.85, 0.85, 0.75),
            hidden_color: (0.3, 0.3, 0.3, 0.5),
        }
    }
}

impl PlayerConfig {
    /// Load player config from RON file.
    pub fn load() -> Self {
        let path = "assets/data/config/player.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded player config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    pub fn visible_color(&self) -> Color {
        Color::srgb(self.color.0, self.color.1, self.color.2)
    }

    pub fn concealed_color(&self) -> Color {
        let (r, g, b, a) = self.hidden_color;
        Color::srgba(r, g, b, a)
    }
}

/// System to load player config at startup.
pub fn load_player_config(mut commands: Commands) {
    commands.insert_resource(PlayerConfig::load());
}
