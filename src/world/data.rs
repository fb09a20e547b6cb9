//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use super::hotspot::SignalCurve;

fn default_floor_height() -> f32 {
    3.0
}

fn default_data_to_download() -> f32 {
    20.0
}

fn default_true() -> bool {
    true
}

fn default_range() -> f32 {
    5.0
}

fn default_floor_penalty() -> f32 {
    0.4
}

fn default_bandwidth() -> f32 {
    0.1
}

fn default_available_data() -> f32 {
    1.0
}

fn default_pulse_period() -> f32 {
    3.0
}

fn default_door_reach() -> f32 {
    1.0
}

fn default_travel_time() -> f32 {
    2.6
}

/// Solid block on the walls layer.
#[derive(Debug, Clone, Deserialize)]
pub struct WallDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

/// A guard placed in the level.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawn {
    /// Enemy type identifier (matches EnemyRegistry key)
    pub kind: String,
    pub position: (f32, f32),
    #[serde(default = "default_true")]
    pub facing_right: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotspotDef {
    pub position: (f32, f32),
    #[serde(default = "default_range")]
    pub range: f32,
    #[serde(default = "default_floor_penalty")]
    pub floor_penalty: f32,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: f32,
    #[serde(default = "default_available_data")]
    pub available_data: f32,
    #[serde(default)]
    pub curve: SignalCurve,
    /// Seconds for one ring to grow to full range
    #[serde(default = "default_pulse_period")]
    pub pulse_period: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HideableDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoorDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    /// How far either side of the door the player can reach the handle
    #[serde(default = "default_door_reach")]
    pub reach: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElevatorDef {
    /// Shaft centre
    pub x: f32,
    /// Cabin width and height
    pub size: (f32, f32),
    #[serde(default)]
    pub start_floor: i32,
    #[serde(default)]
    pub min_floor: i32,
    pub max_floor: i32,
    #[serde(default = "default_travel_time")]
    pub travel_time: f32,
}

/// Level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    #[serde(default = "default_floor_height")]
    pub floor_height: f32,
    /// Number of storeys, starting at floor 0
    pub floors: i32,
    /// Left and right end of every floor slab
    pub extent: (f32, f32),
    pub player_start: (f32, f32),
    #[serde(default = "default_data_to_download")]
    pub data_to_download: f32,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub hotspots: Vec<HotspotDef>,
    #[serde(default)]
    pub hideables: Vec<HideableDef>,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub elevators: Vec<ElevatorDef>,
}

impl LevelDefinition {
    /// Parse a level from RON text and reject out-of-range values.
    pub fn parse(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        let level: Self = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        level.validate(path)?;
        Ok(level)
    }

    /// Check every tunable the way `EnemyConfig::validate` checks guards.
    pub fn validate(&self, path: &str) -> Result<(), DataLoadError> {
        let invalid = |field: &'static str, value: f32| DataLoadError::InvalidValue {
            path: path.to_string(),
            field,
            value,
        };

        let mut positive = vec![("floor_height", self.floor_height)];
        let mut non_negative = vec![("data_to_download", self.data_to_download)];
        for hotspot in &self.hotspots {
            positive.push(("hotspot.range", hotspot.range));
            positive.push(("hotspot.pulse_period", hotspot.pulse_period));
            non_negative.push(("hotspot.bandwidth", hotspot.bandwidth));
            non_negative.push(("hotspot.available_data", hotspot.available_data));
        }
        for elevator in &self.elevators {
            non_negative.push(("elevator.travel_time", elevator.travel_time));
        }

        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, value));
            }
        }
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, value));
            }
        }

        if self.floors < 1 {
            return Err(invalid("floors", self.floors as f32));
        }
        for elevator in &self.elevators {
            if elevator.min_floor > elevator.max_floor {
                return Err(invalid("elevator.max_floor", elevator.max_floor as f32));
            }
        }
        Ok(())
    }
}

/// Resource holding all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level definition by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }

    /// Like `get`, but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&LevelDefinition, DataLoadError> {
        self.get(name)
            .ok_or_else(|| DataLoadError::UnknownLevel(name.to_string()))
    }
}

/// Resource tracking the currently selected level.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "office".to_string(),
        }
    }
}

/// Load all level definitions from the assets/data/levels/ directory.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    let levels_dir = Path::new("assets/data/levels");

    if !levels_dir.exists() {
        warn!("Levels directory not found: {:?}", levels_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(levels_dir) else {
        warn!("Failed to read levels directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let display = path.display().to_string();
        let loaded = fs::read_to_string(&path)
            .map_err(|e| DataLoadError::ReadError {
                path: display.clone(),
                details: e.to_string(),
            })
            .and_then(|contents| LevelDefinition::parse(&display, &contents));

        match loaded {
            Ok(level) => {
                info!("Loaded level: {} ({})", level.name, name);
                registry.levels.insert(name, level);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} levels", registry.levels.len());
}
