//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::EnemyConfig;
use crate::world::DataLoadError;

fn default_idle_speed() -> f32 {
    0.5
}

fn default_chase_speed() -> f32 {
    1.0
}

fn default_fallback_radius() -> f32 {
    3.0
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    /// Agent speed in units per second
    pub move_speed: f32,
    pub detection_range: f32,
    pub catch_range: f32,
    pub waiting_time: f32,
    #[serde(default = "default_idle_speed")]
    pub idle_speed: f32,
    #[serde(default = "default_chase_speed")]
    pub chase_speed: f32,
    #[serde(default = "default_fallback_radius")]
    pub fallback_wander_radius: f32,
    /// Sprite width and height
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
    /// Tint while chasing
    pub alert_color: (f32, f32, f32),
}

impl EnemyDefinition {
    /// Convert to the behavior configuration.
    pub fn to_config(&self) -> EnemyConfig {
        EnemyConfig {
            detection_range: self.detection_range,
            catch_range: self.catch_range,
            waiting_time: self.waiting_time,
            idle_speed: self.idle_speed,
            chase_speed: self.chase_speed,
            fallback_wander_radius: self.fallback_wander_radius,
            ..default()
        }
    }

    /// Parse a definition from RON text.
    pub fn parse(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            let loaded = fs::read_to_string(&path)
                .map_err(|e| DataLoadError::ReadError {
                    path: path.display().to_string(),
                    details: e.to_string(),
                })
                .and_then(|contents| EnemyDefinition::parse(&path.display().to_string(), &contents));

            match loaded {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    registry.definitions.insert(enemy_type, definition);
                }
                Err(e) => error!("{}", e),
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARD: &str = r#"(
        name: "Guard",
        move_speed: 5.0,
        detection_range: 5.0,
        catch_range: 1.0,
        waiting_time: 3.0,
        size: (0.6, 1.6),
        color: (0.3, 0.3, 0.6),
        alert_color: (0.9, 0.2, 0.2),
    )"#;

    #[test]
    fn test_parse_definition_with_defaults() {
        let definition = EnemyDefinition::parse("guard.ron", GUARD).unwrap();
        assert_eq!(definition.name, "Guard");
        assert_eq!(definition.idle_speed, 0.5);

        let config = definition.to_config();
        assert_eq!(config.detection_range, 5.0);
        assert_eq!(config.catch_range, 1.0);
        assert_eq!(config.chase_speed, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = EnemyDefinition::parse("broken.ron", "(name: )").unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_shipped_definitions_are_valid() {
        for name in ["guard", "security_chief"] {
            let path = format!("assets/data/enemies/{}.ron", name);
            let contents = fs::read_to_string(&path).unwrap();
            let definition = EnemyDefinition::parse(&path, &contents).unwrap();
            assert!(definition.to_config().validate().is_ok(), "{}", name);
        }
    }
}
