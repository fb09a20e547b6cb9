//! World module - levels, floors, and the things the player interacts with.

mod builder;
mod data;
mod door;
mod elevator;
mod error;
mod hideable;
mod hotspot;
mod level;
mod plugin;
mod probe;
mod zones;

pub use builder::LevelEntity;
pub use data::{CurrentLevel, EnemySpawn, LevelDefinition, LevelRegistry};
pub use door::Door;
pub use elevator::{Elevator, ElevatorStep, ElevatorTravel};
pub use error::DataLoadError;
pub use hideable::Hideable;
pub use hotspot::{best_available, signal_tier, Hotspot, SignalCurve, MIN_SIGNAL};
pub use level::Level;
pub use plugin::{setup_level, GameCamera, WorldPlugin};
pub use probe::{collision_groups, ActorTags, RapierProbe};
pub use zones::{TriggerZone, ZoneOccupancy, ZoneTransition};
