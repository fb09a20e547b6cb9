//! Rapier-backed raycasts for guard perception and patrol bounds.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::enemies::{Enemy, HitTag, LayerMask, RayHit, RaycastProbe};
use crate::player::Player;

/// Query data used to tag whatever a ray hit.
pub type ActorTags = (Has<Player>, Has<Enemy>);

/// Collision groups for a collider that belongs to `membership` and is
/// visible to every query.
pub fn collision_groups(membership: LayerMask) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(membership.0), Group::ALL)
}

/// Raycast probe over the physics world, ignoring the casting entity's own collider.
pub struct RapierProbe<'a, 'w, 's> {
    context: &'a RapierContext,
    actors: &'a Query<'w, 's, ActorTags>,
    exclude: Entity,
}

impl<'a, 'w, 's> RapierProbe<'a, 'w, 's> {
    pub fn new(
        context: &'a RapierContext,
        actors: &'a Query<'w, 's, ActorTags>,
        exclude: Entity,
    ) -> Self {
        Self {
            context,
            actors,
            exclude,
        }
    }

    fn tag(&self, entity: Entity) -> HitTag {
        match self.actors.get(entity) {
            Ok((true, _)) => HitTag::Player,
            Ok((_, true)) => HitTag::Enemy,
            _ => HitTag::Obstacle,
        }
    }
}

impl RaycastProbe for RapierProbe<'_, '_, '_> {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }

        let query_filter = QueryFilter::default()
            .groups(CollisionGroups::new(
                Group::ALL,
                Group::from_bits_truncate(filter.0),
            ))
            .exclude_collider(self.exclude);

        let (entity, distance) = self
            .context
            .cast_ray(origin, direction, max_distance, true, query_filter)?;

        Some(RayHit::new(origin + direction * distance, self.tag(entity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Agent, AgentBody};
    use crate::enemies::{perceive, EnemyBrain, EnemyConfig, EnemyId, EnemyState, PlayerSnapshot};
    use crate::world::builder::floor_slab;
    use bevy::ecs::system::SystemState;

    const SIGHT_RANGE: f32 = 5.0;

    fn physics_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            HierarchyPlugin,
            TransformPlugin,
            RapierPhysicsPlugin::<NoUserData>::default(),
        ));
        app
    }

    fn spawn_body(app: &mut App, position: Vec2, half_extents: Vec2, layer: LayerMask) -> Entity {
        app.world_mut()
            .spawn((
                Transform::from_translation(position.extend(0.0)),
                RigidBody::KinematicPositionBased,
                Collider::cuboid(half_extents.x, half_extents.y),
                collision_groups(layer),
            ))
            .id()
    }

    fn spawn_guard(app: &mut App, position: Vec2) -> Entity {
        let guard = spawn_body(app, position, Vec2::new(0.4, 0.8), LayerMask::ENEMIES);
        app.world_mut().entity_mut(guard).insert(Enemy);
        guard
    }

    fn spawn_player(app: &mut App, position: Vec2) -> Entity {
        let player = spawn_body(app, position, Vec2::new(0.4, 0.8), LayerMask::PLAYER);
        app.world_mut().entity_mut(player).insert(Player);
        player
    }

    fn spawn_wall(app: &mut App, position: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Transform::from_translation(position.extend(0.0)),
                RigidBody::Fixed,
                Collider::cuboid(0.25, 1.5),
                collision_groups(LayerMask::WALLS),
            ))
            .id()
    }

    /// Let the physics backend pick up freshly spawned colliders.
    fn settle(app: &mut App) {
        for _ in 0..3 {
            app.update();
        }
    }

    /// Cast the guard's sight ray toward `target` and report what it hit.
    fn sight(app: &mut App, guard: Entity, target: Vec2) -> Option<HitTag> {
        let origin = app.world().get::<Transform>(guard).unwrap().translation.truncate();
        let mut state: SystemState<(Query<&RapierContext>, Query<ActorTags>)> =
            SystemState::new(app.world_mut());
        let (contexts, actors) = state.get(app.world());
        let context = contexts.single();
        let rays = RapierProbe::new(context, &actors, guard);

        let mask = EnemyConfig::default().detection_mask;
        rays.cast(origin, target - origin, SIGHT_RANGE, mask)
            .map(|hit| hit.tag)
    }

    #[test]
    fn test_sight_ray_reaches_player_past_own_collider() {
        let mut app = physics_app();
        let guard = spawn_guard(&mut app, Vec2::new(0.0, 0.8));
        spawn_player(&mut app, Vec2::new(4.0, 0.8));
        settle(&mut app);

        assert_eq!(sight(&mut app, guard, Vec2::new(4.0, 0.8)), Some(HitTag::Player));
    }

    #[test]
    fn test_wall_between_guard_and_player_is_an_obstacle() {
        let mut app = physics_app();
        let guard = spawn_guard(&mut app, Vec2::new(0.0, 0.8));
        spawn_player(&mut app, Vec2::new(4.0, 0.8));
        spawn_wall(&mut app, Vec2::new(2.0, 1.5));
        settle(&mut app);

        assert_eq!(sight(&mut app, guard, Vec2::new(4.0, 0.8)), Some(HitTag::Obstacle));
    }

    #[test]
    fn test_second_guard_in_line_of_sight_is_tagged_enemy() {
        let mut app = physics_app();
        let guard = spawn_guard(&mut app, Vec2::new(0.0, 0.8));
        spawn_guard(&mut app, Vec2::new(2.0, 0.8));
        spawn_player(&mut app, Vec2::new(4.0, 0.8));
        settle(&mut app);

        assert_eq!(sight(&mut app, guard, Vec2::new(4.0, 0.8)), Some(HitTag::Enemy));
    }

    #[test]
    fn test_floor_slab_hides_player_on_the_storey_above() {
        let mut app = physics_app();
        let guard = spawn_guard(&mut app, Vec2::new(4.0, 0.8));
        let upstairs = Vec2::new(5.0, 3.8);
        spawn_player(&mut app, upstairs);
        app.world_mut().spawn(floor_slab(0.0, 0.0, 40.0));
        app.world_mut().spawn(floor_slab(0.0, 3.0, 40.0));
        settle(&mut app);

        assert_eq!(sight(&mut app, guard, upstairs), Some(HitTag::Obstacle));

        // The same slab keeps a full perception pass from spotting the player
        let mut state: SystemState<(Query<&RapierContext>, Query<ActorTags>)> =
            SystemState::new(app.world_mut());
        let (contexts, actors) = state.get(app.world());
        let rays = RapierProbe::new(contexts.single(), &actors, guard);

        let brain = EnemyBrain::new(EnemyId(0), EnemyConfig::default()).unwrap();
        let mut agent = Agent::default();
        let mut transform = Transform::from_xyz(4.0, 0.8, 0.0);
        let mut body = AgentBody::new(&mut agent, &mut transform, None);
        let player = PlayerSnapshot::at(upstairs);

        let result = perceive(&brain, &mut body, &player, &rays);
        assert_eq!(result.state, EnemyState::Idling);
        assert!(!result.clear_idle_target);
    }

    #[test]
    fn test_layer_bits_match_rapier_groups() {
        assert_eq!(Group::from_bits_truncate(LayerMask::WALLS.0), Group::GROUP_1);
        assert_eq!(Group::from_bits_truncate(LayerMask::PLAYER.0), Group::GROUP_2);
        assert_eq!(Group::from_bits_truncate(LayerMask::ENEMIES.0), Group::GROUP_3);
    }

    #[test]
    fn test_collision_groups_membership() {
        let groups = collision_groups(LayerMask::ENEMIES);
        assert_eq!(groups.memberships, Group::GROUP_3);
        assert_eq!(groups.filters, Group::ALL);
    }
}
