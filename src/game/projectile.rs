use bevy::prelude::*;

use super::components::*;
use super::events::ProjectileSpawnRequest;
use crate::config::tuning::Tuning;

/// Marks that a projectile spawner consumes `ProjectileSpawnRequest`s in this app.
#[derive(Resource, Debug, Default)]
pub struct ProjectileSpawner {
    pub spawned: u64,
}

/// SpawnSet: turn spawn requests into projectile entities.
pub fn spawn_projectiles(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut spawner: ResMut<ProjectileSpawner>,
    mut requests: MessageReader<ProjectileSpawnRequest>,
) {
    for request in requests.read() {
        let transform = Transform::from_translation(request.position.extend(0.5))
            .with_rotation(Quat::from_rotation_z(request.rotation.to_radians()));

        commands.spawn((
            ProjectileMarker,
            transform,
            Velocity(request.impulse / tuning.projectile_mass),
            ProjectileOwner(request.shooter),
            Lifetime(request.ttl),
        ));
        spawner.spawned += 1;
    }
}

/// CleanupSet: despawn projectiles whose lifetime ran out.
pub fn cleanup_ttl(
    mut commands: Commands,
    projectiles: Query<(Entity, &Lifetime), With<ProjectileMarker>>,
) {
    for (entity, lifetime) in &projectiles {
        if lifetime.0.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}
