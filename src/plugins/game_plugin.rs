use bevy::prelude::*;

use crate::config::{ConfigError, Tuning};
use crate::game::{
    aim::{self, CursorHint},
    animation,
    components::{Muzzle, Player},
    events::{AudioCue, ProjectileSpawnRequest},
    input::{self, InputLink, PlayerInput},
    physics, projectile,
    projectile::ProjectileSpawner,
    weapon::{self, WeaponState},
};

// ── SystemSets (strict FixedUpdate ordering) ────────────────────────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedGameSet {
    InputSet,
    AimSet,
    FireSet,
    MotionSet,
    SignalSet,
    SpawnSet,
    CleanupSet,
}

/// Inserted once setup checks pass. Every fixed set is gated on it.
#[derive(Resource, Debug)]
pub struct SetupVerified;

/// Player avatar: input aggregation, aiming, fire control, motion and signals.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerInput>();
        app.add_message::<InputLink>();
        app.add_message::<ProjectileSpawnRequest>();
        app.add_message::<AudioCue>();
        app.init_resource::<CursorHint>();
        if !app.world().contains_resource::<Tuning>() {
            app.insert_resource(Tuning::default());
        }

        let verified = resource_exists::<SetupVerified>;
        app.configure_sets(
            FixedUpdate,
            (
                FixedGameSet::InputSet.run_if(verified),
                FixedGameSet::AimSet.run_if(verified),
                FixedGameSet::FireSet.run_if(verified),
                FixedGameSet::MotionSet.run_if(verified),
                FixedGameSet::SignalSet.run_if(verified),
                FixedGameSet::SpawnSet.run_if(verified),
                FixedGameSet::CleanupSet.run_if(verified),
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            input::aggregate_input.in_set(FixedGameSet::InputSet),
        );

        // Rotation before fire: the shot leaves along this tick's facing.
        app.add_systems(FixedUpdate, aim::resolve_aim.in_set(FixedGameSet::AimSet));

        app.add_systems(
            FixedUpdate,
            weapon::fire_weapons.in_set(FixedGameSet::FireSet),
        );

        // MotionSet — chained (Velocity written then read)
        app.add_systems(
            FixedUpdate,
            (
                physics::apply_movement,
                physics::integrate_players,
                physics::integrate_projectiles,
            )
                .chain()
                .in_set(FixedGameSet::MotionSet),
        );

        app.add_systems(
            FixedUpdate,
            animation::update_animation_signals.in_set(FixedGameSet::SignalSet),
        );

        app.add_systems(PostStartup, verify_player_setup);
        app.add_systems(Update, apply_tuning.run_if(resource_changed::<Tuning>));
    }
}

/// Projectile collaborator: consumes spawn requests and owns projectile lifetime.
pub struct ProjectileSpawnerPlugin;

impl Plugin for ProjectileSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectileSpawner>();
        app.add_systems(
            FixedUpdate,
            projectile::spawn_projectiles.in_set(FixedGameSet::SpawnSet),
        );
        app.add_systems(
            FixedUpdate,
            projectile::cleanup_ttl.in_set(FixedGameSet::CleanupSet),
        );
    }
}

/// Refuse to start ticking with bad tuning or a missing collaborator.
pub fn verify_player_setup(
    mut commands: Commands,
    tuning: Res<Tuning>,
    spawner: Option<Res<ProjectileSpawner>>,
    players: Query<Entity, With<Player>>,
    unarmed: Query<Entity, (With<Player>, Without<Muzzle>)>,
) -> Result {
    tuning.validate()?;

    if spawner.is_none() {
        return Err(ConfigError::MissingCollaborator {
            what: "projectile spawner",
        }
        .into());
    }
    if let Some(entity) = unarmed.iter().next() {
        error!("{entity:?} has no muzzle");
        return Err(ConfigError::MissingCollaborator { what: "player muzzle" }.into());
    }

    info!("Player setup verified ({} player(s))", players.iter().count());
    commands.insert_resource(SetupVerified);
    Ok(())
}

/// Push tuning values that live outside the `Tuning` resource: the fixed
/// clock and each player's magazine size and muzzle offset.
pub fn apply_tuning(
    tuning: Res<Tuning>,
    fixed: Option<ResMut<Time<Fixed>>>,
    mut weapons: Query<&mut WeaponState>,
    mut muzzles: Query<&mut Muzzle>,
) {
    if let Some(mut fixed) = fixed {
        fixed.set_timestep_seconds(tuning.dt as f64);
    }
    for mut weapon in &mut weapons {
        weapon.set_max_ammo(tuning.max_ammo);
    }
    let offset = tuning.muzzle_offset();
    for mut muzzle in &mut muzzles {
        muzzle.offset = offset;
    }
}
