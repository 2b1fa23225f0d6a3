use bevy::prelude::*;

use super::components::*;
use super::input::InputState;
use super::types::AngleDeg;
use crate::config::tuning::Tuning;

/// Target linear velocity for a movement input. Sprint scales it.
pub fn movement_velocity(input: &InputState, tuning: &Tuning) -> Vec2 {
    let sprint = if input.sprint_held {
        tuning.sprint_multiplier
    } else {
        1.0
    };
    input.movement * tuning.move_speed * sprint
}

/// Sprite rotation for a facing angle, honoring the art's forward axis.
pub fn sprite_rotation(facing: AngleDeg, tuning: &Tuning) -> Quat {
    Quat::from_rotation_z((facing.0 + tuning.sprite_forward_offset_deg).to_radians())
}

/// MotionSet: copy movement input into velocity.
pub fn apply_movement(
    tuning: Res<Tuning>,
    mut query: Query<(&InputState, &mut Velocity), With<Player>>,
) {
    for (input, mut vel) in &mut query {
        vel.0 = movement_velocity(input, &tuning);
    }
}

/// MotionSet: integrate velocity → position, apply facing to the transform.
pub fn integrate_players(
    tuning: Res<Tuning>,
    mut query: Query<(&mut Transform, &Velocity, &FacingAngle), With<Player>>,
) {
    let dt = tuning.dt;
    for (mut transform, vel, facing) in &mut query {
        transform.translation.x += vel.0.x * dt;
        transform.translation.y += vel.0.y * dt;
        transform.rotation = sprite_rotation(facing.0, &tuning);
    }
}

/// Integrate projectile movement and tick lifetime.
pub fn integrate_projectiles(
    tuning: Res<Tuning>,
    mut query: Query<(&mut Transform, &Velocity, &mut Lifetime), With<ProjectileMarker>>,
) {
    let dt = tuning.dt;
    for (mut transform, vel, mut lifetime) in &mut query {
        transform.translation.x += vel.0.x * dt;
        transform.translation.y += vel.0.y * dt;
        lifetime.0 = lifetime.0.dec(dt);
    }
}
