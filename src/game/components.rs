use bevy::prelude::*;

use super::animation::AnimationSignals;
use super::input::InputState;
use super::types::{AngleDeg, Seconds};
use super::weapon::WeaponState;
use crate::config::tuning::Tuning;

// ── Marker components ───────────────────────────────────────────────

#[derive(Component)]
pub struct Player;

#[derive(Component)]
pub struct ProjectileMarker;

// ── Player runtime state ────────────────────────────────────────────

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Current orientation of the avatar. Written only by the aim resolver.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct FacingAngle(pub AngleDeg);

/// Which aim channel drove the facing angle on the last tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AimMode {
    Pointer,
    Directional,
    #[default]
    None,
}

/// Projectile origin, in the avatar's facing frame (+X forward).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Muzzle {
    pub offset: Vec2,
}

// ── Projectile state ────────────────────────────────────────────────

#[derive(Component)]
pub struct ProjectileOwner(pub Entity);

#[derive(Component)]
pub struct Lifetime(pub Seconds);

/// Everything a controllable avatar needs, subscribed to input from the first tick.
pub fn player_bundle(position: Vec2, tuning: &Tuning) -> impl Bundle + use<> {
    (
        Player,
        Transform::from_translation(position.extend(0.0)),
        Velocity::default(),
        FacingAngle::default(),
        AimMode::default(),
        InputState::attached(),
        WeaponState::full(tuning.max_ammo),
        AnimationSignals::default(),
        Muzzle {
            offset: tuning.muzzle_offset(),
        },
    )
}
