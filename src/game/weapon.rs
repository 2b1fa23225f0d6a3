use std::time::Duration;

use bevy::prelude::*;

use super::components::{FacingAngle, Muzzle, Player};
use super::events::{AudioCue, ProjectileSpawnRequest, SoundCue};
use super::input::InputState;
use super::types::{AngleDeg, Seconds};
use crate::config::tuning::Tuning;

/// Ammunition, cooldown and reload timer of one avatar's weapon.
///
/// Timers are `Duration`s so a fixed tick subtracts whole nanoseconds and a
/// 0.5 s cooldown at 60 Hz expires on exactly the 30th tick.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct WeaponState {
    pub current_ammo: u32,
    pub max_ammo: u32,
    pub cooldown_remaining: Duration,
    pub is_reloading: bool,
    pub reload_remaining: Duration,
    /// Set when a reload starts; cleared once the trigger is seen released.
    pub awaiting_trigger_release: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FireParams {
    pub fire_rate_period: Duration,
    pub reload_duration: Duration,
    pub dt: Duration,
}

impl FireParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            fire_rate_period: tuning.fire_rate_period().to_duration(),
            reload_duration: tuning.reload_duration().to_duration(),
            dt: Seconds::new(tuning.dt).to_duration(),
        }
    }
}

/// What happened to a weapon during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireOutcome {
    pub fired: bool,
    pub reload_started: bool,
    pub reload_finished: bool,
}

impl WeaponState {
    /// Fresh weapon: full magazine, no cooldown, not reloading.
    pub fn full(max_ammo: u32) -> Self {
        Self {
            current_ammo: max_ammo,
            max_ammo,
            cooldown_remaining: Duration::ZERO,
            is_reloading: false,
            reload_remaining: Duration::ZERO,
            awaiting_trigger_release: false,
        }
    }

    /// Resize the magazine, keeping at most `max_ammo` rounds loaded.
    pub fn set_max_ammo(&mut self, max_ammo: u32) {
        self.max_ammo = max_ammo;
        self.current_ammo = self.current_ammo.min(max_ammo);
    }

    pub fn can_fire(&self) -> bool {
        !self.is_reloading
            && !self.awaiting_trigger_release
            && self.current_ammo > 0
            && self.cooldown_remaining.is_zero()
    }

    /// Advance the weapon by one tick.
    pub fn tick(&mut self, fire_held: bool, params: &FireParams) -> FireOutcome {
        let mut outcome = FireOutcome::default();
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(params.dt);

        if self.is_reloading {
            self.reload_remaining = self.reload_remaining.saturating_sub(params.dt);
            if self.reload_remaining.is_zero() {
                self.current_ammo = self.max_ammo;
                self.is_reloading = false;
                outcome.reload_finished = true;
            }
            return outcome;
        }

        if !fire_held {
            self.awaiting_trigger_release = false;
        }

        if fire_held && self.can_fire() {
            self.cooldown_remaining = params.fire_rate_period;
            self.current_ammo -= 1;
            outcome.fired = true;
        }

        if self.current_ammo == 0 {
            self.is_reloading = true;
            self.reload_remaining = params.reload_duration;
            self.awaiting_trigger_release = true;
            outcome.reload_started = true;
        }

        outcome
    }
}

/// World-space muzzle position and heading for an avatar at `position` facing `facing`.
pub fn muzzle_pose(position: Vec2, facing: AngleDeg, muzzle: &Muzzle) -> (Vec2, AngleDeg) {
    let rotation = Vec2::from_angle(facing.to_radians());
    (position + rotation.rotate(muzzle.offset), facing)
}

/// FireSet: run each weapon's state machine and emit spawn requests and audio cues.
pub fn fire_weapons(
    tuning: Res<Tuning>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &FacingAngle,
            &Muzzle,
            &InputState,
            &mut WeaponState,
        ),
        With<Player>,
    >,
    mut spawns: MessageWriter<ProjectileSpawnRequest>,
    mut cues: MessageWriter<AudioCue>,
) {
    let params = FireParams::from_tuning(&tuning);
    let ttl = Seconds::new(tuning.projectile_ttl);

    for (entity, transform, facing, muzzle, input, mut weapon) in &mut players {
        let outcome = weapon.tick(input.fire_held, &params);

        if outcome.fired {
            let (position, rotation) =
                muzzle_pose(transform.translation.truncate(), facing.0, muzzle);
            let (x, y) = rotation.unit();
            spawns.write(ProjectileSpawnRequest {
                shooter: entity,
                position,
                rotation,
                impulse: Vec2::new(x, y) * tuning.fire_force,
                ttl,
            });
            cues.write(AudioCue {
                player: entity,
                cue: SoundCue::Fire,
            });
        }

        if outcome.reload_started {
            info!("{entity:?} reloading ({:.3}s)", tuning.reload_duration);
            cues.write(AudioCue {
                player: entity,
                cue: SoundCue::Reload,
            });
        }

        if outcome.reload_finished {
            debug!("{entity:?} reloaded to {}", weapon.current_ammo);
        }
    }
}
