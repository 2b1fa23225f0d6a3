use bevy::prelude::*;

use super::types::{AngleDeg, Seconds};

/// Request for the projectile spawner. The controller does not track the projectile afterwards.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ProjectileSpawnRequest {
    pub shooter: Entity,
    pub position: Vec2,
    pub rotation: AngleDeg,
    pub impulse: Vec2,
    /// Suggested lifetime; the spawner owns the actual disposal.
    pub ttl: Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Fire,
    Reload,
}

/// Play trigger for the audio collaborator.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCue {
    pub player: Entity,
    pub cue: SoundCue,
}
