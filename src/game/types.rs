use std::time::Duration;

use serde::{Deserialize, Serialize};

// ── Newtypes ────────────────────────────────────────────────────────

/// Duration in seconds. Always >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(pub f32);

impl Seconds {
    pub fn new(v: f32) -> Self {
        Self(v.max(0.0))
    }

    /// Decrement by dt, clamped to 0.
    pub fn dec(self, dt: f32) -> Self {
        Self((self.0 - dt).max(0.0))
    }

    pub fn is_expired(self) -> bool {
        self.0 <= 0.0
    }

    /// Integer-nanosecond form used by the weapon timers, so that repeated
    /// subtraction of a fixed tick cannot drift above zero.
    pub fn to_duration(self) -> Duration {
        Duration::try_from_secs_f32(self.0.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Angle in degrees, normalized to (-180, 180].
///
/// Values already inside the range are stored untouched, so an angle built
/// from `atan2` compares bit-for-bit with the raw conversion.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct AngleDeg(pub f32);

impl AngleDeg {
    pub fn new(v: f32) -> Self {
        Self(wrap_degrees(v))
    }

    /// Heading of a non-zero vector, +X = 0°, counter-clockwise positive.
    pub fn from_direction(x: f32, y: f32) -> Self {
        Self::new(y.atan2(x).to_degrees())
    }

    /// Signed shortest rotation from `self` to `target`, in (-180, 180].
    pub fn shortest_delta(self, target: Self) -> f32 {
        wrap_degrees(target.0 - self.0)
    }

    /// Rotate toward `target` by at most `max_step` degrees along the
    /// shortest path. Lands exactly on `target` when within one step.
    pub fn rotate_towards(self, target: Self, max_step: f32) -> Self {
        let delta = self.shortest_delta(target);
        let max_step = max_step.max(0.0);
        if delta.abs() <= max_step {
            return target;
        }
        Self::new(self.0 + max_step.copysign(delta))
    }

    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Unit vector pointing along this heading.
    pub fn unit(self) -> (f32, f32) {
        let (sin, cos) = self.to_radians().sin_cos();
        (cos, sin)
    }
}

fn wrap_degrees(v: f32) -> f32 {
    if v > -180.0 && v <= 180.0 {
        return v;
    }
    let r = (v + 180.0).rem_euclid(360.0) - 180.0;
    if r <= -180.0 { 180.0 } else { r }
}
