use bevy::prelude::*;

use super::components::{AimMode, FacingAngle, Player};
use super::input::InputState;
use super::types::AngleDeg;
use crate::config::tuning::Tuning;

/// Presentation hint for the pointer cursor. Applied to the window by the presentation layer.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorHint {
    pub visible: bool,
    pub locked: bool,
}

impl Default for CursorHint {
    fn default() -> Self {
        Self::POINTER
    }
}

impl CursorHint {
    pub const POINTER: Self = Self {
        visible: true,
        locked: false,
    };
    pub const DIRECTIONAL: Self = Self {
        visible: false,
        locked: true,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct AimParams {
    pub rotation_speed_deg_per_sec: f32,
    /// Compared against the squared stick magnitude.
    pub directional_deadzone: f32,
    pub dt: f32,
}

impl AimParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            rotation_speed_deg_per_sec: tuning.rotation_speed_deg_per_sec,
            directional_deadzone: tuning.directional_deadzone,
            dt: tuning.dt,
        }
    }

    pub fn max_step(&self) -> f32 {
        self.rotation_speed_deg_per_sec * self.dt
    }
}

/// Pick the active aim channel and the resulting facing angle for one tick.
///
/// The stick wins while its squared magnitude exceeds the deadzone and turns
/// the avatar at a bounded rate. Otherwise the pointer snaps the facing
/// straight at itself. With no aim input ever received, nothing changes.
pub fn resolve(
    input: &InputState,
    avatar_position: Vec2,
    current: AngleDeg,
    params: &AimParams,
) -> (AimMode, AngleDeg) {
    let stick = input.directional_aim;
    if stick.length_squared() > params.directional_deadzone && stick != Vec2::ZERO {
        let target = AngleDeg::from_direction(stick.x, stick.y);
        return (
            AimMode::Directional,
            current.rotate_towards(target, params.max_step()),
        );
    }

    if input.pointer_seen {
        let direction = input.pointer_world_position - avatar_position;
        if direction == Vec2::ZERO {
            return (AimMode::Pointer, current);
        }
        return (
            AimMode::Pointer,
            AngleDeg::from_direction(direction.x, direction.y),
        );
    }

    (AimMode::None, current)
}

/// Cursor hint after a tick, or `None` when the active channel produced no event this tick.
pub fn cursor_hint_for(mode: AimMode, input: &InputState) -> Option<CursorHint> {
    match mode {
        AimMode::Pointer if input.pointer_moved_this_tick => Some(CursorHint::POINTER),
        AimMode::Directional if input.directional_aim_active_this_tick => {
            Some(CursorHint::DIRECTIONAL)
        }
        _ => None,
    }
}

/// AimSet: update facing and aim mode for every player.
pub fn resolve_aim(
    tuning: Res<Tuning>,
    mut hint: ResMut<CursorHint>,
    mut players: Query<
        (Entity, &Transform, &InputState, &mut FacingAngle, &mut AimMode),
        With<Player>,
    >,
) {
    let params = AimParams::from_tuning(&tuning);

    for (entity, transform, input, mut facing, mut mode) in &mut players {
        let (next_mode, next_facing) =
            resolve(input, transform.translation.truncate(), facing.0, &params);

        if *mode != next_mode {
            debug!("{entity:?} aim mode {:?} -> {:?}", *mode, next_mode);
            *mode = next_mode;
        }
        facing.0 = next_facing;

        if let Some(next_hint) = cursor_hint_for(next_mode, input) {
            if *hint != next_hint {
                *hint = next_hint;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::InputEvent;

    fn params() -> AimParams {
        AimParams {
            rotation_speed_deg_per_sec: 180.0,
            directional_deadzone: 0.1,
            dt: 1.0 / 60.0,
        }
    }

    #[test]
    fn no_aim_input_leaves_facing_alone() {
        let input = InputState::attached();
        let (mode, facing) = resolve(&input, Vec2::ZERO, AngleDeg::new(42.0), &params());
        assert_eq!(mode, AimMode::None);
        assert_eq!(facing.0, 42.0);
    }

    #[test]
    fn stick_inside_deadzone_falls_back_to_pointer() {
        let mut input = InputState::attached();
        input.apply(InputEvent::PointerMoved(Vec2::new(0.0, -2.0)), false);
        input.apply(InputEvent::DirectionalAimChanged(Vec2::new(0.3, 0.0)), false);

        let (mode, facing) = resolve(&input, Vec2::ZERO, AngleDeg::new(0.0), &params());
        assert_eq!(mode, AimMode::Pointer);
        assert!((facing.0 + 90.0).abs() < 1e-4);
    }

    #[test]
    fn zero_stick_with_zero_deadzone_never_hits_atan2() {
        let mut input = InputState::attached();
        input.apply(InputEvent::DirectionalAimChanged(Vec2::ZERO), false);
        let params = AimParams {
            directional_deadzone: 0.0,
            ..params()
        };

        let (mode, facing) = resolve(&input, Vec2::ZERO, AngleDeg::new(10.0), &params);
        assert_eq!(mode, AimMode::None);
        assert!(facing.0.is_finite());
        assert_eq!(facing.0, 10.0);
    }

    #[test]
    fn pointer_snaps_without_lag() {
        let mut input = InputState::attached();
        let avatar = Vec2::new(1.0, 1.0);
        let pointer = Vec2::new(4.0, 3.0);
        input.apply(InputEvent::PointerMoved(pointer), false);

        let (_, facing) = resolve(&input, avatar, AngleDeg::new(-170.0), &params());
        let d = pointer - avatar;
        assert_eq!(facing.0, d.y.atan2(d.x).to_degrees());
    }

    #[test]
    fn pointer_on_top_of_avatar_keeps_facing() {
        let mut input = InputState::attached();
        input.apply(InputEvent::PointerMoved(Vec2::new(2.0, 2.0)), false);

        let (mode, facing) =
            resolve(&input, Vec2::new(2.0, 2.0), AngleDeg::new(33.0), &params());
        assert_eq!(mode, AimMode::Pointer);
        assert_eq!(facing.0, 33.0);
    }

    #[test]
    fn stick_turn_is_rate_limited() {
        let mut input = InputState::attached();
        input.apply(InputEvent::DirectionalAimChanged(Vec2::new(0.0, 1.0)), false);

        let (mode, facing) = resolve(&input, Vec2::ZERO, AngleDeg::new(0.0), &params());
        assert_eq!(mode, AimMode::Directional);
        assert!((facing.0 - 3.0).abs() < 1e-4);
    }

    #[test]
    fn stick_takes_precedence_over_pointer() {
        let mut input = InputState::attached();
        input.apply(InputEvent::PointerMoved(Vec2::new(-5.0, 0.0)), false);
        input.apply(InputEvent::DirectionalAimChanged(Vec2::new(1.0, 0.0)), false);

        let (mode, facing) = resolve(&input, Vec2::ZERO, AngleDeg::new(1.0), &params());
        assert_eq!(mode, AimMode::Directional);
        assert_eq!(facing.0, 0.0);
    }

    #[test]
    fn cursor_hint_follows_active_channel_edges() {
        let mut input = InputState::attached();
        input.apply(InputEvent::PointerMoved(Vec2::X), false);
        assert_eq!(
            cursor_hint_for(AimMode::Pointer, &input),
            Some(CursorHint::POINTER)
        );

        input.begin_tick();
        assert_eq!(cursor_hint_for(AimMode::Pointer, &input), None);

        input.apply(InputEvent::DirectionalAimChanged(Vec2::Y), false);
        assert_eq!(
            cursor_hint_for(AimMode::Directional, &input),
            Some(CursorHint::DIRECTIONAL)
        );
    }
}
