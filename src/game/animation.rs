use bevy::prelude::*;

use super::components::Player;
use super::input::InputState;

/// Parameters read by the animation collaborator. Purely observational.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationSignals {
    /// Squared magnitude of the movement input.
    pub walking: f32,
    pub is_shooting: bool,
    pub is_idle: bool,
    pub is_moving_and_shooting: bool,
    pub is_walking: bool,
    pub is_running: bool,
}

impl AnimationSignals {
    pub fn from_input(input: &InputState) -> Self {
        let moving = input.is_moving();
        let shooting = input.fire_held;
        Self {
            walking: input.movement.length_squared(),
            is_shooting: shooting,
            is_idle: !shooting,
            is_moving_and_shooting: moving && shooting,
            is_walking: moving && !shooting,
            is_running: moving && input.sprint_held,
        }
    }
}

/// SignalSet: refresh animation signals from the current input.
pub fn update_animation_signals(
    mut query: Query<(&InputState, &mut AnimationSignals), With<Player>>,
) {
    for (input, mut signals) in &mut query {
        let next = AnimationSignals::from_input(input);
        if *signals != next {
            *signals = next;
        }
    }
}
