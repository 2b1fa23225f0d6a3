use bevy::prelude::*;

use crate::config::tuning::Tuning;

/// One discrete notification from the input-binding layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MovementChanged(Vec2),
    /// Pointer position, already converted to world space.
    PointerMoved(Vec2),
    DirectionalAimChanged(Vec2),
    FireChanged(bool),
    SprintChanged(bool),
}

/// Input notification addressed to a single player entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub player: Entity,
    pub event: InputEvent,
}

/// Subscribe / unsubscribe a player from its input source.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLink {
    Attach(Entity),
    Detach(Entity),
}

/// Latest value of every input channel: written by the aggregator, read once per tick.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub movement: Vec2,
    pub pointer_world_position: Vec2,
    pub directional_aim: Vec2,
    pub fire_held: bool,
    pub sprint_held: bool,
    /// A pointer event arrived since the last `begin_tick`.
    pub pointer_moved_this_tick: bool,
    /// A non-zero directional event arrived since the last `begin_tick`.
    pub directional_aim_active_this_tick: bool,
    /// The pointer channel has produced at least one event.
    pub pointer_seen: bool,
    attached: bool,
}

impl InputState {
    /// State for a player already subscribed to its input source.
    pub fn attached() -> Self {
        Self {
            attached: true,
            ..default()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Unsubscribe and let go of everything held, so a disabled avatar neither walks nor fires.
    pub fn detach(&mut self) {
        self.attached = false;
        self.movement = Vec2::ZERO;
        self.directional_aim = Vec2::ZERO;
        self.fire_held = false;
        self.sprint_held = false;
    }

    /// Clear the per-tick edge flags. Called before the tick's events are applied.
    pub fn begin_tick(&mut self) {
        self.pointer_moved_this_tick = false;
        self.directional_aim_active_this_tick = false;
    }

    pub fn on_movement_changed(&mut self, v: Vec2) {
        if accept(v, "movement") {
            self.movement = v;
        }
    }

    pub fn on_pointer_moved(&mut self, v: Vec2) {
        if accept(v, "pointer") {
            self.pointer_world_position = v;
            self.pointer_moved_this_tick = true;
            self.pointer_seen = true;
        }
    }

    pub fn on_directional_aim_changed(&mut self, v: Vec2) {
        if accept(v, "directional aim") {
            self.directional_aim = v;
            if v.length_squared() > 0.0 {
                self.directional_aim_active_this_tick = true;
            }
        }
    }

    pub fn on_fire_changed(&mut self, held: bool) {
        self.fire_held = held;
    }

    pub fn on_sprint_changed(&mut self, held: bool) {
        self.sprint_held = held;
    }

    /// Route one event to its channel. With `auto_fire`, the stick doubles as the trigger.
    pub fn apply(&mut self, event: InputEvent, auto_fire: bool) {
        match event {
            InputEvent::MovementChanged(v) => self.on_movement_changed(v),
            InputEvent::PointerMoved(v) => self.on_pointer_moved(v),
            InputEvent::DirectionalAimChanged(v) => {
                self.on_directional_aim_changed(v);
                if auto_fire && v.is_finite() {
                    self.on_fire_changed(v != Vec2::ZERO);
                }
            }
            InputEvent::FireChanged(held) => self.on_fire_changed(held),
            InputEvent::SprintChanged(held) => self.on_sprint_changed(held),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.movement != Vec2::ZERO
    }
}

fn accept(v: Vec2, channel: &str) -> bool {
    if v.is_finite() {
        true
    } else {
        debug!("Dropped non-finite {channel} input {v:?}");
        false
    }
}

/// InputSet: reset edge flags, then fold every pending message into its player's state.
///
/// Attach/detach links are applied before the tick's inputs, so an input
/// written in the same tick as a `Detach` is dropped and one written in the
/// same tick as an `Attach` is kept, whatever order they were sent in.
pub fn aggregate_input(
    tuning: Res<Tuning>,
    mut links: MessageReader<InputLink>,
    mut inputs: MessageReader<PlayerInput>,
    mut players: Query<&mut InputState>,
) {
    for mut state in &mut players {
        state.begin_tick();
    }

    for link in links.read() {
        match *link {
            InputLink::Attach(player) => {
                if let Ok(mut state) = players.get_mut(player) {
                    state.attach();
                    info!("Input attached to {player:?}");
                }
            }
            InputLink::Detach(player) => {
                if let Ok(mut state) = players.get_mut(player) {
                    state.detach();
                    info!("Input detached from {player:?}");
                }
            }
        }
    }

    for input in inputs.read() {
        let Ok(mut state) = players.get_mut(input.player) else {
            continue;
        };
        if !state.is_attached() {
            continue;
        }
        state.apply(input.event, tuning.auto_fire_on_directional_aim);
    }
}
