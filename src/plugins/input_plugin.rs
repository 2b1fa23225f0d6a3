use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::config::tuning::Tuning;
use crate::game::components::Player;
use crate::game::input::{InputEvent, PlayerInput};

/// Binds keyboard, mouse and gamepad to `PlayerInput` messages for the local player.
///
/// Only changes are forwarded, the way an action map reports performed/canceled.
pub struct InputBindingPlugin;

impl Plugin for InputBindingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (bind_movement, bind_pointer, bind_directional_aim, bind_buttons)
                .after(bevy::input::InputSystems),
        );
        app.add_systems(Update, tuning_reload_input);
    }
}

/// Last values forwarded, so unchanged readings are not re-sent.
#[derive(Default)]
struct Sent<T>(Option<T>);

impl<T: PartialEq + Copy> Sent<T> {
    fn changed(&mut self, value: T) -> bool {
        if self.0 == Some(value) {
            return false;
        }
        self.0 = Some(value);
        true
    }
}

fn bind_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    players: Query<Entity, With<Player>>,
    mut sent: Local<Sent<Vec2>>,
    mut out: MessageWriter<PlayerInput>,
) {
    let Ok(player) = players.single() else { return; };

    let mut keys = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        keys.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        keys.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        keys.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        keys.x -= 1.0;
    }

    let stick = gamepads
        .iter()
        .map(|pad| pad.left_stick())
        .find(|v| *v != Vec2::ZERO)
        .unwrap_or(Vec2::ZERO);
    let movement = if keys != Vec2::ZERO {
        keys.normalize_or_zero()
    } else {
        stick.clamp_length_max(1.0)
    };

    if sent.changed(movement) {
        out.write(PlayerInput {
            player,
            event: InputEvent::MovementChanged(movement),
        });
    }
}

fn bind_pointer(
    mut cursor_moves: MessageReader<CursorMoved>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    players: Query<Entity, With<Player>>,
    mut out: MessageWriter<PlayerInput>,
) {
    let Some(moved) = cursor_moves.read().last() else { return; };
    let Ok(player) = players.single() else { return; };
    let Ok((camera, camera_tf)) = cameras.single() else { return; };

    match camera.viewport_to_world_2d(camera_tf, moved.position) {
        Ok(world) => {
            out.write(PlayerInput {
                player,
                event: InputEvent::PointerMoved(world),
            });
        }
        Err(e) => debug!("Cursor outside camera viewport: {e:?}"),
    }
}

fn bind_directional_aim(
    gamepads: Query<&Gamepad>,
    players: Query<Entity, With<Player>>,
    mut sent: Local<Sent<Vec2>>,
    mut out: MessageWriter<PlayerInput>,
) {
    let Ok(player) = players.single() else { return; };
    let stick = gamepads
        .iter()
        .map(|pad| pad.right_stick())
        .find(|v| *v != Vec2::ZERO)
        .unwrap_or(Vec2::ZERO);

    if sent.changed(stick) {
        out.write(PlayerInput {
            player,
            event: InputEvent::DirectionalAimChanged(stick),
        });
    }
}

fn bind_buttons(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    players: Query<Entity, With<Player>>,
    mut fire_sent: Local<Sent<bool>>,
    mut sprint_sent: Local<Sent<bool>>,
    mut out: MessageWriter<PlayerInput>,
) {
    let Ok(player) = players.single() else { return; };

    let fire = mouse.pressed(MouseButton::Left)
        || gamepads
            .iter()
            .any(|pad| pad.pressed(GamepadButton::RightTrigger2));
    // Only report the trigger on its own edges; the stick may also drive firing.
    if fire_sent.changed(fire) {
        out.write(PlayerInput {
            player,
            event: InputEvent::FireChanged(fire),
        });
    }

    let sprint = keyboard.pressed(KeyCode::ShiftLeft)
        || gamepads
            .iter()
            .any(|pad| pad.pressed(GamepadButton::LeftThumb));
    if sprint_sent.changed(sprint) {
        out.write(PlayerInput {
            player,
            event: InputEvent::SprintChanged(sprint),
        });
    }
}

/// Reload tuning with F5. Only a successful reload marks `Tuning` changed.
fn tuning_reload_input(keyboard: Res<ButtonInput<KeyCode>>, mut tuning: ResMut<Tuning>) {
    if keyboard.just_pressed(KeyCode::F5) && tuning.bypass_change_detection().reload() {
        tuning.set_changed();
    }
}
