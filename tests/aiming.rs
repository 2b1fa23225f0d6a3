//! Aim resolution, input lifecycle and motion through the fixed-step pipeline.

mod support;

use bevy::prelude::*;

use support::*;
use twin_aim::config::Tuning;
use twin_aim::game::aim::CursorHint;
use twin_aim::game::animation::AnimationSignals;
use twin_aim::game::components::{AimMode, FacingAngle};
use twin_aim::game::input::{InputEvent, InputLink, InputState};
use twin_aim::game::types::AngleDeg;

fn aim_tuning() -> Tuning {
    Tuning {
        rotation_speed_deg_per_sec: 180.0,
        directional_deadzone: 0.1,
        auto_fire_on_directional_aim: false,
        ..default()
    }
}

fn facing(app: &App, player: Entity) -> AngleDeg {
    component::<FacingAngle>(app, player).0
}

#[test]
fn stick_up_turns_at_bounded_rate_and_lands_on_target() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::DirectionalAimChanged(Vec2::new(0.0, 1.0)));
    let target = AngleDeg::from_direction(0.0, 1.0);
    let max_step = 180.0 * (1.0 / 60.0) + 1e-4;

    let mut previous = facing(&app, player);
    for _ in 0..40 {
        tick(&mut app);
        let current = facing(&app, player);
        assert!(previous.shortest_delta(current).abs() <= max_step);
        previous = current;
    }

    assert_eq!(previous, target);
    assert_eq!(component::<AimMode>(&app, player), AimMode::Directional);
    assert_eq!(*app.world().resource::<CursorHint>(), CursorHint::DIRECTIONAL);
}

#[test]
fn pointer_snaps_in_the_same_tick() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::new(1.0, -1.0));
    start(&mut app);

    send(&mut app, player, InputEvent::PointerMoved(Vec2::new(-3.0, 2.0)));
    tick(&mut app);

    let d = Vec2::new(-4.0, 3.0);
    assert_eq!(facing(&app, player).0, d.y.atan2(d.x).to_degrees());
    assert_eq!(component::<AimMode>(&app, player), AimMode::Pointer);
    assert_eq!(*app.world().resource::<CursorHint>(), CursorHint::POINTER);
}

#[test]
fn released_stick_falls_back_to_pointer() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::PointerMoved(Vec2::new(0.0, -5.0)));
    send(&mut app, player, InputEvent::DirectionalAimChanged(Vec2::new(1.0, 0.0)));
    tick(&mut app);
    assert_eq!(component::<AimMode>(&app, player), AimMode::Directional);

    // A small stick reading inside the deadzone counts as released.
    send(&mut app, player, InputEvent::DirectionalAimChanged(Vec2::new(0.2, 0.2)));
    tick(&mut app);
    assert_eq!(component::<AimMode>(&app, player), AimMode::Pointer);
    assert!((facing(&app, player).0 + 90.0).abs() < 1e-4);
    // Cursor only comes back once the pointer itself moves.
    assert_eq!(*app.world().resource::<CursorHint>(), CursorHint::DIRECTIONAL);

    send(&mut app, player, InputEvent::PointerMoved(Vec2::new(0.0, 5.0)));
    tick(&mut app);
    assert_eq!(*app.world().resource::<CursorHint>(), CursorHint::POINTER);
}

#[test]
fn shot_leaves_along_facing_resolved_in_the_same_tick() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::PointerMoved(Vec2::new(0.0, 5.0)));
    send(&mut app, player, InputEvent::FireChanged(true));
    tick(&mut app);

    let (_, shot) = recorded(&app).spawns.first().cloned().expect("one shot");
    assert!((shot.rotation.0 - 90.0).abs() < 1e-4);
    assert!(shot.impulse.x.abs() < 1e-4);
    assert!((shot.impulse.y - 20.0).abs() < 1e-4);
    // Muzzle sits 0.6 ahead of the avatar along the facing.
    assert!((shot.position - Vec2::new(0.0, 0.6)).length() < 1e-4);
}

#[test]
fn stick_doubles_as_trigger_in_twin_stick_mode() {
    let tuning = Tuning {
        auto_fire_on_directional_aim: true,
        ..aim_tuning()
    };
    let mut app = headless_app(tuning);
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::DirectionalAimChanged(Vec2::new(-1.0, 0.0)));
    tick(&mut app);
    assert_eq!(recorded(&app).spawns.len(), 1);

    send(&mut app, player, InputEvent::DirectionalAimChanged(Vec2::ZERO));
    ticks(&mut app, 60);
    assert_eq!(recorded(&app).spawns.len(), 1);
}

#[test]
fn detached_player_ignores_input_and_stops_firing() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::FireChanged(true));
    send(&mut app, player, InputEvent::MovementChanged(Vec2::X));
    tick(&mut app);
    assert_eq!(recorded(&app).spawns.len(), 1);

    link(&mut app, InputLink::Detach(player));
    tick(&mut app);
    let input: InputState = component(&app, player);
    assert!(!input.is_attached());
    assert!(!input.fire_held);

    send(&mut app, player, InputEvent::PointerMoved(Vec2::new(0.0, 3.0)));
    send(&mut app, player, InputEvent::FireChanged(true));
    ticks(&mut app, 60);
    assert_eq!(recorded(&app).spawns.len(), 1);
    assert_eq!(component::<AimMode>(&app, player), AimMode::None);

    link(&mut app, InputLink::Attach(player));
    tick(&mut app);
    send(&mut app, player, InputEvent::FireChanged(true));
    tick(&mut app);
    assert_eq!(recorded(&app).spawns.len(), 2);
}

#[test]
fn movement_drives_velocity_and_animation_signals() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::MovementChanged(Vec2::new(1.0, 0.0)));
    ticks(&mut app, 60);

    let transform: Transform = component(&app, player);
    assert!((transform.translation.x - 5.0).abs() < 1e-3);

    let signals: AnimationSignals = component(&app, player);
    assert!(signals.is_walking);
    assert!(!signals.is_running);
    assert!((signals.walking - 1.0).abs() < 1e-6);

    send(&mut app, player, InputEvent::SprintChanged(true));
    send(&mut app, player, InputEvent::FireChanged(true));
    tick(&mut app);
    let signals: AnimationSignals = component(&app, player);
    assert!(signals.is_running);
    assert!(signals.is_moving_and_shooting);
    assert!(!signals.is_walking);
}

#[test]
fn detaching_mid_turn_stops_the_stick() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::DirectionalAimChanged(Vec2::new(0.0, 1.0)));
    ticks(&mut app, 5);
    let turned = facing(&app, player);
    assert!(turned.0 > 0.0 && turned.0 < 90.0);

    link(&mut app, InputLink::Detach(player));
    ticks(&mut app, 30);
    assert_eq!(facing(&app, player), turned);
    assert_eq!(component::<AimMode>(&app, player), AimMode::None);
}

#[test]
fn links_apply_before_inputs_of_the_same_tick() {
    let mut app = headless_app(aim_tuning());
    let player = spawn_player(&mut app, Vec2::ZERO);
    start(&mut app);

    send(&mut app, player, InputEvent::FireChanged(true));
    link(&mut app, InputLink::Detach(player));
    tick(&mut app);
    assert!(recorded(&app).spawns.is_empty());

    send(&mut app, player, InputEvent::FireChanged(true));
    link(&mut app, InputLink::Attach(player));
    tick(&mut app);
    assert_eq!(recorded(&app).spawns.len(), 1);
}
