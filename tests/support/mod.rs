#![allow(dead_code)]

use bevy::prelude::*;

use twin_aim::config::Tuning;
use twin_aim::game::components::player_bundle;
use twin_aim::game::events::{AudioCue, ProjectileSpawnRequest};
use twin_aim::game::input::{InputEvent, InputLink, PlayerInput};
use twin_aim::plugins::game_plugin::{FixedGameSet, PlayerPlugin, ProjectileSpawnerPlugin};

/// Spawn requests and audio cues seen so far, tagged with the tick that produced them.
#[derive(Resource, Default)]
pub struct Recorded {
    pub tick: u32,
    pub spawns: Vec<(u32, ProjectileSpawnRequest)>,
    pub cues: Vec<(u32, AudioCue)>,
}

fn record_messages(
    mut recorded: ResMut<Recorded>,
    mut spawns: MessageReader<ProjectileSpawnRequest>,
    mut cues: MessageReader<AudioCue>,
) {
    let tick = recorded.tick;
    for spawn in spawns.read() {
        recorded.spawns.push((tick, spawn.clone()));
    }
    for cue in cues.read() {
        recorded.cues.push((tick, *cue));
    }
    recorded.tick += 1;
}

/// Headless app with the player and projectile plugins; no window, no clock.
pub fn headless_app(tuning: Tuning) -> App {
    let mut app = App::new();
    app.insert_resource(tuning)
        .add_plugins((PlayerPlugin, ProjectileSpawnerPlugin))
        .init_resource::<Recorded>()
        .add_systems(FixedUpdate, record_messages.after(FixedGameSet::CleanupSet));
    app
}

/// Headless app without a projectile spawner.
pub fn app_without_spawner(tuning: Tuning) -> App {
    let mut app = App::new();
    app.insert_resource(tuning)
        .add_plugins(PlayerPlugin)
        .init_resource::<Recorded>()
        .add_systems(FixedUpdate, record_messages.after(FixedGameSet::CleanupSet));
    app
}

pub fn spawn_player(app: &mut App, position: Vec2) -> Entity {
    let tuning = app.world().resource::<Tuning>().clone();
    app.world_mut().spawn(player_bundle(position, &tuning)).id()
}

/// Run the post-startup setup checks.
pub fn start(app: &mut App) {
    app.world_mut().run_schedule(PostStartup);
}

/// One fixed simulation step.
pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn ticks(app: &mut App, n: u32) {
    for _ in 0..n {
        tick(app);
    }
}

pub fn send(app: &mut App, player: Entity, event: InputEvent) {
    app.world_mut().write_message(PlayerInput { player, event });
}

pub fn link(app: &mut App, link: InputLink) {
    app.world_mut().write_message(link);
}

pub fn recorded(app: &App) -> &Recorded {
    app.world().resource::<Recorded>()
}

pub fn component<T: Component + Clone>(app: &App, entity: Entity) -> T {
    app.world()
        .get::<T>(entity)
        .cloned()
        .expect("component present on entity")
}
