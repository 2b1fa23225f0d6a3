use bevy::prelude::*;

use twin_aim::config::{ConfigError, Tuning};
use twin_aim::plugins::{
    game_plugin::{PlayerPlugin, ProjectileSpawnerPlugin},
    input_plugin::InputBindingPlugin,
    presentation_plugin::PresentationPlugin,
};

fn main() -> Result<(), ConfigError> {
    let tuning = Tuning::load_or_default();
    tuning.validate()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Twin Aim".into(),
                resolution: (1280u32, 720u32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_seconds(tuning.dt as f64))
        .insert_resource(tuning)
        .add_plugins(PlayerPlugin)
        .add_plugins(ProjectileSpawnerPlugin)
        .add_plugins(InputBindingPlugin)
        .add_plugins(PresentationPlugin)
        .run();

    Ok(())
}
