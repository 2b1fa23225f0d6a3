use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::config::tuning::Tuning;
use crate::game::{
    aim::CursorHint,
    animation::AnimationSignals,
    components::{player_bundle, Player, ProjectileMarker},
    events::{AudioCue, SoundCue},
    weapon::WeaponState,
};

/// Camera, placeholder visuals, cursor state and audio for the game binary.
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_scene, load_sounds));
        app.add_systems(
            Update,
            (
                attach_projectile_visuals,
                apply_cursor_hint,
                play_audio_cues,
                tint_player,
            ),
        );
    }
}

/// Pre-built mesh/material handles for projectile rendering.
#[derive(Resource)]
pub struct ProjectileAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<ColorMaterial>,
}

#[derive(Resource)]
pub struct SoundAssets {
    pub fire: Handle<AudioSource>,
    pub reload: Handle<AudioSource>,
}

impl SoundAssets {
    pub fn clip(&self, cue: SoundCue) -> Handle<AudioSource> {
        match cue {
            SoundCue::Fire => self.fire.clone(),
            SoundCue::Reload => self.reload.clone(),
        }
    }
}

#[derive(Resource)]
struct PlayerColors {
    idle: Handle<ColorMaterial>,
    shooting: Handle<ColorMaterial>,
    reloading: Handle<ColorMaterial>,
}

fn setup_scene(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let ppu = tuning.pixels_per_unit.max(1.0);

    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::WindowSize,
            scale: 1.0 / ppu,
            ..OrthographicProjection::default_2d()
        }),
    ));

    let colors = PlayerColors {
        idle: materials.add(Color::srgb(0.2, 0.6, 1.0)),
        shooting: materials.add(Color::srgb(1.0, 0.8, 0.2)),
        reloading: materials.add(Color::srgb(0.5, 0.5, 0.55)),
    };

    // Body plus a barrel child along +X, the facing axis
    let body = meshes.add(Circle::new(tuning.avatar_radius));
    let barrel = meshes.add(Rectangle::new(tuning.avatar_radius, tuning.avatar_radius * 0.3));
    commands
        .spawn((
            player_bundle(Vec2::ZERO, &tuning),
            Mesh2d(body),
            MeshMaterial2d(colors.idle.clone()),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(barrel),
                MeshMaterial2d(materials.add(Color::srgb(0.9, 0.9, 1.0))),
                Transform::from_translation(Vec3::new(tuning.avatar_radius, 0.0, 0.1)),
            ));
        });

    commands.insert_resource(ProjectileAssets {
        mesh: meshes.add(Circle::new(1.0)),
        material: materials.add(Color::srgb(1.0, 1.0, 0.2)),
    });
    commands.insert_resource(colors);
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundAssets {
        fire: asset_server.load("audio/fire.ogg"),
        reload: asset_server.load("audio/reload.ogg"),
    });
}

fn attach_projectile_visuals(
    mut commands: Commands,
    tuning: Res<Tuning>,
    assets: Res<ProjectileAssets>,
    mut added: Query<(Entity, &mut Transform), Added<ProjectileMarker>>,
) {
    for (entity, mut transform) in &mut added {
        transform.scale = Vec3::splat(tuning.projectile_radius);
        commands.entity(entity).insert((
            Mesh2d(assets.mesh.clone()),
            MeshMaterial2d(assets.material.clone()),
        ));
    }
}

fn apply_cursor_hint(
    hint: Res<CursorHint>,
    mut windows: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !hint.is_changed() {
        return;
    }
    for mut cursor in &mut windows {
        cursor.visible = hint.visible;
        cursor.grab_mode = if hint.locked {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
    }
}

fn play_audio_cues(
    mut commands: Commands,
    sounds: Res<SoundAssets>,
    mut cues: MessageReader<AudioCue>,
) {
    for cue in cues.read() {
        commands.spawn((AudioPlayer::new(sounds.clip(cue.cue)), PlaybackSettings::DESPAWN));
    }
}

/// Stand-in for an animator: pick a body color from the signals and weapon state.
fn tint_player(
    colors: Res<PlayerColors>,
    mut players: Query<
        (&AnimationSignals, &WeaponState, &mut MeshMaterial2d<ColorMaterial>),
        With<Player>,
    >,
) {
    for (signals, weapon, mut material) in &mut players {
        let next = if weapon.is_reloading {
            &colors.reloading
        } else if signals.is_shooting {
            &colors.shooting
        } else {
            &colors.idle
        };
        if material.0 != *next {
            material.0 = next.clone();
        }
    }
}
