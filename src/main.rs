mod domain;

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use domain::{InputPlugin, RoundConfig, SimPlugin, UiPlugin};

fn main() {
    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.36, 0.62, 0.3)))
        .insert_resource(Msaa::Sample4)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "mole-rush".into(),
                resolution: (900., 800.).into(),
                ..default()
            }),
            ..default()
        }));

    let config = match RoundConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid round configuration: {err}");
            return;
        }
    };
    info!("starting with {:?}", config);

    app.add_plugins((SimPlugin { config }, UiPlugin, InputPlugin))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2dBundle {
            transform: Transform::from_xyz(0.0, 0.0, 999.0),
            ..default()
        },
        MainCamera,
    ));
}

#[derive(Component)]
pub struct MainCamera;
