use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use crate::constants::render_settings::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};
use crate::engine::camera::orbit_camera::{
    OrbitCamera, PointerCapture, apply_camera_transform, camera_controller,
};
use crate::engine::core::app_state::{AppState, FpsText};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::composer::{ComposedScene, RebuildSceneEvent, rebuild_scene_on_event};
use crate::engine::scene::environment::{scene_fog, spawn_environment};
use crate::engine::systems::display::{RefreshDisplayEvent, refresh_display_on_event};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::resize::handle_window_resize;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::control_manager::{ControlEvent, ControlStatus, handle_control_events};
use crate::tools::control_panel::ControlPanelPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WebRpcPlugin)
        .add_plugins(ControlPanelPlugin);

    app.init_resource::<AppState>()
        .init_resource::<ComposedScene>()
        .init_resource::<ControlStatus>()
        .init_resource::<OrbitCamera>()
        .init_resource::<PointerCapture>()
        .add_event::<ControlEvent>()
        .add_event::<RebuildSceneEvent>()
        .add_event::<RefreshDisplayEvent>();

    app.add_systems(Startup, setup).add_systems(
        Update,
        (
            // Apply controls, then rebuild, then rewrite readouts, all in one frame
            (
                handle_control_events,
                rebuild_scene_on_event,
                refresh_display_on_event,
            )
                .chain(),
            (camera_controller, apply_camera_transform).chain(),
            handle_window_resize,
            fps_notification_system,
        ),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

/// Viewing camera; its transform is driven by `OrbitCamera`.
fn spawn_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    commands.spawn((
        Camera3d::default(),
        Name::new("ViewCamera"),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
        scene_fog(),
    ));
}

// Static scene, camera and the first rebuild request
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orbit: Res<OrbitCamera>,
    mut rebuild_events: EventWriter<RebuildSceneEvent>,
    mut refresh_events: EventWriter<RefreshDisplayEvent>,
) {
    println!("=== SNOW DEPTH VISUALISER ===");

    spawn_environment(&mut commands, &mut meshes, &mut materials);
    spawn_camera(&mut commands, &orbit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }

    rebuild_events.write(RebuildSceneEvent);
    refresh_events.write(RefreshDisplayEvent);
    info!("Scene initialised");
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        FpsText,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
