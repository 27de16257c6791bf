use bevy::pbr::{CascadeShadowConfigBuilder, DistanceFog, FogFalloff, NotShadowCaster};
use bevy::prelude::*;

use super::grid::create_ground_grid;
use crate::constants::render_settings::*;
use crate::constants::scene::GROUND_SIZE;

#[derive(Component)]
pub struct Ground;

/// Fog settings attached to the viewing camera
pub fn scene_fog() -> DistanceFog {
    DistanceFog {
        color: SKY_COLOUR,
        falloff: FogFalloff::Linear {
            start: FOG_START,
            end: FOG_END,
        },
        ..default()
    }
}

/// Lights, ground plane and grid. Created once and kept for the session.
pub fn spawn_environment(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.insert_resource(ClearColor(SKY_COLOUR));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    spawn_lighting(commands);

    commands.spawn((
        Ground,
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOUR,
            perceptual_roughness: GROUND_ROUGHNESS,
            metallic: GROUND_METALLIC,
            ..default()
        })),
        Transform::IDENTITY,
        NotShadowCaster,
    ));

    create_ground_grid(commands, meshes, materials);
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        CascadeShadowConfigBuilder {
            maximum_distance: SHADOW_MAXIMUM_DISTANCE,
            ..default()
        }
        .build(),
    ));
}
