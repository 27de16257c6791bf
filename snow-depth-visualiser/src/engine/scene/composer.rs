use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use super::reference_object::{ReferenceLayout, build_reference_object};
use super::snow::{SnowSlabLayout, build_snow};
use crate::constants::render_settings::{SNOW_COLOUR, SNOW_METALLIC, SNOW_ROUGHNESS};
use crate::engine::core::app_state::AppState;

#[derive(Component)]
pub struct SnowSlab;

/// Root of a composed reference object; parts are its children.
#[derive(Component)]
pub struct ReferenceObjectRoot {
    pub key: String,
}

#[derive(Component)]
pub struct ReferencePart;

/// Requests a full rebuild of the snow slab and reference object from `AppState`.
#[derive(Event, Default)]
pub struct RebuildSceneEvent;

/// What the geometry currently in the world was built from.
///
/// Lags behind `AppState` after display-only changes.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ComposedScene {
    pub depth_cm: f64,
    pub reference_key: String,
    pub rebuilds: u32,
}

/// Despawn the previous slab and reference object and spawn replacements.
pub fn rebuild_scene_on_event(
    mut events: EventReader<RebuildSceneEvent>,
    state: Res<AppState>,
    mut composed: ResMut<ComposedScene>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, Or<(With<SnowSlab>, With<ReferenceObjectRoot>)>>,
) {
    if events.is_empty() {
        return;
    }
    // Several requests in one frame collapse into a single rebuild
    events.clear();

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let depth_cm = state.depth_cm();
    spawn_snow_slab(&mut commands, &mut meshes, &mut materials, &build_snow(depth_cm));

    match state.reference() {
        Some(spec) => {
            let layout = build_reference_object(spec.kind, spec.height_cm);
            debug!(
                "'{}': {} parts, base at y={:.3}",
                spec.key,
                layout.parts.len(),
                layout.base_height()
            );
            spawn_reference_object(
                &mut commands,
                &mut meshes,
                &mut materials,
                spec.key,
                spec.display_name,
                &layout,
            );
        }
        None => error!("No catalog entry for reference key '{}'", state.reference_key),
    }

    composed.depth_cm = depth_cm;
    composed.reference_key = state.reference_key.clone();
    composed.rebuilds += 1;

    debug!(
        "Scene rebuilt: {:.2} cm of snow beside '{}'",
        depth_cm, state.reference_key
    );
}

fn spawn_snow_slab(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    slab: &SnowSlabLayout,
) {
    commands.spawn((
        SnowSlab,
        Name::new("SnowSlab"),
        Mesh3d(meshes.add(slab.mesh())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SNOW_COLOUR,
            perceptual_roughness: SNOW_ROUGHNESS,
            metallic: SNOW_METALLIC,
            ..default()
        })),
        Transform::from_translation(slab.translation),
    ));
}

fn spawn_reference_object(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    key: &str,
    display_name: &'static str,
    layout: &ReferenceLayout,
) {
    commands
        .spawn((
            ReferenceObjectRoot {
                key: key.to_string(),
            },
            Name::new(display_name),
            Transform::from_translation(layout.origin),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for part in &layout.parts {
                let mut entity = parent.spawn((
                    ReferencePart,
                    Name::new(part.name),
                    Mesh3d(meshes.add(part.shape.mesh())),
                    MeshMaterial3d(materials.add(part.material.standard_material())),
                    part.transform(),
                ));
                if !part.casts_shadow {
                    entity.insert(NotShadowCaster);
                }
            }
        });
}
