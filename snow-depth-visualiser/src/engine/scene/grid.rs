//! Flat reference grid drawn just above the ground plane
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;

use crate::constants::render_settings::{GRID_CENTRE_LINE_COLOUR, GRID_LINE_COLOUR};
use crate::constants::scene::{GRID_DIVISIONS, GRID_HEIGHT, GROUND_SIZE};

#[derive(Component)]
pub struct GroundGrid;

/// Line segment endpoints for a square grid, split into the two centre
/// lines and the remaining lines.
pub fn grid_line_segments(size: f32, divisions: u32, height: f32) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let centre_index = divisions / 2;

    let mut centre = Vec::new();
    let mut others = Vec::new();

    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        // Lines running along Z at fixed X, then along X at fixed Z
        let segment_x = [[offset, height, -half], [offset, height, half]];
        let segment_z = [[-half, height, offset], [half, height, offset]];

        let target = if divisions % 2 == 0 && i == centre_index {
            &mut centre
        } else {
            &mut others
        };
        target.extend_from_slice(&segment_x);
        target.extend_from_slice(&segment_z);
    }

    (centre, others)
}

fn line_list_mesh(vertices: Vec<[f32; 3]>) -> Mesh {
    let indices = (0..vertices.len() as u32).collect::<Vec<_>>();
    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(bevy::render::mesh::Indices::U32(indices));
    mesh
}

/// Create the ground grid; centre lines are drawn darker
pub fn create_ground_grid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let (centre, others) = grid_line_segments(GROUND_SIZE, GRID_DIVISIONS, GRID_HEIGHT);

    for (vertices, colour) in [(centre, GRID_CENTRE_LINE_COLOUR), (others, GRID_LINE_COLOUR)] {
        if vertices.is_empty() {
            continue;
        }
        let material = materials.add(StandardMaterial {
            base_color: colour,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(meshes.add(line_list_mesh(vertices))),
            MeshMaterial3d(material),
            Visibility::Visible,
            NoFrustumCulling,
            Transform::IDENTITY,
            GroundGrid,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_counts() {
        let (centre, others) = grid_line_segments(20.0, 20, 0.01);
        // Two vertices per segment, two segments per division line
        assert_eq!(centre.len(), 4);
        assert_eq!(others.len(), 20 * 4);
    }

    #[test]
    fn test_grid_spans_ground_and_floats_above_it() {
        let (centre, others) = grid_line_segments(20.0, 20, 0.01);
        for v in centre.iter().chain(others.iter()) {
            assert!(v[0].abs() <= 10.0 + 1e-5 && v[2].abs() <= 10.0 + 1e-5);
            assert_eq!(v[1], 0.01);
        }
        assert!(centre.iter().all(|v| v[0].abs() < 1e-5 || v[2].abs() < 1e-5));
    }
}
