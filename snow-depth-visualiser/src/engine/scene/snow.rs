use bevy::prelude::*;

use crate::constants::scene::{CM_PER_WORLD_UNIT, SNOW_FOOTPRINT};

/// Geometry of the snow slab for a given canonical depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowSlabLayout {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub translation: Vec3,
}

/// Slab of fixed footprint whose base sits on the ground.
///
/// A zero depth produces a zero-height slab rather than an error.
pub fn build_snow(depth_cm: f64) -> SnowSlabLayout {
    let height = (depth_cm / CM_PER_WORLD_UNIT) as f32;
    SnowSlabLayout {
        width: SNOW_FOOTPRINT,
        height,
        depth: SNOW_FOOTPRINT,
        translation: Vec3::new(0.0, height / 2.0, 0.0),
    }
}

impl SnowSlabLayout {
    pub fn mesh(&self) -> Mesh {
        Cuboid::new(self.width, self.height, self.depth).mesh().build()
    }
}
