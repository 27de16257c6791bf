use bevy::prelude::*;

/// Sky blue used for both the clear colour and the distance fog
pub const SKY_COLOUR: Color = Color::srgb(0.529, 0.808, 0.922);

pub const FOG_START: f32 = 10.0;
pub const FOG_END: f32 = 100.0;

pub const AMBIENT_BRIGHTNESS: f32 = 600.0;

pub const DIRECTIONAL_ILLUMINANCE: f32 = 8_000.0;
pub const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);
/// Shadow cascade reach, sized to cover the ground plane
pub const SHADOW_MAXIMUM_DISTANCE: f32 = 40.0;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const GROUND_COLOUR: Color = Color::srgb(0.545, 0.451, 0.333);
pub const GROUND_ROUGHNESS: f32 = 0.8;
pub const GROUND_METALLIC: f32 = 0.2;

pub const SNOW_COLOUR: Color = Color::WHITE;
pub const SNOW_ROUGHNESS: f32 = 0.9;
pub const SNOW_METALLIC: f32 = 0.1;

pub const GRID_CENTRE_LINE_COLOUR: Color = Color::BLACK;
pub const GRID_LINE_COLOUR: Color = Color::srgb(0.267, 0.267, 0.267);
