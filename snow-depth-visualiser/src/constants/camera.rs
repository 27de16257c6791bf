use std::f32::consts::PI;

/// Radians of orbit per pixel of pointer travel
pub const ORBIT_SENSITIVITY: f32 = 0.01;

/// World units of pan per pixel of pointer travel
pub const PAN_SENSITIVITY: f32 = 0.01;

/// World units of dolly per wheel pixel
pub const ZOOM_SENSITIVITY: f32 = 0.01;

/// Pixels reported per wheel line on line-based scroll devices
pub const PIXELS_PER_WHEEL_LINE: f32 = 100.0;

pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 20.0;

/// Keeps the polar angle away from the poles so the view never flips
pub const POLAR_MARGIN: f32 = 0.1;

pub const INITIAL_AZIMUTH: f32 = PI / 4.0;
pub const INITIAL_POLAR: f32 = PI / 6.0;
pub const INITIAL_DISTANCE: f32 = 8.0;
