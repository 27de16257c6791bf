/// Snow slab edge length in world units (metres)
pub const SNOW_FOOTPRINT: f32 = 10.0;

/// Centimetres per world unit
pub const CM_PER_WORLD_UNIT: f64 = 100.0;

/// Reference objects stand beside the slab, not inside it
pub const REFERENCE_OFFSET_X: f32 = 2.0;

pub const GROUND_SIZE: f32 = 20.0;
pub const GRID_DIVISIONS: u32 = 20;
pub const GRID_HEIGHT: f32 = 0.01;

pub const INITIAL_DEPTH_VALUE: f64 = 10.0;
pub const INITIAL_REFERENCE_KEY: &str = "soda-can";
