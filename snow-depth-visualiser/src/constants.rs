//! Shared configuration for the snow depth scene

/// Lighting, fog, background and ground colours
pub mod render_settings;

/// Orbit camera sensitivities, limits and initial pose
pub mod camera;

/// Scene layout: snow slab footprint, reference object placement, presets
pub mod scene;
