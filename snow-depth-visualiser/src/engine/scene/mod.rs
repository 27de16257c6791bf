//! Scene composition for the snow depth comparison.
//!
//! Layouts are computed by pure functions (`snow::build_snow`,
//! `reference_object::build_reference_object`) and turned into entities by the
//! composer, which replaces the slab and reference object wholesale on every
//! rebuild. The ground, grid and lights are spawned once by `environment`.

/// Rebuild system that despawns and respawns the slab and reference object.
pub mod composer;

/// Lights, fog, ground plane and background colour.
pub mod environment;

/// Flat line grid drawn above the ground plane.
pub mod grid;

/// Primitive shapes and materials shared by all composed objects.
pub mod parts;

/// Per-kind procedural layouts for reference objects.
pub mod reference_object;

/// Snow slab layout.
pub mod snow;
