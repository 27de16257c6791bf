//! Orbit camera rig.
//!
//! Spherical-coordinate camera driven by pointer drags and the wheel, with
//! clamped polar angle and distance and no inertia.

/// Orbit camera resource and the controller systems that drive it.
pub mod orbit_camera;
