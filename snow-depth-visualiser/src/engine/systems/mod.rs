//! Runtime systems around the scene: readouts, diagnostics and resize.

/// Depth and comparison readouts, pushed to the panel and the host page.
pub mod display;

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Perspective aspect ratio upkeep on window resize.
pub mod resize;
