//! Core application setup and state.
//!
//! Builds the Bevy app for native and WASM targets, owns the user-facing
//! `AppState` and the platform window configuration.

/// Plugin registration, startup scene and system ordering.
pub mod app_setup;

/// Depth, unit and reference selection shared by every system.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
