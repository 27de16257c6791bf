//! JSON-RPC 2.0 bridge to the host page.
//!
//! When the visualiser runs in an iframe, the surrounding page drives it over
//! `postMessage` instead of the native control panel.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ ControlEvent / query
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Methods
//!
//! ### Controls
//! - `set_depth {value, unit}`: new depth, full rebuild
//! - `set_unit {unit}`: convert the current depth for display, no rebuild
//! - `apply_preset {value, unit}`: same as `set_depth`, from a preset
//! - `select_reference {key}`: swap the comparison object
//!
//! ### Queries
//! - `get_state`: depth, unit, reference and the current readouts
//! - `get_reference_objects`: the catalog
//! - `get_presets`: quick-pick depths
//! - `get_fps`: smoothed frame rate
//!
//! ### Notifications
//! - `display_updated {depth, comparison}`
//! - `validation_error {message}`
//! - `fps_update {fps}`
//!
//! ## Error Codes
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (bad number, negative depth, unknown unit or key)
//! - `-32603`: Internal error

/// Request handling, notification queue and WASM message listener.
pub mod web_rpc;
