//! User controls for the snow depth scene.
//!
//! Both input adapters, the native bevy_ui panel and the web RPC bridge,
//! produce the same `ControlEvent`s. `control_manager` validates them, applies
//! them to `AppState` and decides whether the scene must be rebuilt or only
//! the readouts refreshed.
//!
//! ## Actions
//!
//! - `SubmitDepth { value, unit }`: typed depth confirmed with Update or Enter
//! - `ChangeUnit { unit }`: converts the stored depth for display, no rebuild
//! - `ApplyPreset { value, unit }`: quick-pick depth, full rebuild
//! - `SelectReference { key }`: swap the comparison object, full rebuild
//!
//! Negative, non-finite or unparsable depths are rejected with a
//! `ControlError`; the state is left as it was and the message is shown in the
//! panel's status line and sent to the host page as `validation_error`.

/// Control actions, validation and the system applying them to `AppState`.
pub mod control_manager;

/// Collapsible native control panel (native only).
pub mod control_panel;
