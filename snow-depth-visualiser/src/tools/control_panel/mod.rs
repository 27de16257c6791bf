//! Native control panel.
//!
//! Collapsible side panel with the depth field, unit selector, presets,
//! reference picker and the readouts. On the web the host page draws its own
//! controls and talks to the app over RPC, so the panel is native only.
//!
//! ## Event Flow
//!
//! ```text
//! Button / Enter key
//!   └─> ControlEvent (source: Panel)
//!       └─> handle_control_events()
//!           ├─> RebuildSceneEvent   (depth, preset, reference)
//!           └─> RefreshDisplayEvent (always)
//! ```
//!
//! Text that fails to parse never becomes an event; it is reported straight to
//! the status line.

/// Keyboard editing and submission for the depth field.
pub mod depth_input;

/// Button handlers and pointer capture for the camera.
pub mod interactions;

/// Panel resources and marker components.
pub mod state;

/// Panel spawning and the systems that mirror state back into it.
pub mod ui;

use bevy::prelude::*;

pub use state::{ControlPanelUiState, DepthInputState};

pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlPanelUiState>()
            .init_resource::<DepthInputState>();

        #[cfg(not(target_arch = "wasm32"))]
        {
            use depth_input::{depth_field_focus, depth_field_keyboard};
            use interactions::{
                collapse_button_interaction, preset_button_interaction,
                reference_button_interaction, unit_button_interaction, update_button_interaction,
                update_pointer_capture,
            };
            use ui::{apply_collapse_state, reflect_app_state, reflect_depth_input, spawn_control_panel};

            app.add_systems(Startup, spawn_control_panel).add_systems(
                Update,
                (
                    update_pointer_capture,
                    collapse_button_interaction,
                    apply_collapse_state,
                    depth_field_focus,
                    depth_field_keyboard,
                    update_button_interaction,
                    unit_button_interaction,
                    preset_button_interaction,
                    reference_button_interaction,
                    reflect_app_state,
                    reflect_depth_input,
                ),
            );
        }
    }
}
