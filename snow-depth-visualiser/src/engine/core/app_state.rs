use bevy::prelude::*;

use crate::constants::scene::{INITIAL_DEPTH_VALUE, INITIAL_REFERENCE_KEY};
use crate::engine::catalog::{ReferenceObjectSpec, lookup};
use crate::engine::units::{Unit, to_canonical};

/// User-facing state: the entered depth, its unit and the comparison object.
///
/// Only `tools::control_manager::apply_control` mutates it; the scene composer
/// and display updater read it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AppState {
    pub snow_depth_value: f64,
    pub unit: Unit,
    pub reference_key: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            snow_depth_value: INITIAL_DEPTH_VALUE,
            unit: Unit::Centimetres,
            reference_key: INITIAL_REFERENCE_KEY.to_string(),
        }
    }
}

impl AppState {
    /// Canonical depth in centimetres.
    pub fn depth_cm(&self) -> f64 {
        to_canonical(self.snow_depth_value, self.unit)
    }

    pub fn reference(&self) -> Option<&'static ReferenceObjectSpec> {
        lookup(&self.reference_key)
    }
}

#[derive(Component)]
pub struct FpsText;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.depth_cm(), 10.0);
        assert_eq!(state.reference().map(|r| r.display_name), Some("Soda Can"));
    }

    #[test]
    fn test_depth_cm_uses_unit() {
        let state = AppState {
            snow_depth_value: 2.0,
            unit: Unit::Metres,
            ..default()
        };
        assert_eq!(state.depth_cm(), 200.0);
    }
}
