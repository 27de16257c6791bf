use bevy::prelude::*;

use crate::engine::catalog::ReferenceObjectSpec;
use crate::engine::core::app_state::AppState;
use crate::engine::units::{Unit, format_fixed, from_canonical};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::control_manager::ControlStatus;

/// Requests a rewrite of the depth and comparison readouts.
#[derive(Event, Default)]
pub struct RefreshDisplayEvent;

#[derive(Component)]
pub struct DepthText;

#[derive(Component)]
pub struct ComparisonText;

#[derive(Component)]
pub struct StatusText;

/// The two readout strings shown under the controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayText {
    pub depth: String,
    pub comparison: String,
}

pub fn format_depth(depth_cm: f64, unit: Unit) -> String {
    format!("{} {}", from_canonical(depth_cm, unit), unit.label())
}

/// Below the object's height the depth is a percentage; at or above it a multiple.
pub fn comparison_text(depth_cm: f64, reference: &ReferenceObjectSpec) -> String {
    let ratio = depth_cm / reference.height_cm;
    if depth_cm < reference.height_cm {
        format!(
            "That's {}% of a {} ({} cm)",
            format_fixed(ratio * 100.0, 1),
            reference.display_name,
            reference.height_cm
        )
    } else {
        format!(
            "That's {}× the height of a {} ({} cm)",
            format_fixed(ratio, 2),
            reference.display_name,
            reference.height_cm
        )
    }
}

impl DisplayText {
    /// `None` when the state names a reference the catalog does not know.
    pub fn from_state(state: &AppState) -> Option<Self> {
        let reference = state.reference()?;
        let depth_cm = state.depth_cm();
        Some(Self {
            depth: format_depth(depth_cm, state.unit),
            comparison: comparison_text(depth_cm, reference),
        })
    }
}

/// Rewrite the readouts and push them to the host page.
pub fn refresh_display_on_event(
    mut events: EventReader<RefreshDisplayEvent>,
    state: Res<AppState>,
    status: Res<ControlStatus>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut depth_query: Query<&mut Text, (With<DepthText>, Without<ComparisonText>, Without<StatusText>)>,
    mut comparison_query: Query<&mut Text, (With<ComparisonText>, Without<DepthText>, Without<StatusText>)>,
    mut status_query: Query<&mut Text, (With<StatusText>, Without<DepthText>, Without<ComparisonText>)>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    for mut text in &mut status_query {
        text.0 = status.message.clone().unwrap_or_default();
    }

    let Some(display) = DisplayText::from_state(&state) else {
        error!("No catalog entry for reference key '{}'", state.reference_key);
        return;
    };

    for mut text in &mut depth_query {
        text.0 = display.depth.clone();
    }
    for mut text in &mut comparison_query {
        text.0 = display.comparison.clone();
    }

    rpc_interface.send_notification(
        "display_updated",
        serde_json::json!({
            "depth": display.depth,
            "comparison": display.comparison,
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::lookup;

    fn reference(key: &str) -> &'static ReferenceObjectSpec {
        lookup(key).unwrap()
    }

    #[test]
    fn test_percentage_below_height() {
        assert_eq!(
            comparison_text(10.0, reference("soda-can")),
            "That's 83.3% of a Soda Can (12 cm)"
        );
    }

    #[test]
    fn test_multiple_above_height() {
        assert_eq!(
            comparison_text(200.0, reference("basketball")),
            "That's 8.33× the height of a Basketball (24 cm)"
        );
    }

    #[test]
    fn test_half_way_multiple_rounds_up() {
        // 27 / 24 is exactly 1.125
        assert_eq!(
            comparison_text(27.0, reference("basketball")),
            "That's 1.13× the height of a Basketball (24 cm)"
        );
    }

    #[test]
    fn test_equal_height_uses_multiple() {
        assert_eq!(
            comparison_text(170.0, reference("person")),
            "That's 1.00× the height of a Average Person (170 cm)"
        );
    }

    #[test]
    fn test_zero_depth() {
        assert_eq!(
            comparison_text(0.0, reference("car")),
            "That's 0.0% of a Car (150 cm)"
        );
    }

    #[test]
    fn test_display_from_state() {
        let state = AppState {
            snow_depth_value: 1.0,
            unit: Unit::Feet,
            reference_key: "traffic-cone".to_string(),
        };
        let display = DisplayText::from_state(&state).unwrap();
        assert_eq!(display.depth, "1.00 ft");
        assert_eq!(display.comparison, "That's 43.5% of a Traffic Cone (70 cm)");
    }

    #[test]
    fn test_unknown_reference_has_no_display() {
        let state = AppState {
            reference_key: "igloo".to_string(),
            ..default()
        };
        assert!(DisplayText::from_state(&state).is_none());
    }

    #[test]
    fn test_refresh_writes_readouts() {
        let mut app = App::new();
        app.init_resource::<AppState>()
            .init_resource::<ControlStatus>()
            .init_resource::<WebRpcInterface>()
            .add_event::<RefreshDisplayEvent>()
            .add_systems(Update, refresh_display_on_event);
        let depth = app.world_mut().spawn((Text::new(""), DepthText)).id();
        let comparison = app.world_mut().spawn((Text::new(""), ComparisonText)).id();

        app.update();
        assert_eq!(app.world().get::<Text>(depth).map(|t| t.0.as_str()), Some(""));

        app.world_mut().send_event(RefreshDisplayEvent);
        app.update();
        assert_eq!(
            app.world().get::<Text>(depth).map(|t| t.0.as_str()),
            Some("10.00 cm")
        );
        assert_eq!(
            app.world().get::<Text>(comparison).map(|t| t.0.as_str()),
            Some("That's 83.3% of a Soda Can (12 cm)")
        );
    }
}
