use bevy::prelude::*;
use serde::Serialize;

use crate::engine::catalog::lookup;
use crate::engine::core::app_state::AppState;
use crate::engine::scene::composer::RebuildSceneEvent;
use crate::engine::systems::display::RefreshDisplayEvent;
use crate::engine::units::{Unit, from_canonical_value, to_canonical};
use crate::rpc::web_rpc::WebRpcInterface;

/// User intents shared by the native panel and the web bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    /// New depth typed in and confirmed.
    SubmitDepth { value: f64, unit: Unit },
    /// Display unit changed on its own; the stored depth is converted.
    ChangeUnit { unit: Unit },
    ApplyPreset { value: f64, unit: Unit },
    SelectReference { key: String },
}

/// Where a control action came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    Panel,
    Rpc,
}

#[derive(Event, Debug, Clone)]
pub struct ControlEvent {
    pub action: ControlAction,
    pub source: ControlSource,
}

/// How much of the view must be refreshed after a control was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    /// Rebuild geometry and refresh the readouts.
    Full,
    /// Readouts only; geometry is still valid.
    DisplayOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    InvalidNumber(String),
    NonFiniteDepth,
    NegativeDepth(f64),
    UnknownUnit(String),
    UnknownReference(String),
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlError::InvalidNumber(text) => write!(f, "'{}' is not a number", text),
            ControlError::NonFiniteDepth => write!(f, "Snow depth must be a finite number"),
            ControlError::NegativeDepth(value) => {
                write!(f, "Snow depth cannot be negative ({})", value)
            }
            ControlError::UnknownUnit(text) => write!(f, "Unknown unit '{}'", text),
            ControlError::UnknownReference(key) => write!(f, "Unknown reference object '{}'", key),
        }
    }
}

impl std::error::Error for ControlError {}

/// Quick-pick depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthPreset {
    pub label: &'static str,
    pub value: f64,
    pub unit: Unit,
}

pub const DEPTH_PRESETS: &[DepthPreset] = &[
    DepthPreset {
        label: "Light Dusting",
        value: 2.0,
        unit: Unit::Inches,
    },
    DepthPreset {
        label: "Moderate",
        value: 6.0,
        unit: Unit::Inches,
    },
    DepthPreset {
        label: "Heavy",
        value: 1.0,
        unit: Unit::Feet,
    },
    DepthPreset {
        label: "Blizzard",
        value: 3.0,
        unit: Unit::Feet,
    },
    DepthPreset {
        label: "Record",
        value: 2.0,
        unit: Unit::Metres,
    },
];

impl DepthPreset {
    pub fn action(&self) -> ControlAction {
        ControlAction::ApplyPreset {
            value: self.value,
            unit: self.unit,
        }
    }
}

/// Reject depths that cannot be drawn. Zero is allowed.
pub fn validate_depth(value: f64) -> Result<f64, ControlError> {
    if !value.is_finite() {
        return Err(ControlError::NonFiniteDepth);
    }
    if value < 0.0 {
        return Err(ControlError::NegativeDepth(value));
    }
    Ok(value)
}

/// Parse free-text depth input.
pub fn parse_depth(text: &str) -> Result<f64, ControlError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| ControlError::InvalidNumber(text.trim().to_string()))?;
    validate_depth(value)
}

pub fn parse_unit(text: &str) -> Result<Unit, ControlError> {
    Unit::parse(text).ok_or_else(|| ControlError::UnknownUnit(text.to_string()))
}

/// Apply one action to the state. On error the state is left untouched.
pub fn apply_control(
    state: &mut AppState,
    action: &ControlAction,
) -> Result<UpdateScope, ControlError> {
    match action {
        ControlAction::SubmitDepth { value, unit } | ControlAction::ApplyPreset { value, unit } => {
            state.snow_depth_value = validate_depth(*value)?;
            state.unit = *unit;
            Ok(UpdateScope::Full)
        }
        ControlAction::ChangeUnit { unit } => {
            let depth_cm = to_canonical(state.snow_depth_value, state.unit);
            state.snow_depth_value = from_canonical_value(depth_cm, *unit);
            state.unit = *unit;
            Ok(UpdateScope::DisplayOnly)
        }
        ControlAction::SelectReference { key } => {
            let spec = lookup(key).ok_or_else(|| ControlError::UnknownReference(key.clone()))?;
            state.reference_key = spec.key.to_string();
            Ok(UpdateScope::Full)
        }
    }
}

/// Most recent validation failure, shown in the panel's status line.
#[derive(Resource, Debug, Default)]
pub struct ControlStatus {
    pub message: Option<String>,
}

impl ControlStatus {
    pub fn reject(&mut self, error: &ControlError) {
        warn!("Rejected control input: {}", error);
        self.message = Some(error.to_string());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Apply queued control events and request the matching refresh.
pub fn handle_control_events(
    mut events: EventReader<ControlEvent>,
    mut state: ResMut<AppState>,
    mut status: ResMut<ControlStatus>,
    mut rebuild_events: EventWriter<RebuildSceneEvent>,
    mut refresh_events: EventWriter<RefreshDisplayEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match apply_control(&mut state, &event.action) {
            Ok(scope) => {
                info!("Applied {:?} from {:?}", event.action, event.source);
                status.clear();
                if scope == UpdateScope::Full {
                    rebuild_events.write(RebuildSceneEvent);
                }
            }
            Err(error) => {
                status.reject(&error);
                rpc_interface.send_notification(
                    "validation_error",
                    serde_json::json!({ "message": error.to_string() }),
                );
            }
        }
        refresh_events.write(RefreshDisplayEvent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::composer::ComposedScene;
    use crate::engine::units::from_canonical;

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth(" 12.5 "), Ok(12.5));
        assert_eq!(parse_depth("0"), Ok(0.0));
        assert_eq!(
            parse_depth("deep"),
            Err(ControlError::InvalidNumber("deep".to_string()))
        );
        assert_eq!(parse_depth("-3"), Err(ControlError::NegativeDepth(-3.0)));
        assert_eq!(parse_depth("inf"), Err(ControlError::NonFiniteDepth));
        assert_eq!(parse_depth("NaN"), Err(ControlError::NonFiniteDepth));
    }

    #[test]
    fn test_submit_depth_requests_full_update() {
        let mut state = AppState::default();
        let scope = apply_control(
            &mut state,
            &ControlAction::SubmitDepth {
                value: 3.0,
                unit: Unit::Feet,
            },
        );
        assert_eq!(scope, Ok(UpdateScope::Full));
        assert_eq!(state.snow_depth_value, 3.0);
        assert_eq!(state.unit, Unit::Feet);
    }

    #[test]
    fn test_rejected_depth_leaves_state_unchanged() {
        let mut state = AppState::default();
        let before = state.clone();
        let result = apply_control(
            &mut state,
            &ControlAction::SubmitDepth {
                value: -1.0,
                unit: Unit::Metres,
            },
        );
        assert_eq!(result, Err(ControlError::NegativeDepth(-1.0)));
        assert_eq!(state, before);

        let result = apply_control(
            &mut state,
            &ControlAction::ApplyPreset {
                value: f64::NAN,
                unit: Unit::Metres,
            },
        );
        assert_eq!(result, Err(ControlError::NonFiniteDepth));
        assert_eq!(state, before);
    }

    #[test]
    fn test_unit_change_converts_without_rebuild() {
        let mut state = AppState::default();
        apply_control(&mut state, &DEPTH_PRESETS[2].action()).ok();
        assert_eq!(state.depth_cm(), 30.48);

        let scope = apply_control(
            &mut state,
            &ControlAction::ChangeUnit {
                unit: Unit::Centimetres,
            },
        );
        assert_eq!(scope, Ok(UpdateScope::DisplayOnly));
        assert_eq!(state.unit, Unit::Centimetres);
        assert_eq!(from_canonical(state.depth_cm(), state.unit), "30.48");
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let mut state = AppState::default();
        let result = apply_control(
            &mut state,
            &ControlAction::SelectReference {
                key: "giraffe".to_string(),
            },
        );
        assert_eq!(
            result,
            Err(ControlError::UnknownReference("giraffe".to_string()))
        );
        assert_eq!(state.reference_key, "soda-can");
    }

    #[test]
    fn test_presets_match_labels() {
        let labels: Vec<_> = DEPTH_PRESETS.iter().map(|p| p.label).collect();
        assert_eq!(
            labels,
            ["Light Dusting", "Moderate", "Heavy", "Blizzard", "Record"]
        );
        assert_eq!(to_canonical(DEPTH_PRESETS[4].value, DEPTH_PRESETS[4].unit), 200.0);
    }

    fn control_app() -> App {
        use crate::engine::scene::composer::rebuild_scene_on_event;

        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<AppState>()
            .init_resource::<ComposedScene>()
            .init_resource::<ControlStatus>()
            .init_resource::<WebRpcInterface>()
            .add_event::<ControlEvent>()
            .add_event::<RebuildSceneEvent>()
            .add_event::<RefreshDisplayEvent>()
            .add_systems(
                Update,
                (handle_control_events, rebuild_scene_on_event).chain(),
            );
        app
    }

    fn send(app: &mut App, action: ControlAction) {
        app.world_mut().send_event(ControlEvent {
            action,
            source: ControlSource::Panel,
        });
        app.update();
    }

    #[test]
    fn test_preset_then_unit_change_keeps_geometry() {
        let mut app = control_app();
        send(&mut app, DEPTH_PRESETS[2].action());
        let composed = app.world().resource::<ComposedScene>().clone();
        assert_eq!(composed.rebuilds, 1);
        assert!((composed.depth_cm - 30.48).abs() < 1e-9);

        send(
            &mut app,
            ControlAction::ChangeUnit {
                unit: Unit::Centimetres,
            },
        );
        assert_eq!(app.world().resource::<ComposedScene>(), &composed);
        let state = app.world().resource::<AppState>();
        assert_eq!(from_canonical(state.depth_cm(), state.unit), "30.48");
    }

    #[test]
    fn test_invalid_event_sets_status_and_skips_rebuild() {
        let mut app = control_app();
        send(
            &mut app,
            ControlAction::SubmitDepth {
                value: -5.0,
                unit: Unit::Centimetres,
            },
        );
        assert_eq!(app.world().resource::<ComposedScene>().rebuilds, 0);
        assert!(app.world().resource::<ControlStatus>().message.is_some());
        assert!(
            app.world()
                .resource::<WebRpcInterface>()
                .pending_notifications()
                .any(|method| method == "validation_error")
        );

        send(&mut app, DEPTH_PRESETS[0].action());
        assert_eq!(app.world().resource::<ComposedScene>().rebuilds, 1);
        assert!(app.world().resource::<ControlStatus>().message.is_none());
    }
}
