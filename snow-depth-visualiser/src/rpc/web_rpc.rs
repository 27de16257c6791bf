use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::catalog::{REFERENCE_OBJECTS, lookup};
use crate::engine::core::app_state::AppState;
use crate::engine::systems::display::DisplayText;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::tools::control_manager::{
    ControlAction, ControlEvent, ControlSource, DEPTH_PRESETS, parse_unit, validate_depth,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> impl Iterator<Item = &str> {
        self.outgoing_notifications.iter().map(|n| n.method.as_str())
    }

    #[cfg(test)]
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the postMessage bridge for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // JS owns the closure from here on
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages received by the wasm listener, drained each frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    state: Res<AppState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut control_events: EventWriter<ControlEvent>,
) {
    let fps = smoothed_fps(&diagnostics).unwrap_or(0.0);

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut actions = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &state, fps, &mut actions) {
                    rpc_interface.queue_response(response);
                }
                for action in actions {
                    control_events.write(ControlEvent {
                        action,
                        source: ControlSource::Rpc,
                    });
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Answer one request. Control methods push their action onto `actions`;
/// only requests carrying an id get a response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    state: &AppState,
    fps: f64,
    actions: &mut Vec<ControlAction>,
) -> Option<RpcResponse> {
    let result = match control_action_for(&request.method, &request.params) {
        Some(parsed) => parsed.map(|action| {
            info!("Control request via RPC: {:?}", action);
            actions.push(action);
            serde_json::json!({ "success": true })
        }),
        None => match request.method.as_str() {
            "get_state" => handle_get_state(state),
            "get_reference_objects" => Ok(serde_json::json!({ "objects": REFERENCE_OBJECTS })),
            "get_presets" => Ok(serde_json::json!({ "presets": DEPTH_PRESETS })),
            "get_fps" => Ok(serde_json::json!({ "fps": fps as f32 })),
            _ => {
                warn!("Unknown RPC method: {}", request.method);
                return request.id.clone().map(|id| {
                    create_error_response(
                        id,
                        -32601,
                        "Method not found",
                        Some(serde_json::json!({"method": request.method})),
                    )
                });
            }
        },
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

#[derive(Deserialize)]
struct DepthParams {
    value: f64,
    unit: String,
}

#[derive(Deserialize)]
struct UnitParams {
    unit: String,
}

#[derive(Deserialize)]
struct ReferenceParams {
    key: String,
}

/// Map a control method and its params to an action, or `None` if `method`
/// is not a control method.
pub fn control_action_for(
    method: &str,
    params: &serde_json::Value,
) -> Option<Result<ControlAction, RpcError>> {
    let parsed = match method {
        "set_depth" | "apply_preset" => {
            parse_depth_params(params).map(|(value, unit)| match method {
                "set_depth" => ControlAction::SubmitDepth { value, unit },
                _ => ControlAction::ApplyPreset { value, unit },
            })
        }
        "set_unit" => serde_json::from_value::<UnitParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected 'unit' parameter"))
            .and_then(|p| parse_unit(&p.unit).map_err(|e| RpcError::invalid_params(&e.to_string())))
            .map(|unit| ControlAction::ChangeUnit { unit }),
        "select_reference" => serde_json::from_value::<ReferenceParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected 'key' parameter"))
            .and_then(|p| match lookup(&p.key) {
                Some(spec) => Ok(ControlAction::SelectReference {
                    key: spec.key.to_string(),
                }),
                None => Err(RpcError::invalid_params(&format!(
                    "Unknown reference object: {}",
                    p.key
                ))),
            }),
        _ => return None,
    };
    Some(parsed)
}

fn parse_depth_params(
    params: &serde_json::Value,
) -> Result<(f64, crate::engine::units::Unit), RpcError> {
    let depth = serde_json::from_value::<DepthParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'value' and 'unit' parameters"))?;
    let value = validate_depth(depth.value).map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    let unit = parse_unit(&depth.unit).map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    Ok((value, unit))
}

fn handle_get_state(state: &AppState) -> Result<serde_json::Value, RpcError> {
    let display = DisplayText::from_state(state).ok_or_else(|| {
        RpcError::internal_error(&format!("Unknown reference key: {}", state.reference_key))
    })?;

    Ok(serde_json::json!({
        "value": state.snow_depth_value,
        "unit": state.unit,
        "depth_cm": state.depth_cm(),
        "reference_key": state.reference_key,
        "depth": display.depth,
        "comparison": display.comparison,
    }))
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications, then responses, to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::units::Unit;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(1)),
        }
    }

    fn rpc_app() -> App {
        let mut app = App::new();
        app.init_resource::<AppState>()
            .init_resource::<WebRpcInterface>()
            .init_resource::<DiagnosticsStore>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<ControlEvent>()
            .add_systems(Update, handle_rpc_messages);
        app
    }

    fn deliver(app: &mut App, content: &str) {
        app.world_mut().send_event(IncomingRpcMessage {
            content: content.to_string(),
        });
    }

    #[test]
    fn test_messages_become_rpc_control_events() {
        let mut app = rpc_app();
        deliver(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"set_depth","params":{"value":2,"unit":"ft"},"id":3}"#,
        );
        deliver(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_reference","params":{"key":"door"}}"#,
        );
        deliver(&mut app, "not json");
        app.update();

        let events: Vec<(ControlAction, ControlSource)> = app
            .world()
            .resource::<Events<ControlEvent>>()
            .iter_current_update_events()
            .map(|e| (e.action.clone(), e.source))
            .collect();
        assert_eq!(
            events,
            vec![
                (
                    ControlAction::SubmitDepth {
                        value: 2.0,
                        unit: Unit::Feet
                    },
                    ControlSource::Rpc
                ),
                (
                    ControlAction::SelectReference {
                        key: "door".to_string()
                    },
                    ControlSource::Rpc
                ),
            ]
        );

        // Only the request with an id is answered
        let responses = app.world().resource::<WebRpcInterface>().pending_responses();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, Some(json!(3)));
        assert_eq!(responses[0].result, Some(json!({ "success": true })));
    }

    #[test]
    fn test_rejected_message_answers_without_event() {
        let mut app = rpc_app();
        deliver(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"set_depth","params":{"value":-1,"unit":"cm"},"id":4}"#,
        );
        app.update();

        assert!(app.world().resource::<Events<ControlEvent>>().is_empty());
        let responses = app.world().resource::<WebRpcInterface>().pending_responses();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].error.as_ref().map(|e| e.code), Some(-32602));
    }

    fn respond(req: &RpcRequest) -> (Option<RpcResponse>, Vec<ControlAction>) {
        let mut actions = Vec::new();
        let response = handle_rpc_request(req, &AppState::default(), 60.0, &mut actions);
        (response, actions)
    }

    #[test]
    fn test_set_depth_maps_to_submit() {
        let action = control_action_for("set_depth", &json!({"value": 6, "unit": "inches"}));
        assert_eq!(
            action,
            Some(Ok(ControlAction::SubmitDepth {
                value: 6.0,
                unit: Unit::Inches
            }))
        );
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        for (method, params) in [
            ("set_depth", json!({"value": -1, "unit": "cm"})),
            ("set_depth", json!({"value": 1, "unit": "furlongs"})),
            ("apply_preset", json!({"depth": 1})),
            ("set_unit", json!({})),
            ("select_reference", json!({"key": "giraffe"})),
        ] {
            let result = control_action_for(method, &params);
            assert_eq!(
                result.and_then(|r| r.err()).map(|e| e.code),
                Some(-32602),
                "{method} {params}"
            );
        }
    }

    #[test]
    fn test_control_request_queues_action() {
        let (response, actions) = respond(&request("select_reference", json!({"key": "car"})));
        assert_eq!(
            actions,
            vec![ControlAction::SelectReference {
                key: "car".to_string()
            }]
        );
        let response = response.unwrap();
        assert!(response.error.is_none());
        assert_eq!(response.id, Some(json!(1)));
    }

    #[test]
    fn test_notification_applies_without_response() {
        let mut req = request("set_unit", json!({"unit": "m"}));
        req.id = None;
        let (response, actions) = respond(&req);
        assert!(response.is_none());
        assert_eq!(actions, vec![ControlAction::ChangeUnit { unit: Unit::Metres }]);
    }

    #[test]
    fn test_unknown_method() {
        let (response, actions) = respond(&request("launch_snowplough", json!({})));
        assert!(actions.is_empty());
        assert_eq!(response.and_then(|r| r.error).map(|e| e.code), Some(-32601));
    }

    #[test]
    fn test_queries() {
        let (response, _) = respond(&request("get_reference_objects", json!(null)));
        let result = response.and_then(|r| r.result).unwrap();
        let objects = result["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 6);
        assert_eq!(objects[3]["display_name"], "Average Person");
        assert_eq!(objects[3]["height_cm"], 170.0);

        let (response, _) = respond(&request("get_presets", json!(null)));
        let result = response.and_then(|r| r.result).unwrap();
        assert_eq!(result["presets"][2]["unit"], "ft");

        let (response, _) = respond(&request("get_state", json!(null)));
        let result = response.and_then(|r| r.result).unwrap();
        assert_eq!(result["unit"], "cm");
        assert_eq!(result["comparison"], "That's 83.3% of a Soda Can (12 cm)");

        let (response, _) = respond(&request("get_fps", json!(null)));
        assert_eq!(response.and_then(|r| r.result).unwrap()["fps"], 60.0);
    }

    #[test]
    fn test_request_params_default_to_null() {
        let req: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_state","id":7}"#).unwrap();
        assert!(req.params.is_null());
    }
}
