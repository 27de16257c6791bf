use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use super::state::{DepthInputField, DepthInputState};
use crate::engine::core::app_state::AppState;
use crate::engine::systems::display::RefreshDisplayEvent;
use crate::engine::units::format_fixed;
use crate::tools::control_manager::{
    ControlAction, ControlEvent, ControlSource, ControlStatus, parse_depth,
};

const MAX_INPUT_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited,
    Submit,
    Blur,
    Ignored,
}

/// Apply one logical key press to the field text.
pub fn apply_key(text: &mut String, key: &Key) -> KeyOutcome {
    match key {
        Key::Enter => KeyOutcome::Submit,
        Key::Escape => KeyOutcome::Blur,
        Key::Backspace => {
            if text.pop().is_some() {
                KeyOutcome::Edited
            } else {
                KeyOutcome::Ignored
            }
        }
        Key::Character(chars) => {
            let accepted: String = chars
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E'))
                .collect();
            if accepted.is_empty() || text.len() + accepted.len() > MAX_INPUT_CHARS {
                return KeyOutcome::Ignored;
            }
            text.push_str(&accepted);
            KeyOutcome::Edited
        }
        _ => KeyOutcome::Ignored,
    }
}

/// Stored depth as the field shows it: two decimals at most, no trailing zeros.
pub fn format_input_value(value: f64) -> String {
    let fixed = format_fixed(value, 2);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse the field and queue a depth submission, or report why it was rejected.
///
/// An untouched field only shows the stored depth rounded for display, so the
/// stored value is resubmitted as is.
pub fn submit_depth_input(
    input: &mut DepthInputState,
    app_state: &AppState,
    status: &mut ControlStatus,
    control_events: &mut EventWriter<ControlEvent>,
    refresh_events: &mut EventWriter<RefreshDisplayEvent>,
) {
    let parsed = if input.edited {
        parse_depth(&input.text)
    } else {
        Ok(app_state.snow_depth_value)
    };

    match parsed {
        Ok(value) => {
            input.edited = false;
            control_events.write(ControlEvent {
                action: ControlAction::SubmitDepth {
                    value,
                    unit: app_state.unit,
                },
                source: ControlSource::Panel,
            });
        }
        Err(error) => {
            status.reject(&error);
            refresh_events.write(RefreshDisplayEvent);
        }
    }
}

// Clicking the field focuses it; clicking anywhere else drops focus
pub fn depth_field_focus(
    fields: Query<&Interaction, With<DepthInputField>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<DepthInputState>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let pressed = fields.iter().any(|i| *i == Interaction::Pressed);
    if input.focused != pressed {
        input.focused = pressed;
    }
}

pub fn depth_field_keyboard(
    mut keys: EventReader<KeyboardInput>,
    mut input: ResMut<DepthInputState>,
    app_state: Res<AppState>,
    mut status: ResMut<ControlStatus>,
    mut control_events: EventWriter<ControlEvent>,
    mut refresh_events: EventWriter<RefreshDisplayEvent>,
) {
    if !input.focused {
        keys.clear();
        return;
    }

    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        let mut text = input.text.clone();
        match apply_key(&mut text, &key.logical_key) {
            KeyOutcome::Edited => {
                input.text = text;
                input.edited = true;
            }
            KeyOutcome::Submit => submit_depth_input(
                &mut input,
                &app_state,
                &mut status,
                &mut control_events,
                &mut refresh_events,
            ),
            KeyOutcome::Blur => input.focused = false,
            KeyOutcome::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut text = String::new();
        for key in ["1", "2", ".", "5"] {
            assert_eq!(
                apply_key(&mut text, &Key::Character(key.into())),
                KeyOutcome::Edited
            );
        }
        assert_eq!(text, "12.5");
        assert_eq!(apply_key(&mut text, &Key::Backspace), KeyOutcome::Edited);
        assert_eq!(text, "12.");
        assert_eq!(
            apply_key(&mut text, &Key::Character("x".into())),
            KeyOutcome::Ignored
        );
        assert_eq!(text, "12.");
    }

    #[test]
    fn test_enter_submits_and_escape_blurs() {
        let mut text = "4".to_string();
        assert_eq!(apply_key(&mut text, &Key::Enter), KeyOutcome::Submit);
        assert_eq!(apply_key(&mut text, &Key::Escape), KeyOutcome::Blur);
        assert_eq!(text, "4");
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut text = String::new();
        assert_eq!(apply_key(&mut text, &Key::Backspace), KeyOutcome::Ignored);
    }

    #[test]
    fn test_input_length_is_capped() {
        let mut text = "1".repeat(MAX_INPUT_CHARS);
        assert_eq!(
            apply_key(&mut text, &Key::Character("1".into())),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn test_format_input_value() {
        assert_eq!(format_input_value(10.0), "10");
        assert_eq!(format_input_value(30.48), "30.48");
        assert_eq!(format_input_value(0.5), "0.5");
        assert_eq!(format_input_value(0.0), "0");
        assert_eq!(format_input_value(100.0), "100");
    }

    fn keyboard_app() -> App {
        let mut app = App::new();
        app.init_resource::<AppState>()
            .init_resource::<ControlStatus>()
            .insert_resource(DepthInputState {
                text: String::new(),
                focused: true,
                edited: false,
            })
            .add_event::<KeyboardInput>()
            .add_event::<ControlEvent>()
            .add_event::<RefreshDisplayEvent>()
            .add_systems(Update, depth_field_keyboard);
        app
    }

    fn press(app: &mut App, key: Key) {
        app.world_mut().send_event(KeyboardInput {
            key_code: KeyCode::Unidentified(bevy::input::keyboard::NativeKeyCode::Unidentified),
            logical_key: key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    fn submitted(app: &App) -> Vec<ControlAction> {
        let events = app.world().resource::<Events<ControlEvent>>();
        events
            .iter_current_update_events()
            .map(|e| e.action.clone())
            .collect()
    }

    #[test]
    fn test_enter_sends_submit_depth() {
        let mut app = keyboard_app();
        press(&mut app, Key::Character("7".into()));
        press(&mut app, Key::Character("5".into()));
        press(&mut app, Key::Enter);
        app.update();

        assert_eq!(
            submitted(&app),
            vec![ControlAction::SubmitDepth {
                value: 75.0,
                unit: crate::engine::units::Unit::Centimetres
            }]
        );
    }

    #[test]
    fn test_bad_input_reports_status() {
        let mut app = keyboard_app();
        press(&mut app, Key::Character("-".into()));
        press(&mut app, Key::Character("2".into()));
        press(&mut app, Key::Enter);
        app.update();

        assert!(submitted(&app).is_empty());
        assert!(app.world().resource::<ControlStatus>().message.is_some());
    }
}
