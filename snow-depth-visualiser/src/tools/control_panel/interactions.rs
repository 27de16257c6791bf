use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;

use super::depth_input::submit_depth_input;
use super::state::*;
use super::ui::{BUTTON_COLOUR, BUTTON_HOVER_COLOUR, BUTTON_PRESSED_COLOUR, BUTTON_SELECTED_COLOUR};
use crate::engine::camera::orbit_camera::PointerCapture;
use crate::engine::core::app_state::AppState;
use crate::engine::systems::display::RefreshDisplayEvent;
use crate::tools::control_manager::{
    ControlAction, ControlEvent, ControlSource, ControlStatus, DEPTH_PRESETS,
};

fn idle_colour(selected: bool) -> BackgroundColor {
    BackgroundColor(if selected {
        BUTTON_SELECTED_COLOUR
    } else {
        BUTTON_COLOUR
    })
}

fn panel_event(action: ControlAction) -> ControlEvent {
    ControlEvent {
        action,
        source: ControlSource::Panel,
    }
}

// Chevron toggles collapse state
pub fn collapse_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CollapseButton>),
    >,
    mut state: ResMut<ControlPanelUiState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                state.collapsed = !state.collapsed;
                *bg = BackgroundColor(BUTTON_PRESSED_COLOUR);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER_COLOUR),
            Interaction::None => *bg = BackgroundColor(BUTTON_COLOUR),
        }
    }
}

pub fn update_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<UpdateButton>),
    >,
    mut input: ResMut<DepthInputState>,
    app_state: Res<AppState>,
    mut status: ResMut<ControlStatus>,
    mut control_events: EventWriter<ControlEvent>,
    mut refresh_events: EventWriter<RefreshDisplayEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                submit_depth_input(
                    &mut input,
                    &app_state,
                    &mut status,
                    &mut control_events,
                    &mut refresh_events,
                );
                *bg = BackgroundColor(BUTTON_PRESSED_COLOUR);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER_COLOUR),
            Interaction::None => *bg = BackgroundColor(BUTTON_COLOUR),
        }
    }
}

// Unit buttons convert the current depth; geometry and typed text are left alone
pub fn unit_button_interaction(
    mut q: Query<
        (&Interaction, &UnitButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    app_state: Res<AppState>,
    mut control_events: EventWriter<ControlEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                if button.0 != app_state.unit {
                    control_events.write(panel_event(ControlAction::ChangeUnit { unit: button.0 }));
                }
                *bg = BackgroundColor(BUTTON_PRESSED_COLOUR);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER_COLOUR),
            Interaction::None => *bg = idle_colour(button.0 == app_state.unit),
        }
    }
}

pub fn preset_button_interaction(
    mut q: Query<
        (&Interaction, &PresetButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut input: ResMut<DepthInputState>,
    mut control_events: EventWriter<ControlEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                if let Some(preset) = DEPTH_PRESETS.get(button.0) {
                    // Preset replaces whatever was typed
                    input.edited = false;
                    control_events.write(panel_event(preset.action()));
                }
                *bg = BackgroundColor(BUTTON_PRESSED_COLOUR);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER_COLOUR),
            Interaction::None => *bg = BackgroundColor(BUTTON_COLOUR),
        }
    }
}

pub fn reference_button_interaction(
    mut q: Query<
        (&Interaction, &ReferenceButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    app_state: Res<AppState>,
    mut control_events: EventWriter<ControlEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                if button.0 != app_state.reference_key {
                    control_events.write(panel_event(ControlAction::SelectReference {
                        key: button.0.to_string(),
                    }));
                }
                *bg = BackgroundColor(BUTTON_PRESSED_COLOUR);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER_COLOUR),
            Interaction::None => *bg = idle_colour(button.0 == app_state.reference_key),
        }
    }
}

// Camera input is ignored while the cursor is over the panel
pub fn update_pointer_capture(
    panels: Query<&RelativeCursorPosition, With<ControlPanelRoot>>,
    mut capture: ResMut<PointerCapture>,
) {
    let over_ui = panels.iter().any(|p| p.mouse_over());
    if capture.over_ui != over_ui {
        capture.over_ui = over_ui;
    }
}
