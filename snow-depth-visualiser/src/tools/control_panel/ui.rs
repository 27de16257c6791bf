use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;

use super::depth_input::format_input_value;
use super::state::*;
use crate::engine::catalog::REFERENCE_OBJECTS;
use crate::engine::core::app_state::AppState;
use crate::engine::systems::display::{ComparisonText, DepthText, StatusText};
use crate::engine::units::Unit;
use crate::tools::control_manager::DEPTH_PRESETS;

pub const BUTTON_COLOUR: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVER_COLOUR: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED_COLOUR: Color = Color::srgb(0.18, 0.20, 0.24);
pub const BUTTON_SELECTED_COLOUR: Color = Color::srgb(0.20, 0.40, 0.62);
const FIELD_COLOUR: Color = Color::srgb(0.08, 0.09, 0.10);
const FIELD_FOCUSED_BORDER: Color = Color::srgb(0.45, 0.65, 0.90);
const FIELD_BORDER: Color = Color::srgba(0.0, 0.0, 0.0, 0.25);

fn button_node(width: Val, height: f32) -> Node {
    Node {
        width,
        height: Val::Px(height),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

fn tinted_label(text: impl Into<String>, font_size: f32, colour: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(colour),
    )
}

fn label(text: impl Into<String>, font_size: f32) -> (Text, TextFont, TextColor) {
    tinted_label(text, font_size, Color::WHITE)
}

fn section_heading(body: &mut ChildSpawnerCommands, text: &str) {
    body.spawn(tinted_label(text, 14.0, Color::srgb(0.70, 0.74, 0.80)));
}

fn button_row() -> Node {
    Node {
        width: Val::Percent(100.0),
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::Wrap,
        row_gap: Val::Px(4.0),
        column_gap: Val::Px(4.0),
        ..default()
    }
}

// Spawns the control panel with header, depth input, presets, reference picker and readouts
pub fn spawn_control_panel(
    mut commands: Commands,
    state: Res<ControlPanelUiState>,
    app_state: Res<AppState>,
    mut input: ResMut<DepthInputState>,
) {
    let width = if state.collapsed {
        state.closed_width
    } else {
        state.open_width
    };
    let body_display = if state.collapsed {
        Display::None
    } else {
        Display::Flex
    };
    input.text = format_input_value(app_state.snow_depth_value);

    commands
        .spawn((
            ControlPanelRoot,
            Name::new("ControlPanel"),
            RelativeCursorPosition::default(),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.92)),
            Node {
                width: Val::Px(width),
                min_width: Val::Px(0.0),
                max_height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                justify_content: JustifyContent::FlexStart,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            let (pad, btn) = if state.collapsed {
                (4.0, 24.0)
            } else {
                (12.0, 28.0)
            };

            parent
                .spawn((
                    HeaderNode,
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(pad)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: if state.collapsed {
                            JustifyContent::FlexEnd
                        } else {
                            JustifyContent::SpaceBetween
                        },
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        TitleText,
                        Name::new("Title"),
                        label("Snow Depth", 18.0),
                        Node {
                            display: body_display,
                            ..default()
                        },
                    ));

                    let chevron = if state.collapsed { ">" } else { "<" };
                    header
                        .spawn((
                            CollapseButton,
                            Name::new("CollapseButton"),
                            Button,
                            BackgroundColor(BUTTON_COLOUR),
                            BorderColor(FIELD_BORDER),
                            button_node(Val::Px(btn), btn),
                        ))
                        .with_children(|btn_parent| {
                            btn_parent.spawn((CollapseLabel, label(chevron, 18.0)));
                        });
                });

            parent
                .spawn((
                    ControlPanelBody,
                    Name::new("Body"),
                    BackgroundColor(Color::srgba(0.12, 0.13, 0.15, 0.0)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    spawn_depth_controls(body, &input.text, app_state.unit);
                    spawn_presets(body);
                    spawn_reference_picker(body, &app_state.reference_key);
                    spawn_readouts(body);
                });
        });
}

fn spawn_depth_controls(body: &mut ChildSpawnerCommands, text: &str, unit: Unit) {
    section_heading(body, "Depth");

    body.spawn((
        DepthInputField,
        Name::new("DepthInput"),
        Button,
        BackgroundColor(FIELD_COLOUR),
        BorderColor(FIELD_BORDER),
        Node {
            justify_content: JustifyContent::FlexStart,
            padding: UiRect::horizontal(Val::Px(8.0)),
            ..button_node(Val::Percent(100.0), 32.0)
        },
    ))
    .with_children(|field| {
        field.spawn((DepthInputLabel, label(text, 16.0)));
    });

    body.spawn((Name::new("UnitRow"), button_row())).with_children(|row| {
        for candidate in Unit::ALL {
            let colour = if candidate == unit {
                BUTTON_SELECTED_COLOUR
            } else {
                BUTTON_COLOUR
            };
            row.spawn((
                UnitButton(candidate),
                Button,
                BackgroundColor(colour),
                BorderColor(FIELD_BORDER),
                button_node(Val::Px(62.0), 28.0),
            ))
            .with_children(|btn| {
                btn.spawn(label(candidate.label(), 14.0));
            });
        }
    });

    body.spawn((
        UpdateButton,
        Name::new("UpdateButton"),
        Button,
        BackgroundColor(BUTTON_COLOUR),
        BorderColor(FIELD_BORDER),
        button_node(Val::Percent(100.0), 36.0),
    ))
    .with_children(|btn| {
        btn.spawn(label("Update", 16.0));
    });
}

fn spawn_presets(body: &mut ChildSpawnerCommands) {
    section_heading(body, "Presets");

    body.spawn((Name::new("PresetRow"), button_row())).with_children(|row| {
        for (index, preset) in DEPTH_PRESETS.iter().enumerate() {
            row.spawn((
                PresetButton(index),
                Button,
                BackgroundColor(BUTTON_COLOUR),
                BorderColor(FIELD_BORDER),
                Node {
                    padding: UiRect::horizontal(Val::Px(6.0)),
                    ..button_node(Val::Auto, 28.0)
                },
            ))
            .with_children(|btn| {
                btn.spawn(label(
                    format!("{} ({} {})", preset.label, preset.value, preset.unit),
                    13.0,
                ));
            });
        }
    });
}

fn spawn_reference_picker(body: &mut ChildSpawnerCommands, selected: &str) {
    section_heading(body, "Compare with");

    body.spawn((Name::new("ReferenceRow"), button_row()))
        .with_children(|row| {
            for reference in REFERENCE_OBJECTS {
                let colour = if reference.key == selected {
                    BUTTON_SELECTED_COLOUR
                } else {
                    BUTTON_COLOUR
                };
                row.spawn((
                    ReferenceButton(reference.key),
                    Button,
                    BackgroundColor(colour),
                    BorderColor(FIELD_BORDER),
                    button_node(Val::Px(134.0), 28.0),
                ))
                .with_children(|btn| {
                    btn.spawn(label(reference.display_name, 13.0));
                });
            }
        });
}

fn spawn_readouts(body: &mut ChildSpawnerCommands) {
    body.spawn((DepthText, Name::new("DepthReadout"), label("", 20.0)));
    body.spawn((ComparisonText, Name::new("ComparisonReadout"), label("", 14.0)));
    body.spawn((
        StatusText,
        Name::new("StatusLine"),
        tinted_label("", 13.0, Color::srgb(1.0, 0.45, 0.40)),
    ));
}

pub fn apply_collapse_state(
    state: Res<ControlPanelUiState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<ControlPanelRoot>>,
        Query<&mut Node, With<ControlPanelBody>>,
        Query<&mut Node, With<HeaderNode>>,
        Query<&mut Node, With<TitleText>>,
        Query<&mut Node, With<CollapseButton>>,
    )>,
    mut chevrons: Query<&mut Text, With<CollapseLabel>>,
) {
    if !state.is_changed() {
        return;
    }
    let shown = if state.collapsed {
        Display::None
    } else {
        Display::Flex
    };

    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(if state.collapsed {
            state.closed_width
        } else {
            state.open_width
        });
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = shown;
    }
    if let Ok(mut n) = nodes.p2().single_mut() {
        let pad = if state.collapsed { 4.0 } else { 12.0 };
        n.padding = UiRect::all(Val::Px(pad));
        n.justify_content = if state.collapsed {
            JustifyContent::FlexEnd
        } else {
            JustifyContent::SpaceBetween
        };
    }
    if let Ok(mut n) = nodes.p3().single_mut() {
        n.display = shown;
    }
    if let Ok(mut n) = nodes.p4().single_mut() {
        let s = if state.collapsed { 24.0 } else { 28.0 };
        n.width = Val::Px(s);
        n.height = Val::Px(s);
    }
    for mut t in &mut chevrons {
        t.0 = (if state.collapsed { ">" } else { "<" }).to_string();
    }
}

/// Highlight the active unit and reference, and mirror the stored depth
/// into the input field.
pub fn reflect_app_state(
    app_state: Res<AppState>,
    mut input: ResMut<DepthInputState>,
    mut unit_buttons: Query<(&UnitButton, &mut BackgroundColor), Without<ReferenceButton>>,
    mut reference_buttons: Query<(&ReferenceButton, &mut BackgroundColor), Without<UnitButton>>,
) {
    if !app_state.is_changed() {
        return;
    }
    if !input.edited {
        input.text = format_input_value(app_state.snow_depth_value);
    }

    for (button, mut bg) in &mut unit_buttons {
        *bg = BackgroundColor(if button.0 == app_state.unit {
            BUTTON_SELECTED_COLOUR
        } else {
            BUTTON_COLOUR
        });
    }
    for (button, mut bg) in &mut reference_buttons {
        *bg = BackgroundColor(if button.0 == app_state.reference_key {
            BUTTON_SELECTED_COLOUR
        } else {
            BUTTON_COLOUR
        });
    }
}

/// Show the typed text with a caret while focused.
pub fn reflect_depth_input(
    input: Res<DepthInputState>,
    mut labels: Query<&mut Text, With<DepthInputLabel>>,
    mut fields: Query<&mut BorderColor, With<DepthInputField>>,
) {
    if !input.is_changed() {
        return;
    }
    let shown = if input.focused {
        format!("{}|", input.text)
    } else {
        input.text.clone()
    };
    for mut text in &mut labels {
        if text.0 != shown {
            text.0 = shown.clone();
        }
    }
    for mut border in &mut fields {
        *border = BorderColor(if input.focused {
            FIELD_FOCUSED_BORDER
        } else {
            FIELD_BORDER
        });
    }
}
