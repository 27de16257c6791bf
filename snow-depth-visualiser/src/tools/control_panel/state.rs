use bevy::prelude::*;

use crate::engine::units::Unit;

// Resources
#[derive(Resource)]
pub struct ControlPanelUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for ControlPanelUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: 300.0,
            closed_width: 32.0,
        }
    }
}

/// Text typed into the depth field and whether it has keyboard focus.
///
/// While `edited` is false the text mirrors the stored depth and is rewritten
/// whenever the state changes; typed text is left alone until it is submitted.
#[derive(Resource, Debug, Default)]
pub struct DepthInputState {
    pub text: String,
    pub focused: bool,
    pub edited: bool,
}

// Components
#[derive(Component)]
pub struct ControlPanelRoot;
#[derive(Component)]
pub struct ControlPanelBody;
#[derive(Component)]
pub struct HeaderNode;
#[derive(Component)]
pub struct TitleText;
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;
#[derive(Component)]
pub struct DepthInputField;
#[derive(Component)]
pub struct DepthInputLabel;
#[derive(Component)]
pub struct UpdateButton;
#[derive(Component)]
pub struct UnitButton(pub Unit);
/// Index into `DEPTH_PRESETS`.
#[derive(Component)]
pub struct PresetButton(pub usize);
#[derive(Component)]
pub struct ReferenceButton(pub &'static str);
