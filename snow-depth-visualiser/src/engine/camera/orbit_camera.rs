use std::f32::consts::PI;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::camera::*;

/// What a held pointer button is currently doing to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Orbit,
    Pan,
}

/// Spherical-coordinate camera around a pannable look-at point.
///
/// Polar angle is kept inside `[POLAR_MARGIN, PI - POLAR_MARGIN]` and distance
/// inside `[MIN_DISTANCE, MAX_DISTANCE]`. Motion stops as soon as input stops.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub pan_offset: Vec2,
    pub drag_mode: DragMode,
    pub last_cursor_pos: Option<Vec2>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: INITIAL_AZIMUTH,
            polar: INITIAL_POLAR,
            distance: INITIAL_DISTANCE,
            pan_offset: Vec2::ZERO,
            drag_mode: DragMode::None,
            last_cursor_pos: None,
        }
    }
}

impl OrbitCamera {
    /// Rotate by a screen-space pointer delta in pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth += delta.x * ORBIT_SENSITIVITY;
        self.polar = (self.polar + delta.y * ORBIT_SENSITIVITY)
            .clamp(POLAR_MARGIN, PI - POLAR_MARGIN);
    }

    /// Move the look-at point; dragging down moves it down in view.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset.x += delta.x * PAN_SENSITIVITY;
        self.pan_offset.y -= delta.y * PAN_SENSITIVITY;
    }

    /// Dolly by a wheel delta in pixels; positive moves away.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.distance =
            (self.distance + wheel_delta * ZOOM_SENSITIVITY).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn target(&self) -> Vec3 {
        Vec3::new(self.pan_offset.x, self.pan_offset.y, 0.0)
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.distance * sin_polar * cos_azimuth + self.pan_offset.x,
            self.distance * cos_polar + self.pan_offset.y,
            self.distance * sin_polar * sin_azimuth,
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target(), Vec3::Y)
    }

    pub fn begin_drag(&mut self, mode: DragMode) {
        self.drag_mode = mode;
    }

    pub fn end_drag(&mut self) {
        self.drag_mode = DragMode::None;
    }

    /// Feed a new cursor position; applies the delta to the active drag mode.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if let Some(last) = self.last_cursor_pos {
            let delta = position - last;
            match self.drag_mode {
                DragMode::Orbit => self.orbit(delta),
                DragMode::Pan => self.pan(delta),
                DragMode::None => {}
            }
        }
        self.last_cursor_pos = Some(position);
    }
}

/// Set while the pointer is over UI that should swallow camera input.
#[derive(Resource, Default)]
pub struct PointerCapture {
    pub over_ui: bool,
}

/// Wheel event converted to host pixels, positive zooming out.
fn wheel_pixels(event: &MouseWheel) -> f32 {
    let pixels = match event.unit {
        MouseScrollUnit::Line => event.y * PIXELS_PER_WHEEL_LINE,
        MouseScrollUnit::Pixel => event.y,
    };
    -pixels
}

pub fn camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut scroll_events: EventReader<MouseWheel>,
    capture: Res<PointerCapture>,
) {
    if !capture.over_ui {
        if mouse_button.just_pressed(MouseButton::Left) {
            orbit.begin_drag(DragMode::Orbit);
        } else if mouse_button.just_pressed(MouseButton::Right) {
            orbit.begin_drag(DragMode::Pan);
        }
    }

    if mouse_button.any_just_released([MouseButton::Left, MouseButton::Right]) {
        orbit.end_drag();
    }

    for cursor in cursor_moved.read() {
        orbit.cursor_moved(cursor.position);
    }

    let scroll: f32 = scroll_events.read().map(wheel_pixels).sum();
    if scroll != 0.0 && !capture.over_ui {
        orbit.zoom(scroll);
    }
}

/// Recompute the camera transform whenever the orbit state changes.
pub fn apply_camera_transform(
    orbit: Res<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = orbit.transform();
    }
}
