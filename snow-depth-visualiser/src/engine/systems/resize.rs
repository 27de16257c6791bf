use bevy::prelude::*;
use bevy::window::WindowResized;

/// Keep the perspective aspect ratio in step with the window size.
///
/// Bevy's `camera_system` also derives the aspect from the render target, but
/// only in `PostUpdate`; this applies the resize event during `Update`.
pub fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    mut projection_query: Query<&mut Projection, With<Camera3d>>,
) {
    let Some(resized) = resize_events.read().last() else {
        return;
    };
    if resized.width <= 0.0 || resized.height <= 0.0 {
        return;
    }

    for mut projection in &mut projection_query {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = resized.width / resized.height;
        }
    }
    debug!("Viewport resized to {}x{}", resized.width, resized.height);
}
