// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// The canvas is drawn at the logical resolution and stretched onto the window.
// When the window aspect differs (borderless fullscreen on a wider monitor),
// the frame is scaled uniformly and centred, leaving bars on two sides.

use crate::window::WindowConfig;

/// Rectangle in physical pixels that the frame is presented into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest uniformly scaled rectangle of the logical size that fits inside the
/// physical size, centred on both axes.
///
/// A zero logical dimension yields an empty viewport at the origin.
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    if config.logical_width == 0 || config.logical_height == 0 {
        return Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }

    let pw = config.physical_width as f32;
    let ph = config.physical_height as f32;
    let lw = config.logical_width as f32;
    let lh = config.logical_height as f32;

    let scale = (pw / lw).min(ph / lh);
    let width = lw * scale;
    let height = lh * scale;

    Viewport { x: (pw - width) / 2.0, y: (ph - height) / 2.0, width, height }
}
