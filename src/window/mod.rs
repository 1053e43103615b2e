pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config.mode` to `window`.
///
/// Windowed restores decorations and requests the logical size back; the
/// final size arrives later as `WindowEvent::Resized`. Fullscreen goes
/// borderless on the monitor the window is on.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            let _ = window.request_inner_size(PhysicalSize::new(
                config.logical_width,
                config.logical_height,
            ));
        }
        WindowMode::Fullscreen => {
            window.set_fullscreen(Some(Fullscreen::Borderless(window.current_monitor())));
        }
    }
    log::info!("window mode set to {:?}", config.mode);
}
