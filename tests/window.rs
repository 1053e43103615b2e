use tilecrawl::window::*;

#[test]
fn default_is_640x480_windowed() {
    let cfg = WindowConfig::default();
    assert_eq!((cfg.physical_width, cfg.physical_height), (640, 480));
    assert_eq!((cfg.logical_width, cfg.logical_height), (640, 480));
    assert_eq!(cfg.mode, WindowMode::Windowed);
}

#[test]
fn aspect_ratio_4x3() {
    let ratio = WindowConfig::windowed(800, 600).aspect_ratio();
    assert!((ratio - 4.0 / 3.0).abs() < 1e-5, "expected 4/3, got {ratio}");
}

#[test]
fn aspect_ratio_zero_height_returns_zero() {
    assert_eq!(WindowConfig::windowed(1920, 0).aspect_ratio(), 0.0);
}

#[test]
fn mode_toggles_back_and_forth() {
    let mode = WindowMode::Windowed.toggled();
    assert_eq!(mode, WindowMode::Fullscreen);
    assert_eq!(mode.toggled(), WindowMode::Windowed);
}
