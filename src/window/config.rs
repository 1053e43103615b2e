// ── WindowMode ────────────────────────────────────────────────────────────────

/// How the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WindowMode {
    /// Decorated window at the configured resolution.
    #[default]
    Windowed,
    /// Borderless window covering the current monitor.
    Fullscreen,
}

impl WindowMode {
    /// The other mode. Bound to F11.
    pub fn toggled(self) -> Self {
        match self {
            WindowMode::Windowed => WindowMode::Fullscreen,
            WindowMode::Fullscreen => WindowMode::Windowed,
        }
    }
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window size snapshot.
///
/// - **physical** is the pixel size of the OS window surface.
/// - **logical** is the canvas resolution the game draws at.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub physical_width: u32,
    pub physical_height: u32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub mode: WindowMode,
}

impl WindowConfig {
    /// Windowed, physical size equal to the logical size.
    pub fn windowed(width: u32, height: u32) -> Self {
        Self {
            physical_width: width,
            physical_height: height,
            logical_width: width,
            logical_height: height,
            mode: WindowMode::Windowed,
        }
    }

    /// `logical_width / logical_height`, or `0.0` for a zero height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height == 0 {
            return 0.0;
        }
        self.logical_width as f32 / self.logical_height as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::windowed(640, 480)
    }
}
