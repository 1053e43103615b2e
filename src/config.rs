use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::Color;
use crate::sprites::SpriteKey;

/// Edge length of one tile in pixels. Hit rects are `tile position × TILE_SIZE`.
pub const TILE_SIZE: f32 = 32.0;

/// Tiles per call that `collision::slither` nudges a blocked body sideways.
pub const SLITHER_SPEED: f32 = 0.05;

/// Magnitudes at or below this are treated as zero by `collision::sgn`.
pub const SGN_THRESHOLD: f32 = 0.0001;

/// Joystick axis values inside this band are ignored for movement.
pub const JOYSTICK_DEAD_ZONE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Where `SpriteKey`s live on the spritesheet, as `(row, col)` cells.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpriteLayout {
    pub wall: (u32, u32),
    pub apple: (u32, u32),
    pub player: (u32, u32),
    pub door_horizontal: (u32, u32),
    pub door_vertical: (u32, u32),
    pub door_open: (u32, u32),
}

impl Default for SpriteLayout {
    fn default() -> Self {
        Self {
            wall: (0, 0),
            apple: (1, 0),
            player: (0, 1),
            door_horizontal: (0, 2),
            door_vertical: (0, 3),
            door_open: (1, 1),
        }
    }
}

impl SpriteLayout {
    pub fn cell(&self, key: SpriteKey) -> (u32, u32) {
        match key {
            SpriteKey::Wall => self.wall,
            SpriteKey::Apple => self.apple,
            SpriteKey::Player => self.player,
            SpriteKey::DoorHorizontal => self.door_horizontal,
            SpriteKey::DoorVertical => self.door_vertical,
            SpriteKey::DoorOpen => self.door_open,
        }
    }
}

/// Game-wide tunables. Every field has a default, so a config file only
/// needs to list what it overrides.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Fixed update rate.
    pub fps: u32,
    /// FOV radius in tiles.
    pub fov_radius: u32,
    /// Player speed in tiles per second.
    pub player_speed: f32,
    pub background: [f32; 4],
    /// Outline every visible tile.
    pub debug_fov: bool,
    pub assets_dir: PathBuf,
    pub spritesheet: String,
    pub sprites: SpriteLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "tilecrawl".into(),
            screen_width: 640,
            screen_height: 480,
            fps: 60,
            fov_radius: 6,
            player_speed: 5.0,
            background: [0.05, 0.05, 0.08, 1.0],
            debug_fov: false,
            assets_dir: PathBuf::from("assets"),
            spritesheet: "spritesheet.png".into(),
            sprites: SpriteLayout::default(),
        }
    }
}

impl GameConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn background_color(&self) -> Color {
        Color(self.background)
    }

    pub fn map_path(&self, map_name: &str) -> PathBuf {
        self.assets_dir.join("maps").join(format!("{map_name}.json"))
    }

    pub fn spritesheet_path(&self) -> PathBuf {
        self.assets_dir.join(&self.spritesheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = GameConfig::from_json_str(r#"{ "fov_radius": 9, "debug_fov": true }"#).unwrap();
        assert_eq!(cfg.fov_radius, 9);
        assert!(cfg.debug_fov);
        assert_eq!(cfg.fps, 60);
        assert_eq!(cfg.sprites, SpriteLayout::default());
    }

    #[test]
    fn map_path_is_under_assets_maps() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.map_path("level1"), PathBuf::from("assets/maps/level1.json"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = GameConfig::load_or_default("definitely/not/here.json").unwrap();
        assert_eq!(cfg.title, "tilecrawl");
    }
}
