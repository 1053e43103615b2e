//! Map documents: a JSON object list plus trigger regions.
//!
//! ```json
//! {
//!   "width": 20, "height": 15, "width_screen": 640, "height_screen": 480,
//!   "objects": [ { "name": "PLAYER", "x": 2, "y": 3 },
//!                { "name": "DOOR", "x": 5, "y": 3, "dir": "v" } ],
//!   "triggers": [ { "x": 64, "y": 64, "width": 32, "height": 32, "text": "Hello" } ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sprites::DoorDir;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid map data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map has zero width or height")]
    EmptyMap,
    #[error("map has no PLAYER object")]
    MissingPlayer,
    #[error("{name} at ({x}, {y}) lies outside the {width}x{height} map")]
    OutOfBounds { name: &'static str, x: usize, y: usize, width: usize, height: usize },
}

/// One placed object. The `name` field selects the variant.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "name")]
pub enum MapObject {
    #[serde(rename = "WALL")]
    Wall { x: usize, y: usize },
    #[serde(rename = "PLAYER")]
    Player { x: usize, y: usize },
    #[serde(rename = "APPLE")]
    Apple { x: usize, y: usize },
    #[serde(rename = "DOOR")]
    Door { x: usize, y: usize, dir: DoorDir },
}

impl MapObject {
    pub fn position(&self) -> (usize, usize) {
        match *self {
            MapObject::Wall { x, y }
            | MapObject::Player { x, y }
            | MapObject::Apple { x, y }
            | MapObject::Door { x, y, .. } => (x, y),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapObject::Wall { .. } => "WALL",
            MapObject::Player { .. } => "PLAYER",
            MapObject::Apple { .. } => "APPLE",
            MapObject::Door { .. } => "DOOR",
        }
    }
}

/// Trigger region in pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TriggerData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    #[serde(default)]
    pub repeat: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Map {
    /// Tiles.
    pub width: usize,
    pub height: usize,
    /// Pixels.
    pub width_screen: u32,
    pub height_screen: u32,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub triggers: Vec<TriggerData>,
}

impl Map {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| MapError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a map document.
    pub fn from_json_str(text: &str) -> Result<Self, MapError> {
        let map: Map = serde_json::from_str(text)?;
        map.validate()?;
        Ok(map)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::EmptyMap);
        }
        for obj in &self.objects {
            let (x, y) = obj.position();
            if x >= self.width || y >= self.height {
                return Err(MapError::OutOfBounds {
                    name: obj.name(),
                    x,
                    y,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        if !self.objects.iter().any(|o| matches!(o, MapObject::Player { .. })) {
            return Err(MapError::MissingPlayer);
        }
        Ok(())
    }
}
