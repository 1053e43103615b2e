use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpritesheetError {
    #[error("failed to load spritesheet: {0}")]
    Image(#[from] image::ImageError),
    #[error("spritesheet {width}x{height} is smaller than one {tile}px tile")]
    TileSize { width: u32, height: u32, tile: u32 },
}

/// Grid of square tiles cut from one PNG, addressed by (row, col).
#[derive(Clone, Debug)]
pub struct Spritesheet {
    image: RgbaImage,
    tile: u32,
}

impl Spritesheet {
    pub fn from_path(path: impl AsRef<Path>, tile: u32) -> Result<Self, SpritesheetError> {
        let image = image::open(path)?.to_rgba8();
        Self::from_image(image, tile)
    }

    pub fn from_image(image: RgbaImage, tile: u32) -> Result<Self, SpritesheetError> {
        let (width, height) = image.dimensions();
        if tile == 0 || width < tile || height < tile {
            return Err(SpritesheetError::TileSize { width, height, tile });
        }
        Ok(Self { image, tile })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile
    }

    pub fn rows(&self) -> u32 {
        self.image.height() / self.tile
    }

    pub fn cols(&self) -> u32 {
        self.image.width() / self.tile
    }

    /// Copy of the tile at (`row`, `col`), or `None` past the sheet edge.
    pub fn tile_at(&self, row: u32, col: u32) -> Option<RgbaImage> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let view = image::imageops::crop_imm(
            &self.image,
            col * self.tile,
            row * self.tile,
            self.tile,
            self.tile,
        );
        Some(view.to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn two_by_one() -> Spritesheet {
        // Left tile red, right tile blue.
        let img = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });
        Spritesheet::from_image(img, 4).unwrap()
    }

    #[test]
    fn dimensions_in_tiles() {
        let sheet = two_by_one();
        assert_eq!(sheet.rows(), 1);
        assert_eq!(sheet.cols(), 2);
    }

    #[test]
    fn tile_at_uses_row_then_column() {
        let sheet = two_by_one();
        let tile = sheet.tile_at(0, 1).unwrap();
        assert_eq!(tile.dimensions(), (4, 4));
        assert_eq!(*tile.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert!(sheet.tile_at(1, 0).is_none());
    }

    #[test]
    fn rejects_sheet_smaller_than_a_tile() {
        let err = Spritesheet::from_image(RgbaImage::new(2, 2), 4).unwrap_err();
        assert!(matches!(err, SpritesheetError::TileSize { .. }));
    }
}
