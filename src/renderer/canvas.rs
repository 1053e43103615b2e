use std::collections::HashMap;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::{Color, RenderTarget};
use crate::config::SpriteLayout;
use crate::geometry::Rect;
use crate::sprites::SpriteKey;
use crate::spritesheet::Spritesheet;

const TEXT_BOX_MARGIN: u32 = 8;
const TEXT_BOX_HEIGHT: u32 = 96;
const TEXT_BOX_FILL: Color = Color([0.05, 0.05, 0.15, 0.9]);

/// CPU framebuffer at the logical resolution. The renderer uploads it once
/// per frame.
pub struct Canvas {
    frame: RgbaImage,
    tile: u32,
    tiles: HashMap<SpriteKey, RgbaImage>,
    shown_text: Option<String>,
}

impl Canvas {
    /// Blank canvas. Sprites draw as flat coloured squares until a sheet is
    /// attached.
    pub fn new(width: u32, height: u32, tile: u32) -> Self {
        Self {
            frame: RgbaImage::new(width, height),
            tile,
            tiles: HashMap::new(),
            shown_text: None,
        }
    }

    /// Cut one tile per `SpriteKey` out of `sheet`.
    pub fn load_sprites(&mut self, sheet: &Spritesheet, layout: &SpriteLayout) {
        for key in SpriteKey::ALL {
            let (row, col) = layout.cell(key);
            match sheet.tile_at(row, col) {
                Some(img) => {
                    self.tiles.insert(key, img);
                }
                None => log::warn!(
                    "no tile at ({row}, {col}) for {key:?}; sheet is {}x{} tiles",
                    sheet.rows(),
                    sheet.cols()
                ),
            }
        }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Text of the box drawn this frame, if any.
    pub fn shown_text(&self) -> Option<&str> {
        self.shown_text.as_deref()
    }

    /// Clipped solid fill. Coordinates may be negative or past the edge.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i64).min(self.frame.width() as i64);
        let y1 = (y + h as i64).min(self.frame.height() as i64);
        let px = color.to_rgba8();
        for py in y0..y1 {
            for pxl in x0..x1 {
                blend(self.frame.get_pixel_mut(pxl as u32, py as u32), px);
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let a = src[3] as u32;
    if a == 255 {
        *dst = src;
        return;
    }
    for c in 0..3 {
        dst[c] = ((src[c] as u32 * a + dst[c] as u32 * (255 - a)) / 255) as u8;
    }
    dst[3] = 255;
}

fn placeholder(key: SpriteKey) -> Color {
    match key {
        SpriteKey::Wall => Color::GRAY,
        SpriteKey::Apple => Color::RED,
        SpriteKey::Player => Color::GREEN,
        SpriteKey::DoorHorizontal | SpriteKey::DoorVertical => Color::ORANGE,
        SpriteKey::DoorOpen => Color::DARK_GRAY,
    }
}

impl RenderTarget for Canvas {
    fn clear(&mut self, color: Color) {
        let px = color.to_rgba8();
        for p in self.frame.pixels_mut() {
            *p = px;
        }
        self.shown_text = None;
    }

    fn draw_sprite(&mut self, key: SpriteKey, pos: Vec2) {
        let (x, y) = (pos.x.round() as i64, pos.y.round() as i64);
        match self.tiles.get(&key) {
            Some(img) => image::imageops::overlay(&mut self.frame, img, x, y),
            None => self.fill_rect(x, y, self.tile, self.tile, placeholder(key)),
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        let (x, y) = (rect.x.round() as i64, rect.y.round() as i64);
        let (w, h) = (rect.w.round().max(1.0) as u32, rect.h.round().max(1.0) as u32);
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h as i64 - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w as i64 - 1, y, 1, h, color);
    }

    fn text_box(&mut self, text: &str) {
        let w = self.frame.width().saturating_sub(2 * TEXT_BOX_MARGIN);
        let h = TEXT_BOX_HEIGHT.min(self.frame.height());
        let x = TEXT_BOX_MARGIN as i64;
        let y = self.frame.height() as i64 - h as i64 - TEXT_BOX_MARGIN as i64;
        self.fill_rect(x, y, w, h, TEXT_BOX_FILL);
        self.outline_rect(Rect::new(x as f32, y as f32, w as f32, h as f32), Color::WHITE);
        // No glyph atlas; the text itself goes to the log.
        if self.shown_text.as_deref() != Some(text) {
            log::debug!("text box: {text}");
        }
        self.shown_text = Some(text.to_owned());
    }
}
