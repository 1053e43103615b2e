use glam::Vec2;

use crate::geometry::Rect;

/// 2D follow camera: keeps a target centred while never scrolling past the
/// map edges.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World-space pixel position of the top-left corner of the view.
    pub offset: Vec2,
    /// Visible area in pixels.
    pub viewport: Vec2,
    /// Map size in pixels.
    pub world: Vec2,
}

impl Camera {
    pub fn new(viewport_w: f32, viewport_h: f32, world_w: f32, world_h: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(viewport_w, viewport_h),
            world: Vec2::new(world_w, world_h),
        }
    }

    /// Centre on `target`, clamped to the map. Returns true if the view moved.
    ///
    /// When the map is smaller than the viewport on an axis, that axis stays
    /// pinned at zero.
    pub fn update(&mut self, target: Rect) -> bool {
        let center = Vec2::new(target.x + target.w * 0.5, target.y + target.h * 0.5);
        let max = (self.world - self.viewport).max(Vec2::ZERO);
        let next = (center - self.viewport * 0.5).clamp(Vec2::ZERO, max);
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    /// Screen position of a world-space rectangle's top-left corner.
    pub fn transform(&self, rect: Rect) -> Vec2 {
        self.transform_xy(rect.x, rect.y)
    }

    pub fn transform_xy(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) - self.offset
    }
}
