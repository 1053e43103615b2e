// =============================================================================
// GEOMETRY.RS — Geometric primitives for the tile runtime
//
// - Distance calculations (FOV radius cutoff)
// - Line drawing (line-of-sight)
// - Pixel rectangles (hit rects, trigger regions)
// =============================================================================

/// Calculate squared Euclidean distance (avoids sqrt).
/// Used for the circular FOV cutoff: `distance_squared <= radius²`.
#[inline]
pub fn distance_squared(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

// =============================================================================
// BRESENHAM'S LINE ALGORITHM
// =============================================================================

/// Generate all points along a line from (x1, y1) to (x2, y2).
///
/// Uses Bresenham's line algorithm, which produces a line with no gaps.
/// The returned Vec includes both endpoints.
pub fn line(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };

    let mut x = x1;
    let mut y = y1;
    let mut err = dx - dy;

    loop {
        points.push((x, y));

        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x += sx;
        }

        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    points
}

/// Check if there's a clear line of sight from (x1, y1) to (x2, y2).
///
/// The `is_blocking` function should return true for tiles that block sight.
/// The start and end points themselves are NOT checked, so a wall is always
/// visible as long as nothing stands in front of it.
pub fn line_of_sight(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    is_blocking: impl Fn(i32, i32) -> bool,
) -> bool {
    let points = line(x1, y1, x2, y2);

    for &(x, y) in points.iter().skip(1).take(points.len().saturating_sub(2)) {
        if is_blocking(x, y) {
            return false;
        }
    }

    true
}

// =============================================================================
// RECTANGLES
// =============================================================================

/// Axis-aligned rectangle in pixel units. `x`/`y` is the top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline] pub fn left(&self) -> f32 { self.x }
    #[inline] pub fn right(&self) -> f32 { self.x + self.w }
    #[inline] pub fn top(&self) -> f32 { self.y }
    #[inline] pub fn bottom(&self) -> f32 { self.y + self.h }

    /// Strict overlap test. Rectangles that only share an edge do not collide,
    /// so a body resting flush against a wall is not reported as a hit.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open point test: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    /// Copy of this rectangle shifted by `(dx, dy)` pixels.
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
}
