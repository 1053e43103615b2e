//! Binary field-of-view over a tile grid.
//!
//! Every tile inside the circular radius is tested with a Bresenham line from
//! the origin; the tile is visible when no opaque tile sits strictly between
//! the two endpoints. The radius cutoff is Euclidean (`dx² + dy² <= r²`).

use crate::geometry::{distance_squared, line_of_sight};
use crate::grid::Grid;

/// Compute the set of tiles visible from `(origin_x, origin_y)`.
///
/// `opacity` stores `true` for tiles that let sight through. The returned grid
/// has the same dimensions. Panics if the origin is outside the grid.
pub fn compute_fov(origin_x: usize, origin_y: usize, radius: u32, opacity: &Grid) -> Grid {
    let mut out = Grid::new(opacity.width(), opacity.height(), false);
    compute_fov_into(origin_x, origin_y, radius, opacity, &mut out);
    out
}

/// Same as [`compute_fov`], writing into `out` instead of allocating.
/// `out` must have the dimensions of `opacity`.
pub fn compute_fov_into(origin_x: usize, origin_y: usize, radius: u32, opacity: &Grid, out: &mut Grid) {
    assert!(
        origin_x < opacity.width() && origin_y < opacity.height(),
        "FOV origin ({origin_x}, {origin_y}) outside {}x{} grid",
        opacity.width(), opacity.height()
    );
    assert_eq!(
        (out.width(), out.height()),
        (opacity.width(), opacity.height()),
        "FOV output grid dimensions differ from opacity grid"
    );

    out.fill(false);
    out.set(origin_x, origin_y, true);

    let ox = origin_x as i32;
    let oy = origin_y as i32;
    // Every tile lies within `width + height` of the origin; capped so `r * r`
    // fits in an i32.
    let reach = (opacity.width() + opacity.height()).min(i16::MAX as usize) as u32;
    let r = radius.min(reach) as i32;
    let r_sq = r * r;

    let blocks = |x: i32, y: i32| !opacity.get(x as usize, y as usize);

    for ty in (oy - r).max(0)..=(oy + r).min(opacity.height() as i32 - 1) {
        for tx in (ox - r).max(0)..=(ox + r).min(opacity.width() as i32 - 1) {
            if distance_squared(ox, oy, tx, ty) > r_sq {
                continue;
            }
            // Intermediate Bresenham points always lie inside the bounding box
            // of the two endpoints, which is inside the grid.
            if line_of_sight(ox, oy, tx, ty, blocks) {
                out.set(tx as usize, ty as usize, true);
            }
        }
    }
}
