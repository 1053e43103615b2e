use crate::fov;

// ── Grid ────────────────────────────────────────────────────────────────────

/// Fixed-size boolean tile grid stored row-major (`y * width + x`).
///
/// Accessors panic on out-of-bounds coordinates: a tile outside the map is a
/// bug in map or spawn logic, never a recoverable condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: bool) -> Self {
        Self { width, height, cells: vec![fill; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "tile ({x}, {y}) outside {}x{} grid",
            self.width, self.height
        );
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    pub fn fill(&mut self, value: bool) {
        self.cells.fill(value);
    }

    /// Number of cells set to `true`.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate `(x, y)` of every cell set to `true`, row by row.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| (i % w, i / w))
    }
}

// ── Visibility ──────────────────────────────────────────────────────────────

/// Per-map visibility state.
///
/// `visibility` holds the static opacity of each tile (true = does not block
/// sight); `fov` holds what the player currently sees. Both share the map's
/// dimensions for the lifetime of the map. Writes to `visibility` only raise
/// the dirty flag; `fov` is rebuilt by the next `recompute`.
#[derive(Clone, Debug)]
pub struct Visibility {
    visibility: Grid,
    fov: Grid,
    dirty: bool,
}

impl Visibility {
    /// Fully transparent map with nothing visible yet and a pending recompute.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            visibility: Grid::new(width, height, true),
            fov: Grid::new(width, height, false),
            dirty: true,
        }
    }

    pub fn width(&self) -> usize { self.visibility.width() }
    pub fn height(&self) -> usize { self.visibility.height() }

    /// Record whether tile `(tilex, tiley)` lets sight through.
    pub fn set_visibility(&mut self, tilex: usize, tiley: usize, transparent: bool) {
        self.visibility.set(tilex, tiley, transparent);
        self.dirty = true;
    }

    pub fn is_transparent(&self, tilex: usize, tiley: usize) -> bool {
        self.visibility.get(tilex, tiley)
    }

    pub fn is_visible(&self, tilex: usize, tiley: usize) -> bool {
        self.fov.get(tilex, tiley)
    }

    /// Like `is_visible`, but tiles outside the map read as not visible.
    pub fn is_visible_at(&self, tilex: i32, tiley: i32) -> bool {
        self.fov.in_bounds(tilex, tiley) && self.fov.get(tilex as usize, tiley as usize)
    }

    pub fn is_dirty(&self) -> bool { self.dirty }

    pub fn mark_dirty(&mut self) { self.dirty = true; }

    pub fn opacity(&self) -> &Grid { &self.visibility }

    pub fn fov(&self) -> &Grid { &self.fov }

    /// Rebuild the FOV grid from `(origin_x, origin_y)` and clear the dirty flag.
    pub fn recompute(&mut self, origin_x: usize, origin_y: usize, radius: u32) {
        fov::compute_fov_into(origin_x, origin_y, radius, &self.visibility, &mut self.fov);
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_is_row_major() {
        let mut g = Grid::new(4, 3, false);
        g.set(3, 1, true);
        assert!(g.get(3, 1));
        assert_eq!(g.iter_set().collect::<Vec<_>>(), vec![(3, 1)]);
    }

    #[test]
    #[should_panic(expected = "outside 4x3 grid")]
    fn out_of_bounds_panics() {
        let g = Grid::new(4, 3, false);
        g.get(4, 0);
    }

    #[test]
    fn set_visibility_marks_dirty_without_recomputing() {
        let mut v = Visibility::new(5, 5);
        v.recompute(2, 2, 3);
        assert!(!v.is_dirty());
        let before = v.fov().clone();

        v.set_visibility(3, 2, false);
        assert!(v.is_dirty());
        assert!(!v.is_transparent(3, 2));
        assert_eq!(v.fov(), &before);
    }

    #[test]
    #[should_panic]
    fn set_visibility_out_of_bounds_panics() {
        let mut v = Visibility::new(5, 5);
        v.set_visibility(5, 0, false);
    }

    #[test]
    fn is_visible_at_outside_map_is_false() {
        let mut v = Visibility::new(3, 3);
        v.recompute(1, 1, 5);
        assert!(v.is_visible_at(0, 0));
        assert!(!v.is_visible_at(-1, 0));
        assert!(!v.is_visible_at(0, 3));
    }
}
