use tilecrawl::fov::{compute_fov, compute_fov_into};
use tilecrawl::geometry::distance_squared;
use tilecrawl::grid::{Grid, Visibility};

/// Opacity grid where `true` means the tile lets sight through.
fn open_grid(w: usize, h: usize) -> Grid {
    Grid::new(w, h, true)
}

#[test]
fn empty_grid_sees_exactly_the_radius() {
    let grid = open_grid(15, 15);
    let (ox, oy, r) = (7, 6, 4);
    let fov = compute_fov(ox, oy, r, &grid);

    assert!(fov.get(ox, oy));
    for y in 0..15 {
        for x in 0..15 {
            let inside = distance_squared(ox as i32, oy as i32, x as i32, y as i32) <= (r * r) as i32;
            assert_eq!(fov.get(x, y), inside, "tile ({x}, {y})");
        }
    }
}

#[test]
fn radius_is_clipped_at_grid_edges() {
    let grid = open_grid(5, 5);
    let fov = compute_fov(0, 0, 10, &grid);
    assert_eq!(fov.count(), 25);
}

#[test]
fn opaque_tile_hides_what_is_behind_it() {
    let mut grid = open_grid(10, 3);
    grid.set(4, 1, false);
    let fov = compute_fov(1, 1, 8, &grid);

    assert!(fov.get(4, 1), "the wall itself is visible");
    assert!(!fov.get(5, 1));
    assert!(!fov.get(7, 1));
    assert!(fov.get(3, 1));
}

#[test]
fn wall_visibility_does_not_depend_on_tiles_behind_it() {
    let mut grid = open_grid(10, 3);
    grid.set(4, 1, false);
    let before = compute_fov(1, 1, 8, &grid);
    grid.set(6, 1, false);
    let after = compute_fov(1, 1, 8, &grid);
    assert_eq!(before.get(4, 1), after.get(4, 1));
}

#[test]
fn same_inputs_give_identical_grids() {
    let mut grid = open_grid(12, 12);
    for (x, y) in [(3, 3), (4, 7), (8, 2), (9, 9), (6, 5)] {
        grid.set(x, y, false);
    }
    let a = compute_fov(5, 5, 6, &grid);
    let b = compute_fov(5, 5, 6, &grid);
    assert_eq!(a, b);
}

#[test]
fn compute_into_reuses_and_overwrites() {
    let grid = open_grid(6, 6);
    let mut out = Grid::new(6, 6, true);
    compute_fov_into(0, 0, 1, &grid, &mut out);
    assert_eq!(out.count(), 3);
    assert!(!out.get(5, 5));
}

#[test]
fn visibility_model_recomputes_only_when_asked() {
    let mut vis = Visibility::new(8, 1);
    vis.recompute(0, 0, 7);
    assert!(!vis.is_dirty());
    assert!(vis.is_visible(6, 0));

    vis.set_visibility(3, 0, false);
    assert!(vis.is_dirty());
    // Stale until recomputed.
    assert!(vis.is_visible(6, 0));

    vis.recompute(0, 0, 7);
    assert!(!vis.is_visible(6, 0));
    assert!(vis.is_visible(3, 0));
}

#[test]
#[should_panic]
fn origin_outside_grid_panics() {
    let grid = open_grid(3, 3);
    let _ = compute_fov(3, 0, 2, &grid);
}
