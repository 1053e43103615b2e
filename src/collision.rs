// =============================================================================
// COLLISION.RS — Axis-separated rectangle collision
//
// Movers advance one axis at a time and are pushed back out of whatever they
// ran into on that axis. Resolution against a group is deliberately simple:
// every overlapping entity gets its `on_hit` callback, and the FIRST overlap in
// group order (insertion order of the slice) decides where the mover ends up.
// It is not the nearest or deepest overlap.
// =============================================================================

use crate::config::{SGN_THRESHOLD, SLITHER_SPEED, TILE_SIZE};
use crate::geometry::Rect;
use crate::sprites::EntityId;

// ── Capability ──────────────────────────────────────────────────────────────

/// Anything that can be collided with: it has a pixel hit rect and may react
/// when something touches it.
pub trait Collidable {
    fn hit_rect(&self) -> Rect;

    /// Called once for every overlap found by the resolver. Reactions that reach
    /// beyond the entity itself are pushed to `effects` and applied by the
    /// session after resolution.
    fn on_hit(&mut self, _effects: &mut Effects) {}
}

/// Side effects requested by `on_hit` callbacks during a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum HitEffect {
    DoorOpened { id: EntityId, tile: (usize, usize) },
    PickedUp { id: EntityId },
    ShowText(String),
}

#[derive(Debug, Default)]
pub struct Effects {
    queue: Vec<HitEffect>,
}

impl Effects {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, effect: HitEffect) {
        self.queue.push(effect);
    }

    pub fn is_empty(&self) -> bool { self.queue.is_empty() }

    pub fn len(&self) -> usize { self.queue.len() }

    pub fn iter(&self) -> impl Iterator<Item = &HitEffect> {
        self.queue.iter()
    }

    /// Take every queued effect in the order it was pushed.
    pub fn drain(&mut self) -> std::vec::Drain<'_, HitEffect> {
        self.queue.drain(..)
    }
}

// ── Body ────────────────────────────────────────────────────────────────────

/// Kinematic state of an entity: continuous tile position, velocity in tiles
/// per second, and the pixel hit rect derived from them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    rect: Rect,
}

impl Body {
    /// Body at tile `(x, y)` with a `w × h` pixel hit rect.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            rect: Rect::new(x * TILE_SIZE, y * TILE_SIZE, w, h),
        }
    }

    /// Body occupying exactly one tile.
    pub fn tile(x: f32, y: f32) -> Self {
        Self::new(x, y, TILE_SIZE, TILE_SIZE)
    }

    pub fn hit_rect(&self) -> Rect { self.rect }

    pub fn sync_x(&mut self) { self.rect.x = self.x * TILE_SIZE; }
    pub fn sync_y(&mut self) { self.rect.y = self.y * TILE_SIZE; }

    pub fn sync_rect(&mut self) {
        self.sync_x();
        self.sync_y();
    }

    /// Tile containing the hit rect's top-left corner.
    pub fn tile_coords(&self) -> (i32, i32) {
        (
            (self.rect.x / TILE_SIZE).floor() as i32,
            (self.rect.y / TILE_SIZE).floor() as i32,
        )
    }
}

// ── Axis resolution ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The entity chosen to resolve against: its index in the group and its hit
/// rect at the time of the collision.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Blocker {
    pub index: usize,
    pub rect: Rect,
}

/// Push `body` out of the first entity in `group` it overlaps along `axis`.
///
/// Every overlapping entity receives `on_hit`. The body is placed flush
/// against the blocker on the side it came from and its velocity on `axis`
/// is zeroed. With zero velocity on `axis` the position is left as is (only
/// the rect is re-synced), so a stationary overlap is not pushed out here.
pub fn resolve_axis_collision<C: Collidable>(
    body: &mut Body,
    group: &mut [C],
    axis: Axis,
    effects: &mut Effects,
) -> Option<Blocker> {
    let rect = body.hit_rect();
    let mut first = None;

    for (index, other) in group.iter_mut().enumerate() {
        let other_rect = other.hit_rect();
        if !rect.overlaps(&other_rect) {
            continue;
        }
        other.on_hit(effects);
        if first.is_none() {
            first = Some(Blocker { index, rect: other_rect });
        }
    }

    let blocker = first?;
    match axis {
        Axis::X => {
            if body.vx > 0.0 {
                body.x = (blocker.rect.left() - rect.w) / TILE_SIZE;
            } else if body.vx < 0.0 {
                body.x = blocker.rect.right() / TILE_SIZE;
            }
            body.vx = 0.0;
            body.sync_x();
        }
        Axis::Y => {
            if body.vy > 0.0 {
                body.y = (blocker.rect.top() - rect.h) / TILE_SIZE;
            } else if body.vy < 0.0 {
                body.y = blocker.rect.bottom() / TILE_SIZE;
            }
            body.vy = 0.0;
            body.sync_y();
        }
    }
    Some(blocker)
}

// ── Slithering ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// True when no entity in `group` covers the point one pixel past the
/// blocker's edge in `direction`. The probe sits at the blocker's top-left
/// coordinate on the other axis.
pub fn there_is_space<C: Collidable>(blocker: &Rect, group: &[C], direction: Direction) -> bool {
    let (px, py) = match direction {
        Direction::Up => (blocker.x, blocker.y - 1.0),
        Direction::Down => (blocker.x, blocker.y + blocker.h + 1.0),
        Direction::Right => (blocker.x + blocker.w + 1.0, blocker.y),
        Direction::Left => (blocker.x - 1.0, blocker.y),
    };
    !group.iter().any(|s| s.hit_rect().contains_point(px, py))
}

/// Nudge `body` along `axis` toward the open side of `blocker`.
///
/// `axis` is the axis the body slides on, so a body blocked while moving
/// horizontally slithers with `Axis::Y`. Right is tried before left and down
/// before up; only the first free side is taken. If both sides are occupied
/// the body stays put. The rect is not re-synced here; the mover's next
/// `sync_*` picks the new position up.
pub fn slither<C: Collidable>(group: &[C], blocker: &Blocker, body: &mut Body, axis: Axis) {
    match axis {
        Axis::X => {
            if there_is_space(&blocker.rect, group, Direction::Right) {
                body.x += SLITHER_SPEED;
            } else if there_is_space(&blocker.rect, group, Direction::Left) {
                body.x -= SLITHER_SPEED;
            }
        }
        Axis::Y => {
            if there_is_space(&blocker.rect, group, Direction::Down) {
                body.y += SLITHER_SPEED;
            } else if there_is_space(&blocker.rect, group, Direction::Up) {
                body.y -= SLITHER_SPEED;
            }
        }
    }
}

// ── Queries and dispatch ────────────────────────────────────────────────────

/// Indices of the entities in `group` that `body` would run into if it moved
/// two pixels in the direction of `(dx, dy)`. Only the signs matter.
pub fn get_obstacles<C: Collidable>(body: &Body, group: &[C], dx: f32, dy: f32) -> Vec<usize> {
    let probe = body
        .hit_rect()
        .translated(2.0 * sgn(dx) as f32, 2.0 * sgn(dy) as f32);
    group
        .iter()
        .enumerate()
        .filter(|(_, s)| probe.overlaps(&s.hit_rect()))
        .map(|(i, _)| i)
        .collect()
}

/// Call `on_hit` on every entity in `triggers` overlapping `body`; nothing is
/// moved. Returns how many were hit.
pub fn resolve_trigger_collisions<C: Collidable>(
    body: &Body,
    triggers: &mut [C],
    effects: &mut Effects,
) -> usize {
    let rect = body.hit_rect();
    let mut hits = 0;
    for trigger in triggers.iter_mut() {
        if rect.overlaps(&trigger.hit_rect()) {
            trigger.on_hit(effects);
            hits += 1;
        }
    }
    hits
}

/// Sign of `n` with a dead zone: `|n| <= 0.0001` is zero.
pub fn sgn(n: f32) -> i32 {
    if n > SGN_THRESHOLD {
        1
    } else if n < -SGN_THRESHOLD {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block(Rect);

    impl Collidable for Block {
        fn hit_rect(&self) -> Rect { self.0 }
    }

    #[test]
    fn body_rect_follows_tile_position() {
        let mut b = Body::tile(2.0, 3.0);
        assert_eq!(b.hit_rect(), Rect::new(64.0, 96.0, 32.0, 32.0));
        b.x = 2.5;
        b.sync_x();
        assert_eq!(b.hit_rect().x, 80.0);
        assert_eq!(b.tile_coords(), (2, 3));
    }

    #[test]
    fn moving_up_into_block_lands_below_it() {
        let mut group = [Block(Rect::new(0.0, 0.0, 32.0, 32.0))];
        let mut body = Body::tile(0.0, 0.75);
        body.vy = -3.0;
        let hit = resolve_axis_collision(&mut body, &mut group, Axis::Y, &mut Effects::new());
        assert_eq!(hit.map(|b| b.index), Some(0));
        assert_eq!(body.y, 1.0);
        assert_eq!(body.vy, 0.0);
        assert_eq!(body.hit_rect().y, 32.0);
    }

    #[test]
    fn there_is_space_probes_one_pixel_past_edge() {
        let blocker = Rect::new(32.0, 32.0, 32.0, 32.0);
        let group = [Block(blocker), Block(Rect::new(64.0, 32.0, 32.0, 32.0))];
        assert!(!there_is_space(&blocker, &group, Direction::Right));
        assert!(there_is_space(&blocker, &group, Direction::Left));
        assert!(there_is_space(&blocker, &group, Direction::Up));
        assert!(there_is_space(&blocker, &group, Direction::Down));
    }
}
