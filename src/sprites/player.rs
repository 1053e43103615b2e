use std::f32::consts::FRAC_1_SQRT_2;

use crate::collision::{
    Axis, Blocker, Body, Collidable, Effects, get_obstacles, resolve_axis_collision, sgn, slither,
};
use crate::config::JOYSTICK_DEAD_ZONE;
use crate::input::{Action, ActionMap, InputState};
use crate::sprites::{EntityId, Pickable, Solid, Sprite, SpriteKey};

/// The user-controlled entity.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    /// Tiles per second.
    pub speed: f32,
    pub inventory: Vec<Pickable>,
}

impl Player {
    pub fn new(id: EntityId, x: usize, y: usize, speed: f32) -> Self {
        Self {
            id,
            body: Body::tile(x as f32, y as f32),
            speed,
            inventory: Vec::new(),
        }
    }

    /// Movement direction requested this frame. The joystick wins over keys
    /// when it is pushed past the dead zone. Diagonals are normalised.
    pub fn read_direction(input: &InputState, actions: &ActionMap<Action>) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if actions.is_held(Action::MoveLeft, input) { dx -= 1.0; }
        if actions.is_held(Action::MoveRight, input) { dx += 1.0; }
        if actions.is_held(Action::MoveUp, input) { dy -= 1.0; }
        if actions.is_held(Action::MoveDown, input) { dy += 1.0; }

        let (ax, ay) = (input.axis(0), input.axis(1));
        if ax.abs() > JOYSTICK_DEAD_ZONE || ay.abs() > JOYSTICK_DEAD_ZONE {
            return (ax, ay);
        }

        if dx != 0.0 && dy != 0.0 {
            dx *= FRAC_1_SQRT_2;
            dy *= FRAC_1_SQRT_2;
        }
        (dx, dy)
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        actions: &ActionMap<Action>,
        solids: &mut [Solid],
        effects: &mut Effects,
    ) {
        let (dx, dy) = Self::read_direction(input, actions);
        self.step(dx, dy, dt, solids, effects);
    }

    /// Move by `direction × speed × dt`, one axis at a time.
    ///
    /// A diagonal component that runs straight into a solid is dropped up
    /// front so the player glides along walls instead of grinding into them.
    /// A single-axis move that gets blocked slithers along the other axis,
    /// unless the nudge would push it into another solid.
    pub fn step(&mut self, mut dx: f32, mut dy: f32, dt: f32, solids: &mut [Solid], effects: &mut Effects) {
        if sgn(dx) != 0 && sgn(dy) != 0 {
            let blocked_x = !get_obstacles(&self.body, solids, dx, 0.0).is_empty();
            let blocked_y = !get_obstacles(&self.body, solids, 0.0, dy).is_empty();
            if blocked_x && !blocked_y {
                dx = 0.0;
            } else if blocked_y && !blocked_x {
                dy = 0.0;
            }
        }

        self.body.vx = dx * self.speed;
        self.body.vy = dy * self.speed;

        self.body.x += self.body.vx * dt;
        self.body.sync_x();
        if let Some(blocker) = resolve_axis_collision(&mut self.body, solids, Axis::X, effects) {
            if sgn(dy) == 0 {
                self.slither_if_clear(solids, &blocker, Axis::Y);
            }
        }

        self.body.y += self.body.vy * dt;
        self.body.sync_y();
        if let Some(blocker) = resolve_axis_collision(&mut self.body, solids, Axis::Y, effects) {
            if sgn(dx) == 0 {
                self.slither_if_clear(solids, &blocker, Axis::X);
            }
        }
    }

    /// The free-side probe looks past the blocker, not past the player, so
    /// the nudged body can still land in a neighbouring solid. Keep the
    /// flush position in that case.
    fn slither_if_clear(&mut self, solids: &[Solid], blocker: &Blocker, axis: Axis) {
        let flush = self.body;
        slither(solids, blocker, &mut self.body, axis);
        self.body.sync_rect();
        let rect = self.body.hit_rect();
        if solids.iter().any(|s| s.hit_rect().overlaps(&rect)) {
            self.body = flush;
        }
    }

    /// Stackable pickables merge into an existing stack of the same name.
    pub fn pick_up(&mut self, pickable: Pickable) {
        if pickable.stackable {
            if let Some(stack) = self
                .inventory
                .iter_mut()
                .find(|p| p.stackable && p.name == pickable.name)
            {
                stack.quantity += pickable.quantity;
                return;
            }
        }
        self.inventory.push(pickable);
    }
}

impl Sprite for Player {
    fn id(&self) -> EntityId { self.id }
    fn body(&self) -> &Body { &self.body }
    fn sprite_key(&self) -> SpriteKey { SpriteKey::Player }
}
