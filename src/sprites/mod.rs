pub mod player;

pub use player::Player;

use serde::Deserialize;

use crate::collision::{Body, Collidable, Effects, HitEffect};
use crate::geometry::Rect;

/// Registry-assigned entity id; stable for the lifetime of a loaded map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Image reference resolved by the render target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Wall,
    Apple,
    Player,
    DoorHorizontal,
    DoorVertical,
    DoorOpen,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 6] = [
        SpriteKey::Wall,
        SpriteKey::Apple,
        SpriteKey::Player,
        SpriteKey::DoorHorizontal,
        SpriteKey::DoorVertical,
        SpriteKey::DoorOpen,
    ];
}

/// Shared read access used by the registry views and the draw pass.
pub trait Sprite {
    fn id(&self) -> EntityId;
    fn body(&self) -> &Body;
    fn sprite_key(&self) -> SpriteKey;

    fn tile(&self) -> (i32, i32) {
        self.body().tile_coords()
    }
}

// ── Wall ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Wall {
    pub id: EntityId,
    pub body: Body,
}

impl Wall {
    pub fn new(id: EntityId, x: usize, y: usize) -> Self {
        Self { id, body: Body::tile(x as f32, y as f32) }
    }
}

impl Sprite for Wall {
    fn id(&self) -> EntityId { self.id }
    fn body(&self) -> &Body { &self.body }
    fn sprite_key(&self) -> SpriteKey { SpriteKey::Wall }
}

impl Collidable for Wall {
    fn hit_rect(&self) -> Rect { self.body.hit_rect() }
}

// ── Door ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum DoorDir {
    #[serde(alias = "h", alias = "H", alias = "HORIZONTAL")]
    #[serde(rename = "horizontal")]
    Horizontal,
    #[serde(alias = "v", alias = "V", alias = "VERTICAL")]
    #[serde(rename = "vertical")]
    Vertical,
}

/// Blocks movement and sight until something bumps into it.
#[derive(Clone, Debug)]
pub struct Door {
    pub id: EntityId,
    pub body: Body,
    pub dir: DoorDir,
    open: bool,
}

impl Door {
    pub fn new(id: EntityId, x: usize, y: usize, dir: DoorDir) -> Self {
        Self { id, body: Body::tile(x as f32, y as f32), dir, open: false }
    }

    pub fn is_open(&self) -> bool { self.open }
}

impl Sprite for Door {
    fn id(&self) -> EntityId { self.id }
    fn body(&self) -> &Body { &self.body }
    fn sprite_key(&self) -> SpriteKey {
        match (self.open, self.dir) {
            (true, _) => SpriteKey::DoorOpen,
            (false, DoorDir::Horizontal) => SpriteKey::DoorHorizontal,
            (false, DoorDir::Vertical) => SpriteKey::DoorVertical,
        }
    }
}

impl Collidable for Door {
    fn hit_rect(&self) -> Rect { self.body.hit_rect() }

    fn on_hit(&mut self, effects: &mut Effects) {
        if self.open {
            return;
        }
        self.open = true;
        let (tx, ty) = self.tile();
        effects.push(HitEffect::DoorOpened { id: self.id, tile: (tx as usize, ty as usize) });
    }
}

// ── Solid ───────────────────────────────────────────────────────────────────

/// Members of the solid group.
#[derive(Clone, Debug)]
pub enum Solid {
    Wall(Wall),
    Door(Door),
}

impl Sprite for Solid {
    fn id(&self) -> EntityId {
        match self {
            Solid::Wall(w) => w.id(),
            Solid::Door(d) => d.id(),
        }
    }

    fn body(&self) -> &Body {
        match self {
            Solid::Wall(w) => w.body(),
            Solid::Door(d) => d.body(),
        }
    }

    fn sprite_key(&self) -> SpriteKey {
        match self {
            Solid::Wall(w) => w.sprite_key(),
            Solid::Door(d) => d.sprite_key(),
        }
    }
}

impl Collidable for Solid {
    fn hit_rect(&self) -> Rect {
        self.body().hit_rect()
    }

    fn on_hit(&mut self, effects: &mut Effects) {
        match self {
            Solid::Wall(w) => w.on_hit(effects),
            Solid::Door(d) => d.on_hit(effects),
        }
    }
}

// ── Items ───────────────────────────────────────────────────────────────────

/// What an item turns into once it is in the inventory.
#[derive(Clone, Debug, PartialEq)]
pub struct Pickable {
    pub name: String,
    pub stackable: bool,
    pub quantity: u32,
}

impl Pickable {
    pub fn new(name: &str, stackable: bool, quantity: u32) -> Self {
        Self { name: name.into(), stackable, quantity }
    }

    pub fn apple() -> Self {
        Self::new("apple", false, 1)
    }
}

/// An item lying on the floor. Not solid; touching it picks it up.
#[derive(Clone, Debug)]
pub struct Item {
    pub id: EntityId,
    pub body: Body,
    pub key: SpriteKey,
    pub pickable: Pickable,
    taken: bool,
}

impl Item {
    pub fn new(id: EntityId, x: usize, y: usize, key: SpriteKey, pickable: Pickable) -> Self {
        Self { id, body: Body::tile(x as f32, y as f32), key, pickable, taken: false }
    }
}

impl Sprite for Item {
    fn id(&self) -> EntityId { self.id }
    fn body(&self) -> &Body { &self.body }
    fn sprite_key(&self) -> SpriteKey { self.key }
}

impl Collidable for Item {
    fn hit_rect(&self) -> Rect { self.body.hit_rect() }

    fn on_hit(&mut self, effects: &mut Effects) {
        if !self.taken {
            self.taken = true;
            effects.push(HitEffect::PickedUp { id: self.id });
        }
    }
}
