use crate::geometry::Rect;
use crate::map::{Map, MapObject};
use crate::sprites::{Door, EntityId, Item, Pickable, Player, Solid, Sprite, SpriteKey, Wall};
use crate::triggers::{Trigger, TriggerAction};

/// Entity registry for one loaded map.
///
/// Each view is a `Vec` in spawn order; collision resolution walks them in
/// that order, so the first-hit tie-break is reproducible across runs.
#[derive(Debug)]
pub struct World {
    pub player: Player,
    /// Blocks movement: walls and closed doors.
    pub solids: Vec<Solid>,
    /// Drawn but not collided with: opened doors.
    pub passable: Vec<Solid>,
    pub items_on_floor: Vec<Item>,
    pub triggers: Vec<Trigger>,
    next_id: u32,
}

impl World {
    /// Spawn every object and trigger of `map`. Expects a validated map.
    ///
    /// Returns the world plus the tiles that block sight.
    pub fn from_map(map: &Map, player_speed: f32) -> (Self, Vec<(usize, usize)>) {
        let mut world = World {
            player: Player::new(EntityId(0), 0, 0, player_speed),
            solids: Vec::new(),
            passable: Vec::new(),
            items_on_floor: Vec::new(),
            triggers: Vec::new(),
            next_id: 1,
        };
        let mut opaque = Vec::new();

        for obj in &map.objects {
            match *obj {
                MapObject::Wall { x, y } => {
                    let id = world.alloc_id();
                    world.solids.push(Solid::Wall(Wall::new(id, x, y)));
                    opaque.push((x, y));
                }
                MapObject::Player { x, y } => {
                    world.player = Player::new(EntityId(0), x, y, player_speed);
                }
                MapObject::Apple { x, y } => {
                    let id = world.alloc_id();
                    world
                        .items_on_floor
                        .push(Item::new(id, x, y, SpriteKey::Apple, Pickable::apple()));
                }
                MapObject::Door { x, y, dir } => {
                    let id = world.alloc_id();
                    world.solids.push(Solid::Door(Door::new(id, x, y, dir)));
                    opaque.push((x, y));
                }
            }
        }

        for t in &map.triggers {
            world.triggers.push(Trigger::new(
                Rect::new(t.x, t.y, t.width, t.height),
                TriggerAction::Text(t.text.clone()),
                t.repeat,
            ));
        }

        (world, opaque)
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Move a solid to the passable view. Returns false if `id` is not solid.
    pub fn make_passable(&mut self, id: EntityId) -> bool {
        match self.solids.iter().position(|s| s.id() == id) {
            Some(i) => {
                let solid = self.solids.remove(i);
                self.passable.push(solid);
                true
            }
            None => false,
        }
    }

    /// Remove an item from the floor.
    pub fn take_item(&mut self, id: EntityId) -> Option<Item> {
        let i = self.items_on_floor.iter().position(|item| item.id == id)?;
        Some(self.items_on_floor.remove(i))
    }

    /// Every entity, player last.
    pub fn all_entities(&self) -> impl Iterator<Item = &dyn Sprite> {
        self.solids
            .iter()
            .map(|s| s as &dyn Sprite)
            .chain(self.passable.iter().map(|s| s as &dyn Sprite))
            .chain(self.items_on_floor.iter().map(|i| i as &dyn Sprite))
            .chain(std::iter::once(&self.player as &dyn Sprite))
    }
}
