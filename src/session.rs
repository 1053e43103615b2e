use crate::camera::Camera;
use crate::collision::{Effects, HitEffect, resolve_trigger_collisions};
use crate::config::{GameConfig, TILE_SIZE};
use crate::engine::{Flow, Game};
use crate::geometry::Rect;
use crate::grid::Visibility;
use crate::input::{Action, ActionMap, InputState};
use crate::map::{Map, MapError};
use crate::renderer::{Color, RenderTarget};
use crate::sprites::Sprite;
use crate::world::World;

/// One loaded map and everything that changes while playing it.
///
/// Per update: move the player against `solids`, dispatch contact with
/// items and triggers, apply the queued hit effects, follow the player with
/// the camera, then rebuild the FOV if the player's tile changed or the
/// visibility grid was touched.
pub struct Session {
    config: GameConfig,
    actions: ActionMap<Action>,
    world: World,
    visibility: Visibility,
    camera: Camera,
    effects: Effects,
    /// Newest entry is shown; confirm dismisses it.
    text_queue: Vec<String>,
    fov_origin: Option<(usize, usize)>,
    fov_recomputes: u64,
    player_off_map: bool,
}

impl Session {
    pub fn new(config: GameConfig, map: &Map) -> Result<Self, MapError> {
        let (world, visibility, camera) = Self::build(&config, map)?;
        let mut session = Self {
            config,
            actions: ActionMap::with_default_bindings(),
            world,
            visibility,
            camera,
            effects: Effects::new(),
            text_queue: Vec::new(),
            fov_origin: None,
            fov_recomputes: 0,
            player_off_map: false,
        };
        session.refresh_fov();
        Ok(session)
    }

    /// Replace the current map wholesale. On error the session is unchanged.
    pub fn load(&mut self, map: &Map) -> Result<(), MapError> {
        let (world, visibility, camera) = Self::build(&self.config, map)?;
        self.world = world;
        self.visibility = visibility;
        self.camera = camera;
        self.effects = Effects::new();
        self.text_queue.clear();
        self.fov_origin = None;
        self.player_off_map = false;
        self.refresh_fov();
        Ok(())
    }

    fn build(config: &GameConfig, map: &Map) -> Result<(World, Visibility, Camera), MapError> {
        map.validate()?;

        let (world, opaque) = World::from_map(map, config.player_speed);
        let mut visibility = Visibility::new(map.width, map.height);
        for (x, y) in opaque {
            visibility.set_visibility(x, y, false);
        }
        visibility.mark_dirty();

        let mut camera = Camera::new(
            config.screen_width as f32,
            config.screen_height as f32,
            map.width_screen as f32,
            map.height_screen as f32,
        );
        camera.update(world.player.body.hit_rect());

        log::info!(
            "loaded {}x{} map: {} solids, {} items, {} triggers",
            map.width,
            map.height,
            world.solids.len(),
            world.items_on_floor.len(),
            world.triggers.len()
        );
        Ok((world, visibility, camera))
    }

    pub fn update(&mut self, dt: f32, input: &InputState) -> Flow {
        if self.actions.is_pressed(Action::Quit, input) {
            return Flow::Quit;
        }

        if !self.text_queue.is_empty() {
            if self.actions.is_pressed(Action::Confirm, input) {
                self.text_queue.pop();
            }
            return Flow::Continue;
        }

        let world = &mut self.world;
        world.player.update(dt, input, &self.actions, &mut world.solids, &mut self.effects);
        resolve_trigger_collisions(&world.player.body, &mut world.items_on_floor, &mut self.effects);
        resolve_trigger_collisions(&world.player.body, &mut world.triggers, &mut self.effects);
        for trigger in &mut world.triggers {
            trigger.end_frame();
        }

        self.apply_effects();
        self.camera.update(self.world.player.body.hit_rect());
        self.refresh_fov();
        Flow::Continue
    }

    fn apply_effects(&mut self) {
        let mut effects = std::mem::take(&mut self.effects);
        for effect in effects.drain() {
            match effect {
                HitEffect::DoorOpened { id, tile: (x, y) } => {
                    if self.world.make_passable(id) {
                        self.visibility.set_visibility(x, y, true);
                        log::debug!("door {id:?} at ({x}, {y}) opened");
                    }
                }
                HitEffect::PickedUp { id } => {
                    if let Some(item) = self.world.take_item(id) {
                        log::debug!("picked up {} x{}", item.pickable.name, item.pickable.quantity);
                        self.world.player.pick_up(item.pickable);
                    }
                }
                HitEffect::ShowText(text) => {
                    log::debug!("queued text: {text}");
                    self.text_queue.push(text);
                }
            }
        }
        self.effects = effects;
    }

    /// Recompute the FOV when the player's tile changed or the grid is dirty.
    ///
    /// A player standing off the map (no border walls) looks from the
    /// nearest edge tile, with a warning.
    fn refresh_fov(&mut self) {
        let (tx, ty) = self.world.player.tile();
        let origin = (
            tx.clamp(0, self.visibility.width() as i32 - 1) as usize,
            ty.clamp(0, self.visibility.height() as i32 - 1) as usize,
        );
        let off_map = (tx, ty) != (origin.0 as i32, origin.1 as i32);
        if off_map && !self.player_off_map {
            log::warn!("player tile ({tx}, {ty}) is off the map; looking from edge tile {origin:?}");
        }
        self.player_off_map = off_map;

        if self.fov_origin == Some(origin) && !self.visibility.is_dirty() {
            return;
        }
        self.visibility.recompute(origin.0, origin.1, self.config.fov_radius);
        self.fov_origin = Some(origin);
        self.fov_recomputes += 1;
        log::debug!("fov recomputed from {origin:?}: {} tiles visible", self.visibility.fov().count());
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.clear(self.config.background_color());

        let player_id = self.world.player.id;
        for sprite in self.world.all_entities().filter(|s| s.id() != player_id) {
            let (tx, ty) = sprite.tile();
            if self.visibility.is_visible_at(tx, ty) {
                target.draw_sprite(sprite.sprite_key(), self.camera.transform(sprite.body().hit_rect()));
            }
        }

        if self.config.debug_fov {
            for (x, y) in self.visibility.fov().iter_set() {
                let tile = Rect::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, TILE_SIZE, TILE_SIZE);
                let pos = self.camera.transform(tile);
                target.outline_rect(Rect { x: pos.x, y: pos.y, ..tile }, Color::YELLOW);
            }
        }

        let player = &self.world.player;
        target.draw_sprite(player.sprite_key(), self.camera.transform(player.body.hit_rect()));

        if let Some(text) = self.text_queue.last() {
            target.text_box(text);
        }
    }

    pub fn world(&self) -> &World { &self.world }

    pub fn world_mut(&mut self) -> &mut World { &mut self.world }

    pub fn visibility(&self) -> &Visibility { &self.visibility }

    /// Visibility edits take effect on the next update.
    pub fn visibility_mut(&mut self) -> &mut Visibility { &mut self.visibility }

    pub fn camera(&self) -> &Camera { &self.camera }

    pub fn text_queue(&self) -> &[String] { &self.text_queue }

    pub fn is_showing_text(&self) -> bool { !self.text_queue.is_empty() }

    /// Number of FOV rebuilds since the session was created.
    pub fn fov_recompute_count(&self) -> u64 { self.fov_recomputes }

    /// True while the player's tile lies outside the grid.
    pub fn player_off_map(&self) -> bool { self.player_off_map }

    pub fn set_debug_fov(&mut self, enabled: bool) { self.config.debug_fov = enabled; }
}

impl Game for Session {
    fn update(&mut self, dt: f32, input: &InputState) -> Flow {
        Session::update(self, dt, input)
    }

    fn render(&mut self, target: &mut dyn RenderTarget) {
        self.draw(target);
    }
}
