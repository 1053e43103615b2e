use glam::Vec2;
use tilecrawl::config::GameConfig;
use tilecrawl::engine::Flow;
use tilecrawl::geometry::Rect;
use tilecrawl::input::{InputState, KeyCode};
use tilecrawl::map::{Map, MapError};
use tilecrawl::renderer::{Color, RenderTarget};
use tilecrawl::session::Session;
use tilecrawl::sprites::SpriteKey;

const DT: f32 = 0.1;

fn map(width: usize, height: usize, objects: &str, triggers: &str) -> Map {
    let json = format!(
        r#"{{ "width": {width}, "height": {height},
             "width_screen": {}, "height_screen": {},
             "objects": [{objects}], "triggers": [{triggers}] }}"#,
        width * 32,
        height * 32,
    );
    Map::from_json_str(&json).expect("test map is valid")
}

fn session(map: &Map) -> Session {
    let config = GameConfig { player_speed: 5.0, fov_radius: 4, ..GameConfig::default() };
    Session::new(config, map).expect("test map loads")
}

fn holding(key: KeyCode) -> InputState {
    let mut input = InputState::new();
    input.press_key(key);
    input.clear_frame_state();
    input
}

#[derive(Default)]
struct Recorder {
    sprites: Vec<(SpriteKey, Vec2)>,
    outlines: usize,
    texts: Vec<String>,
}

impl RenderTarget for Recorder {
    fn clear(&mut self, _color: Color) {
        *self = Recorder::default();
    }
    fn draw_sprite(&mut self, key: SpriteKey, pos: Vec2) {
        self.sprites.push((key, pos));
    }
    fn outline_rect(&mut self, _rect: Rect, _color: Color) {
        self.outlines += 1;
    }
    fn text_box(&mut self, text: &str) {
        self.texts.push(text.to_owned());
    }
}

#[test]
fn walls_and_doors_block_sight_after_load() {
    let m = map(
        6, 3,
        r#"{"name": "PLAYER", "x": 1, "y": 1},
           {"name": "WALL", "x": 0, "y": 0},
           {"name": "DOOR", "x": 3, "y": 1, "dir": "v"},
           {"name": "APPLE", "x": 4, "y": 2}"#,
        "",
    );
    let s = session(&m);
    let vis = s.visibility();
    assert!(!vis.is_transparent(0, 0));
    assert!(!vis.is_transparent(3, 1));
    assert!(vis.is_transparent(4, 2));
    assert!(vis.is_visible(3, 1));
    assert!(!vis.is_visible(4, 1), "behind the closed door");
    assert!(!vis.is_dirty());
}

#[test]
fn opening_a_door_lets_the_player_and_sight_through() {
    let m = map(
        8, 3,
        r#"{"name": "PLAYER", "x": 1, "y": 1},
           {"name": "DOOR", "x": 3, "y": 1, "dir": "vertical"}"#,
        "",
    );
    let mut s = session(&m);
    let right = holding(KeyCode::ArrowRight);

    for _ in 0..10 {
        assert_eq!(s.update(DT, &right), Flow::Continue);
    }

    let world = s.world();
    assert!(world.solids.is_empty());
    assert_eq!(world.passable.len(), 1);
    assert!(s.visibility().is_transparent(3, 1));
    assert!(world.player.body.x > 3.0, "player walked through, x={}", world.player.body.x);
}

#[test]
fn touching_an_apple_picks_it_up() {
    let m = map(
        6, 3,
        r#"{"name": "PLAYER", "x": 1, "y": 1}, {"name": "APPLE", "x": 2, "y": 1}"#,
        "",
    );
    let mut s = session(&m);
    s.update(DT, &holding(KeyCode::KeyD));

    let world = s.world();
    assert!(world.items_on_floor.is_empty());
    assert_eq!(world.player.inventory.len(), 1);
    assert_eq!(world.player.inventory[0].name, "apple");
    assert!(!world.player.inventory[0].stackable);
}

#[test]
fn one_shot_text_is_shown_once_and_pauses_movement() {
    let m = map(
        8, 3,
        r#"{"name": "PLAYER", "x": 1, "y": 1}"#,
        r#"{"x": 64, "y": 32, "width": 64, "height": 32, "text": "hello"}"#,
    );
    let mut s = session(&m);
    let right = holding(KeyCode::ArrowRight);

    s.update(DT, &right);
    assert_eq!(s.text_queue(), ["hello".to_string()]);

    let x = s.world().player.body.x;
    s.update(DT, &right);
    assert_eq!(s.world().player.body.x, x, "movement is paused behind a text box");

    let mut confirm = holding(KeyCode::ArrowRight);
    confirm.press_key(KeyCode::Space);
    s.update(DT, &confirm);
    assert!(!s.is_showing_text());

    // Still inside the region: no second text.
    s.update(DT, &right);
    assert!(!s.is_showing_text());
}

#[test]
fn repeatable_text_fires_again_after_leaving() {
    let m = map(
        8, 3,
        r#"{"name": "PLAYER", "x": 1, "y": 1}"#,
        r#"{"x": 96, "y": 32, "width": 32, "height": 32, "text": "again", "repeat": true}"#,
    );
    let mut s = session(&m);
    let mut space = InputState::new();
    space.press_key(KeyCode::Space);

    for _ in 0..8 {
        s.update(DT, &holding(KeyCode::ArrowRight));
        if s.is_showing_text() {
            s.update(DT, &space);
        }
    }
    let mut shown = 0;
    for _ in 0..16 {
        s.update(DT, &holding(KeyCode::ArrowLeft));
        if s.is_showing_text() {
            shown += 1;
            s.update(DT, &space);
        }
    }
    assert_eq!(shown, 1);
}

#[test]
fn fov_is_recomputed_only_on_tile_change_or_dirty() {
    let m = map(10, 3, r#"{"name": "PLAYER", "x": 1, "y": 1}"#, "");
    let mut s = session(&m);
    assert_eq!(s.fov_recompute_count(), 1);

    s.update(DT, &InputState::new());
    assert_eq!(s.fov_recompute_count(), 1);

    // 5 tiles/s * 0.01 s stays inside tile (1, 1).
    s.update(0.01, &holding(KeyCode::ArrowRight));
    assert!((s.world().player.body.x - 1.05).abs() < 1e-5);
    assert_eq!(s.fov_recompute_count(), 1);

    s.update(0.2, &holding(KeyCode::ArrowRight));
    assert_eq!(s.fov_recompute_count(), 2);

    s.visibility_mut().set_visibility(5, 0, false);
    s.update(DT, &InputState::new());
    assert_eq!(s.fov_recompute_count(), 3);
}

#[test]
fn walking_off_an_unwalled_map_looks_from_the_edge() {
    let m = map(5, 3, r#"{"name": "PLAYER", "x": 0, "y": 1}"#, "");
    let mut s = session(&m);
    assert!(!s.player_off_map());

    s.update(0.5, &holding(KeyCode::ArrowLeft));
    assert!(s.world().player.body.x < 0.0);
    assert!(s.player_off_map());
    assert!(s.visibility().is_visible(0, 1));
    assert!(s.visibility().is_visible(3, 1));

    s.update(0.5, &holding(KeyCode::ArrowRight));
    assert!(!s.player_off_map());
}

#[test]
fn draw_submits_only_visible_sprites_and_player_last() {
    let m = map(
        20, 3,
        r#"{"name": "APPLE", "x": 2, "y": 1},
           {"name": "PLAYER", "x": 1, "y": 1},
           {"name": "WALL", "x": 12, "y": 1}"#,
        "",
    );
    let mut s = session(&m);
    let mut target = Recorder::default();
    s.draw(&mut target);

    assert_eq!(
        target.sprites,
        vec![
            (SpriteKey::Apple, Vec2::new(64.0, 32.0)),
            (SpriteKey::Player, Vec2::new(32.0, 32.0)),
        ]
    );
    assert_eq!(target.outlines, 0);
    assert!(target.texts.is_empty());

    s.set_debug_fov(true);
    s.draw(&mut target);
    assert_eq!(target.outlines, s.visibility().fov().count());
}

#[test]
fn newest_text_is_drawn() {
    let m = map(
        8, 3,
        r#"{"name": "PLAYER", "x": 1, "y": 1}"#,
        r#"{"x": 32, "y": 32, "width": 32, "height": 32, "text": "first"},
           {"x": 32, "y": 32, "width": 32, "height": 32, "text": "second"}"#,
    );
    let mut s = session(&m);
    s.update(DT, &InputState::new());
    let mut target = Recorder::default();
    s.draw(&mut target);
    assert_eq!(target.texts, vec!["second".to_string()]);
}

#[test]
fn quit_action_ends_the_session() {
    let m = map(4, 3, r#"{"name": "PLAYER", "x": 1, "y": 1}"#, "");
    let mut s = session(&m);
    let mut input = InputState::new();
    input.press_key(KeyCode::Escape);
    assert_eq!(s.update(DT, &input), Flow::Quit);
}

#[test]
fn load_replaces_the_map_and_rejects_bad_ones() {
    let first = map(4, 3, r#"{"name": "PLAYER", "x": 1, "y": 1}, {"name": "WALL", "x": 3, "y": 1}"#, "");
    let mut s = session(&first);

    let second = map(5, 5, r#"{"name": "PLAYER", "x": 2, "y": 2}"#, "");
    s.load(&second).unwrap();
    assert!(s.world().solids.is_empty());
    assert_eq!(s.visibility().width(), 5);
    assert_eq!(s.world().player.body.tile_coords(), (2, 2));

    let mut bad = second.clone();
    bad.objects.clear();
    assert!(matches!(s.load(&bad), Err(MapError::MissingPlayer)));
    assert_eq!(s.visibility().width(), 5);
}
