use tilecrawl::map::{Map, MapError, MapObject};
use tilecrawl::sprites::DoorDir;

const LEVEL: &str = r#"{
    "width": 4, "height": 3, "width_screen": 128, "height_screen": 96,
    "objects": [
        { "name": "WALL", "x": 0, "y": 0 },
        { "name": "PLAYER", "x": 1, "y": 1 },
        { "name": "APPLE", "x": 2, "y": 1 },
        { "name": "DOOR", "x": 3, "y": 1, "dir": "h" }
    ],
    "triggers": [
        { "x": 32, "y": 32, "width": 32, "height": 32, "text": "Welcome" }
    ]
}"#;

#[test]
fn parses_objects_in_file_order() {
    let map = Map::from_json_str(LEVEL).unwrap();
    assert_eq!((map.width, map.height), (4, 3));
    assert_eq!(map.objects.len(), 4);
    assert_eq!(map.objects[0], MapObject::Wall { x: 0, y: 0 });
    assert_eq!(map.objects[3], MapObject::Door { x: 3, y: 1, dir: DoorDir::Horizontal });
}

#[test]
fn triggers_default_to_one_shot() {
    let map = Map::from_json_str(LEVEL).unwrap();
    assert_eq!(map.triggers.len(), 1);
    assert_eq!(map.triggers[0].text, "Welcome");
    assert!(!map.triggers[0].repeat);
}

#[test]
fn door_direction_accepts_long_names() {
    let json = LEVEL.replace(r#""dir": "h""#, r#""dir": "vertical""#);
    let map = Map::from_json_str(&json).unwrap();
    assert!(matches!(map.objects[3], MapObject::Door { dir: DoorDir::Vertical, .. }));
}

#[test]
fn missing_player_is_rejected() {
    let json = LEVEL.replace(r#"{ "name": "PLAYER", "x": 1, "y": 1 },"#, "");
    assert!(matches!(Map::from_json_str(&json), Err(MapError::MissingPlayer)));
}

#[test]
fn object_outside_map_is_rejected() {
    let json = LEVEL.replace(r#""x": 2, "y": 1"#, r#""x": 4, "y": 1"#);
    match Map::from_json_str(&json) {
        Err(MapError::OutOfBounds { name, x, y, .. }) => assert_eq!((name, x, y), ("APPLE", 4, 1)),
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

#[test]
fn empty_map_is_rejected() {
    let json = LEVEL.replace(r#""width": 4"#, r#""width": 0"#);
    assert!(matches!(Map::from_json_str(&json), Err(MapError::EmptyMap)));
}

#[test]
fn unknown_object_name_is_a_parse_error() {
    let json = LEVEL.replace("APPLE", "BANANA");
    assert!(matches!(Map::from_json_str(&json), Err(MapError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Map::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn bundled_level_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/maps/level1.json");
    let map = Map::from_path(path).unwrap();
    assert!(map.objects.iter().any(|o| matches!(o, MapObject::Player { .. })));
    assert!(!map.triggers.is_empty());
}
