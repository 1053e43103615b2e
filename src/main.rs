use std::process::ExitCode;

use tilecrawl::config::{GameConfig, TILE_SIZE};
use tilecrawl::engine::EngineBuilder;
use tilecrawl::map::Map;
use tilecrawl::session::Session;
use tilecrawl::spritesheet::Spritesheet;

const CONFIG_PATH: &str = "tilecrawl.json";
const DEFAULT_MAP: &str = "level1";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut map_name = DEFAULT_MAP.to_string();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" => config.debug_fov = true,
            "--map" => match args.next() {
                Some(name) => map_name = name,
                None => {
                    log::error!("--map needs a map name");
                    return ExitCode::FAILURE;
                }
            },
            other => log::warn!("ignoring unknown argument {other}"),
        }
    }

    let map_path = config.map_path(&map_name);
    let map = match Map::from_path(&map_path) {
        Ok(map) => map,
        Err(e) => {
            log::error!("{}: {e}", map_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut builder = EngineBuilder::default()
        .with_title(&config.title)
        .with_size(config.screen_width, config.screen_height)
        .with_ups(config.fps);

    let sheet_path = config.spritesheet_path();
    match Spritesheet::from_path(&sheet_path, TILE_SIZE as u32) {
        Ok(sheet) => builder = builder.with_spritesheet(sheet, config.sprites.clone()),
        Err(e) => log::warn!("{}: {e}; drawing placeholder tiles", sheet_path.display()),
    }

    let session = match Session::new(config, &map) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match builder.run(session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
