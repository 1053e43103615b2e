pub mod camera;
pub mod collision;
pub mod config;
pub mod engine;
pub mod fov;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod map;
pub mod renderer;
pub mod session;
pub mod sprites;
pub mod spritesheet;
pub mod triggers;
pub mod window;
pub mod world;
