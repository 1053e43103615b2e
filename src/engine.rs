use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{SpriteLayout, TILE_SIZE};
use crate::input::{Gamepads, InputState};
use crate::renderer::{Canvas, RenderTarget, Renderer};
use crate::spritesheet::Spritesheet;
use crate::window::{WindowConfig, apply_window_settings};

/// What the loop should do after an update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Game trait ──────────────────────────────────────────────────────────────

pub trait Game {
    /// One fixed-timestep tick. `dt` is in seconds.
    fn update(&mut self, dt: f32, input: &InputState) -> Flow;
    fn render(&mut self, target: &mut dyn RenderTarget);
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
    target_ups: u32,
    spritesheet: Option<Spritesheet>,
    layout: SpriteLayout,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: "tilecrawl".into(),
            width: 640,
            height: 480,
            target_ups: 60,
            spritesheet: None,
            layout: SpriteLayout::default(),
        }
    }
}

impl EngineBuilder {
    pub fn with_title(mut self, title: &str) -> Self { self.title = title.into(); self }
    pub fn with_size(mut self, width: u32, height: u32) -> Self { self.width = width; self.height = height; self }
    pub fn with_ups(mut self, ups: u32) -> Self { self.target_ups = ups.max(1); self }

    /// Sprite images. Without a sheet, sprites draw as flat placeholders.
    pub fn with_spritesheet(mut self, sheet: Spritesheet, layout: SpriteLayout) -> Self {
        self.spritesheet = Some(sheet);
        self.layout = layout;
        self
    }

    /// Block on the event loop until the window closes or the game quits.
    pub fn run(self, game: impl Game + 'static) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        let mut canvas = Canvas::new(self.width, self.height, TILE_SIZE as u32);
        if let Some(sheet) = &self.spritesheet {
            canvas.load_sprites(sheet, &self.layout);
        }
        let mut app = App {
            fixed_dt: 1.0 / self.target_ups as f32,
            window_config: WindowConfig::windowed(self.width, self.height),
            config: self,
            game: Box::new(game),
            canvas,
            renderer: None,
            input: InputState::new(),
            gamepads: Gamepads::new(),
            last_instant: None,
            accumulator: 0.0,
        };
        event_loop.run_app(&mut app)
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: EngineBuilder,
    game: Box<dyn Game>,
    canvas: Canvas,
    renderer: Option<Renderer>,
    window_config: WindowConfig,
    input: InputState,
    gamepads: Option<Gamepads>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
}

impl App {
    fn handle_key(&mut self, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else { return };
        match event.state {
            ElementState::Pressed => {
                if code == KeyCode::F11 && !event.repeat {
                    self.toggle_fullscreen();
                }
                self.input.press_key(code);
            }
            ElementState::Released => self.input.release_key(code),
        }
    }

    fn toggle_fullscreen(&mut self) {
        let Some(renderer) = self.renderer.as_ref() else { return };
        self.window_config.mode = self.window_config.mode.toggled();
        apply_window_settings(&renderer.window, &self.window_config);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = match self.last_instant {
            Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
            None => self.fixed_dt,
        };
        self.last_instant = Some(now);
        self.accumulator += elapsed;

        if let Some(gamepads) = self.gamepads.as_mut() {
            gamepads.poll(&mut self.input);
        }

        while self.accumulator >= self.fixed_dt {
            let flow = self.game.update(self.fixed_dt, &self.input);
            // Presses are seen by exactly one tick.
            self.input.clear_frame_state();
            if flow == Flow::Quit {
                log::info!("quit requested");
                event_loop.exit();
                return;
            }
            self.accumulator -= self.fixed_dt;
        }

        self.game.render(&mut self.canvas);

        let Some(renderer) = self.renderer.as_mut() else { return };
        match renderer.present(self.canvas.frame()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("failed to present frame: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        match pollster::block_on(Renderer::new(window, self.config.width, self.config.height)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                self.window_config.physical_width = size.width;
                self.window_config.physical_height = size.height;
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
