pub mod canvas;
pub mod pipeline;
pub mod utils;

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;
use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub use canvas::Canvas;
use pipeline::{PresentPipeline, create_present_pipeline};
use utils::letterbox_viewport;

use crate::geometry::Rect;
use crate::sprites::SpriteKey;
use crate::window::WindowConfig;

// ── Color ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const GRAY: Self = Self([0.6, 0.6, 0.6, 1.0]);
    pub const DARK_GRAY: Self = Self([0.2, 0.2, 0.2, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);
    pub const YELLOW: Self = Self([1.0, 1.0, 0.0, 1.0]);
    pub const ORANGE: Self = Self([1.0, 0.55, 0.0, 1.0]);

    pub fn to_rgba8(self) -> image::Rgba<u8> {
        image::Rgba(self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }
}

// ── RenderTarget ───────────────────────────────────────────────────────────

/// Drawing surface the game renders into. Positions are screen pixels.
pub trait RenderTarget {
    fn clear(&mut self, color: Color);
    fn draw_sprite(&mut self, key: SpriteKey, pos: Vec2);
    /// One-pixel outline, used by the FOV debug overlay.
    fn outline_rect(&mut self, rect: Rect, color: Color);
    fn text_box(&mut self, text: &str);
}

// ── Renderer ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Presents a `Canvas` frame to the window, letterboxed to keep its aspect.
pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: PresentPipeline,
    frame_texture: wgpu::Texture,
    frame_bind_group: wgpu::BindGroup,
    frame_size: (u32, u32),
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, RendererError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = *caps.formats.first().ok_or(RendererError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_present_pipeline(&device, format);

        let frame_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame"),
            size: wgpu::Extent3d {
                width: frame_width,
                height: frame_height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let frame_view = frame_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &pipeline.frame_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&frame_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::info!(
            "renderer ready: {format:?}, surface {}x{}, frame {frame_width}x{frame_height}",
            config.width,
            config.height
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            frame_texture,
            frame_bind_group,
            frame_size: (frame_width, frame_height),
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure with the current size, after `SurfaceError::Lost`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload `frame` and draw it letterboxed into the window.
    pub fn present(&mut self, frame: &RgbaImage) -> Result<(), wgpu::SurfaceError> {
        let (fw, fh) = self.frame_size;
        debug_assert_eq!(frame.dimensions(), (fw, fh), "frame size changed after init");

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.frame_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * fw),
                rows_per_image: Some(fh),
            },
            wgpu::Extent3d { width: fw, height: fh, depth_or_array_layers: 1 },
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let viewport = letterbox_viewport(&WindowConfig {
            physical_width: self.config.width,
            physical_height: self.config.height,
            logical_width: fw,
            logical_height: fh,
            ..WindowConfig::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            if viewport.width >= 1.0 && viewport.height >= 1.0 {
                pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
                pass.set_pipeline(&self.pipeline.render_pipeline);
                pass.set_bind_group(0, &self.frame_bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
