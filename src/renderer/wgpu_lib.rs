//! WGPU-based renderer for the racing game.
//!
//! This module provides [`WgpuRenderer`], which owns the surface, device and queue together with
//! the shape and text renderers, and presents one [`Frame`] per call to [`WgpuRenderer::render`].
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`], call [`WgpuRenderer::resize`] when the
//! window size changes and [`WgpuRenderer::render`] each frame.

use crate::error::RenderError;
use crate::game::track::CANVAS_WIDTH;
use crate::renderer::canvas::{Frame, Rgba};
use crate::renderer::shapes::ShapeRenderer;
use crate::renderer::text::TextRenderer;
use glyphon::Resolution;

pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub shape_renderer: ShapeRenderer,
    pub text_renderer: TextRenderer,
}

impl WgpuRenderer {
    /// Initializes a new [`WgpuRenderer`] and all associated GPU resources.
    ///
    /// # Arguments
    /// * `instance` - The WGPU instance the surface was created from.
    /// * `surface` - Surface of the game window.
    /// * `width`, `height` - Initial surface size in physical pixels.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;
        log::info!(
            "Using adapter '{}' with surface format {:?}",
            adapter.get_info().name,
            surface_config.format
        );

        surface.configure(&device, &surface_config);

        let shape_renderer = ShapeRenderer::new(&device, surface_config.format);
        let text_renderer = TextRenderer::new(&device, &queue, surface_config.format);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            shape_renderer,
            text_renderer,
        })
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, RenderError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(RenderError::NoAdapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
        let device_and_queue = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok(device_and_queue)
    }

    /// Prefers a non-sRGB format so palette colors are written unchanged.
    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RenderError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|format| !format.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }

    /// Reconfigures the surface for a new window size. Zero sizes (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.text_renderer
            .resize(&self.queue, self.resolution());
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.surface_config.width,
            height: self.surface_config.height,
        }
    }

    /// Physical pixels per logical canvas unit.
    pub fn scale(&self) -> f32 {
        self.surface_config.width as f32 / CANVAS_WIDTH as f32
    }

    /// Draws and presents `frame`.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped, as is a timed-out
    /// acquire. Text failures only drop the text for this frame. Other surface failures are
    /// returned.
    pub fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let text_ready = self.text_renderer.prepare(
            &self.device,
            &self.queue,
            &frame.texts,
            self.scale(),
            self.resolution(),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(frame.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.shape_renderer
                .render(&self.device, &mut render_pass, &frame.shapes);
            if text_ready {
                self.text_renderer.render(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        self.text_renderer.trim();
        Ok(())
    }
}

fn to_wgpu_color(color: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(color[0]),
        g: f64::from(color[1]),
        b: f64::from(color[2]),
        a: f64::from(color[3]),
    }
}
