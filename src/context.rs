//! The central GPU and window context.
//!
//! [`Context`] owns the surface, device, queue, the single render pipeline and
//! the projection. Flows receive it by reference in every hook and use it to
//! upload meshes and textures.

use std::sync::Arc;

use anyhow::Context as _;
use winit::window::{CursorGrabMode, Window};

use crate::{
    camera::Projection,
    config::EngineConfig,
    data_structures::{
        model::{GpuMesh, Mesh},
        texture::Texture,
    },
    pipelines::basic::mk_basic_pipeline,
};

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub projection: Projection,
    pub pipeline: wgpu::RenderPipeline,
    /// Group 0: material texture and sampler.
    pub texture_layout: wgpu::BindGroupLayout,
    /// Group 1: per-model uniform.
    pub model_layout: wgpu::BindGroupLayout,
    pub clear_colour: wgpu::Color,
    pub tick_duration: instant::Duration,
}

impl Context {
    pub async fn new(window: Arc<Window>, engine: &EngineConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No GPU adapter is compatible with the window surface")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .context("Failed to acquire a GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shader writes linear colour and relies on an sRGB surface to encode it.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("The surface reports no supported formats")?;
        log::info!("Surface format {:?}", surface_format);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = &engine.camera;
        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(camera.fovy_degrees),
            camera.znear,
            camera.zfar,
        );

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        let (pipeline, texture_layout, model_layout) = mk_basic_pipeline(&device, &config);

        let [r, g, b] = engine.clear_colour;
        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            projection,
            pipeline,
            texture_layout,
            model_layout,
            clear_colour: wgpu::Color { r, g, b, a: 1.0 },
            tick_duration: engine.tick_duration(),
        })
    }

    /// Uploads a vertex list. Empty meshes get no buffer.
    pub fn upload_mesh(&self, mesh: &Mesh, label: &str) -> GpuMesh {
        if mesh.is_empty() {
            log::warn!("Mesh {label:?} has no vertices; nothing will be drawn");
        }
        GpuMesh::new(&self.device, mesh, label)
    }

    pub fn upload_texture(&self, image: &image::RgbImage, label: &str) -> anyhow::Result<Texture> {
        Texture::from_image(&self.device, &self.queue, image, label)
    }

    /// Locks and hides the cursor, or releases it, and returns whether the
    /// cursor ended up captured.
    ///
    /// Not every platform supports locking, so confining to the window is
    /// tried next. A failure to grab is logged and leaves the cursor free.
    pub fn set_cursor_captured(&mut self, captured: bool) -> bool {
        let grab = if captured {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        match grab {
            Ok(()) => {
                self.window.set_cursor_visible(!captured);
                captured
            }
            Err(e) => {
                log::warn!("Could not change cursor grab to {captured}: {e}");
                self.window.set_cursor_visible(true);
                false
            }
        }
    }
}
