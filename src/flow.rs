//! Flow control and application event loop.
//!
//! A "flow" is a scene: it handles input, advances its simulation on a fixed
//! tick, updates per-frame GPU data and draws itself. The engine owns the
//! window, the [`Context`] and the event loop, and drives every registered
//! flow through the same hooks.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S>`] is the trait for scenes that handle events and rendering
//! - [`Out`] lets a hook reconfigure the context or stop the loop
//!
//! # Lifecycle Flow
//!
//! Each loop iteration follows this pattern:
//! 1. winit delivers all pending window/device events to `on_<window/device>_events`
//! 2. `about_to_wait` runs `on_tick` once the tick deadline has passed and requests a redraw
//! 3. on redraw every flow gets `on_update` with the frame time
//! 4. the frame is cleared and each flow records its draws in `on_render`
//! 5. the frame is presented and the loop sleeps until the next tick deadline

use std::{fmt::Debug, iter, sync::Arc};

use instant::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::Window,
};

use crate::{config::EngineConfig, context::Context, data_structures::texture::Texture};

///
/// This is the output type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime, for
/// instance to change the tick speed or the clear colour, or to capture the
/// cursor.
///
/// `Out::Exit` ends the event loop after the current event.
///
/// `Empty` is the default output used when nothing needs to be handled.
///
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Exit,
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

/// Trait for implementing a renderable scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once after all flows have been constructed
/// 2. `on_window_events()` and `on_device_events()` are called for each winit input event
/// 3. `on_tick()` is called every `Context::tick_duration`
/// 4. `on_update()` is called every frame before drawing
/// 5. `on_render()` is called every frame with the pipeline already bound
///
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out;

    /// Update per-frame data such as uniforms and apply pending window
    /// changes. `dt` is the time since the previous frame.
    fn on_update(&mut self, ctx: &mut Context, state: &mut S, dt: Duration) -> Out;

    /// Advance the simulation by one fixed tick.
    fn on_tick(&mut self, ctx: &Context, state: &mut S) -> Out;

    /// Handle raw device events (mouse motion).
    fn on_device_events(&mut self, ctx: &Context, state: &mut S, event: &DeviceEvent) -> Out;

    /// Handle window events (keyboard, focus, resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent) -> Out;

    /// Record draw calls. The basic pipeline is bound before this is called.
    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>);
}

impl<S> Debug for dyn GraphicsFlow<S> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// Constructors run once the context exists, so they can upload meshes and
/// textures. A failing constructor stops the application.
pub type FlowConstructor<S> =
    Box<dyn FnOnce(&Context, &mut S) -> anyhow::Result<Box<dyn GraphicsFlow<S>>>>;

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State> AppState<State> {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(
        &mut self,
        graphics_flows: &[Box<dyn GraphicsFlow<State>>],
    ) -> Result<(), wgpu::SurfaceError> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            render_pass.set_pipeline(&self.ctx.pipeline);
            for flow in graphics_flows {
                flow.on_render(&self.ctx, &mut render_pass);
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App<State: 'static> {
    async_runtime: tokio::runtime::Runtime,
    config: EngineConfig,
    // Moved into `state` once the window exists.
    initial_state: Option<State>,
    state: Option<AppState<State>>,
    graphics_flows: Vec<Box<dyn GraphicsFlow<State>>>,
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<State>>>,
    last_time: Instant,
    next_tick: Instant,
    error: Option<anyhow::Error>,
}

impl<State: 'static> App<State> {
    fn new(
        config: EngineConfig,
        state: State,
        constructors: Vec<FlowConstructor<State>>,
    ) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            initial_state: Some(state),
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            next_tick: Instant::now(),
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let ctx = self
            .async_runtime
            .block_on(Context::new(window, &self.config))?;
        let mut state = self
            .initial_state
            .take()
            .ok_or_else(|| anyhow::anyhow!("Application state was already consumed"))?;

        let constructors = self.constructors.take().unwrap_or_default();
        for constructor in constructors {
            self.graphics_flows.push(constructor(&ctx, &mut state)?);
        }

        let mut app_state = AppState {
            ctx,
            state,
            is_surface_configured: false,
        };
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);

        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_init(&mut app_state.ctx, &mut app_state.state);
            handle_flow_output(event_loop, &mut app_state.ctx, out);
        }

        self.last_time = Instant::now();
        self.next_tick = self.last_time + app_state.ctx.tick_duration;
        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
        Ok(())
    }
}

impl<State: 'static> ApplicationHandler for App<State> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("App initialization failed: {:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let now = Instant::now();
        if now >= self.next_tick {
            for flow in self.graphics_flows.iter_mut() {
                let out = flow.on_tick(&state.ctx, &mut state.state);
                handle_flow_output(event_loop, &mut state.ctx, out);
            }
            self.next_tick += state.ctx.tick_duration;
            // Don't try to catch up after a stall.
            if self.next_tick < now {
                self.next_tick = now + state.ctx.tick_duration;
            }
            state.ctx.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_device_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(event_loop, &mut state.ctx, out);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_window_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(event_loop, &mut state.ctx, out);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                for flow in self.graphics_flows.iter_mut() {
                    let out = flow.on_update(&mut state.ctx, &mut state.state, dt);
                    handle_flow_output(event_loop, &mut state.ctx, out);
                }

                match state.render(&self.graphics_flows) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_flow_output(event_loop: &ActiveEventLoop, ctx: &mut Context, out: Out) {
    match out {
        Out::Configure(f) => f(ctx),
        Out::Exit => event_loop.exit(),
        Out::Empty => (),
    }
}

/// Opens the window and runs `constructors` until the window is closed or a
/// flow returns [`Out::Exit`].
///
/// Initialises `env_logger` with an `info` default that `RUST_LOG`
/// overrides. Fatal setup errors are logged and returned.
pub fn run<State: 'static>(
    config: EngineConfig,
    state: State,
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<()> {
    if let Err(e) =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
    {
        println!("Warning: Could not initialize logger: {}", e);
    };

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        EventLoop::builder().with_any_thread(true).build()?
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        EventLoop::builder().with_any_thread(true).build()?
    };

    #[cfg(not(all(
        feature = "integration-tests",
        any(target_os = "linux", target_os = "windows")
    )))]
    let event_loop: EventLoop<()> = EventLoop::new()?;

    let mut app = App::new(config, state, constructors)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
