//! The demo scene: one generated chunk, a spinning test character and a
//! first-person camera that collides with the chunk.

use std::path::Path;

use anyhow::Context as _;
use cgmath::{Point3, Rad};
use instant::Duration;
use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    camera::Camera,
    collision,
    config::{EngineConfig, MovementConfig},
    context::Context,
    data_structures::{
        chunk::Chunk,
        model::{DrawModel, Model},
        terrain,
    },
    flow::{GraphicsFlow, Out},
    input::{self, InputEvent, InputState},
    resources::{assets, texture::load_atlas},
    transform::Transform,
};

/// Yaw added to the character every tick.
pub const CHARACTER_SPIN: Rad<f32> = Rad(0.01);

/// Everything the simulation needs, independent of the GPU.
#[derive(Clone, Debug)]
pub struct GameState {
    pub camera: Camera,
    pub input: InputState,
    pub chunk: Chunk,
    pub movement: MovementConfig,
    pub mouse_sensitivity: f32,
}

impl GameState {
    pub fn new(config: &EngineConfig) -> Self {
        let [x, y, z] = config.camera.start_position;
        Self {
            camera: Camera::new(Point3::new(x, y, z)),
            input: InputState::new(config.camera.start_captured),
            chunk: Chunk::new(terrain::generate(&config.world)),
            movement: config.movement.clone(),
            mouse_sensitivity: config.camera.mouse_sensitivity,
        }
    }

    /// Applies one input event. Returns the new capture state when it was
    /// toggled.
    ///
    /// Pointer deltas only turn the camera while the pointer is captured.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<bool> {
        match event {
            InputEvent::PointerDelta { dx, dy } => {
                if self.input.is_captured() {
                    self.camera.look(dx, dy, self.mouse_sensitivity);
                }
                None
            }
            InputEvent::Key {
                action,
                pressed,
                repeat,
            } => {
                self.input.handle_key(action, pressed, repeat);
                None
            }
            InputEvent::ToggleCapture => Some(self.input.toggle_capture()),
        }
    }

    /// Records whether the window actually granted the requested pointer
    /// capture. A refused grab releases the pointer so looking stops.
    pub fn confirm_capture(&mut self, granted: bool) {
        if self.input.is_captured() && !granted {
            log::warn!("Pointer capture refused, staying released");
        }
        self.input.set_captured(granted);
    }

    /// Runs the strafe, forward/back and vertical movement groups against
    /// the chunk.
    pub fn tick(&mut self) -> [Option<collision::Resolution>; 3] {
        collision::apply_movement(
            self.chunk.grid(),
            &mut self.camera.transform,
            self.input.actions(),
            &self.movement,
        )
    }
}

/// GPU side of the demo: the character and chunk models.
pub struct VoxelFlow {
    character: Model,
    chunk: Model,
    // Capture change waiting for the next frame's mutable context.
    pending_capture: Option<bool>,
}

impl VoxelFlow {
    /// Uploads the character and the initial chunk mesh. `atlas` replaces
    /// the built-in block atlas with an image file.
    pub fn new(ctx: &Context, state: &mut GameState, atlas: Option<&Path>) -> anyhow::Result<Self> {
        let atlas_image = match atlas {
            Some(path) => load_atlas(path)?,
            None => assets::block_atlas(),
        };
        let atlas_texture = ctx
            .upload_texture(&atlas_image, "block atlas")
            .context("Failed to upload the block atlas")?;
        let dirt_texture = ctx
            .upload_texture(&assets::dirt_texture(), "dirt")
            .context("Failed to upload the character texture")?;

        let character = Model::new(ctx, "character", &assets::character_mesh(), dirt_texture)
            .with_transform(Transform::at(8.0, 0.0, -2.0));

        let mesh = state.chunk.remesh();
        log::info!("Chunk meshed: {} vertices", mesh.vertex_count());
        let chunk = Model::new(ctx, "chunk", &mesh, atlas_texture);

        Ok(Self {
            character,
            chunk,
            pending_capture: None,
        })
    }

    fn handle_input(&mut self, state: &mut GameState, event: Option<InputEvent>) -> Out {
        if let Some(captured) = event.and_then(|event| state.handle_input(event)) {
            log::info!("Pointer capture {}", if captured { "on" } else { "off" });
            self.pending_capture = Some(captured);
        }
        Out::Empty
    }
}

impl GraphicsFlow<GameState> for VoxelFlow {
    fn on_init(&mut self, ctx: &mut Context, state: &mut GameState) -> Out {
        let granted = ctx.set_cursor_captured(state.input.is_captured());
        state.confirm_capture(granted);
        Out::Empty
    }

    fn on_update(&mut self, ctx: &mut Context, state: &mut GameState, _dt: Duration) -> Out {
        if let Some(captured) = self.pending_capture.take() {
            let granted = ctx.set_cursor_captured(captured);
            state.confirm_capture(granted);
        }
        if state.chunk.is_dirty() {
            let mesh = state.chunk.remesh();
            log::info!("Chunk remeshed: {} vertices", mesh.vertex_count());
            self.chunk.replace_mesh(ctx, &mesh);
        }
        self.character.write_uniform(ctx, &state.camera);
        self.chunk.write_uniform(ctx, &state.camera);
        Out::Empty
    }

    fn on_tick(&mut self, _ctx: &Context, state: &mut GameState) -> Out {
        state.tick();
        self.character.transform.yaw += CHARACTER_SPIN;
        Out::Empty
    }

    fn on_device_events(&mut self, _ctx: &Context, state: &mut GameState, event: &DeviceEvent) -> Out {
        self.handle_input(state, input::translate_device_event(event))
    }

    fn on_window_events(&mut self, _ctx: &Context, state: &mut GameState, event: &WindowEvent) -> Out {
        if let WindowEvent::Focused(false) = event {
            // key-ups are lost while unfocused
            state.input = InputState::new(state.input.is_captured());
        }
        self.handle_input(state, input::translate_window_event(event))
    }

    fn on_render(&self, _ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_model(&self.character);
        render_pass.draw_model(&self.chunk);
    }
}
