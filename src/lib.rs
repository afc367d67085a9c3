//! cinnamon
//!
//! A minimal first-person voxel renderer and movement demo. A single 16×16×16
//! chunk is meshed with face culling, drawn next to a small test character
//! through a pitch/yaw camera, and the player moves through the chunk with a
//! discrete-step collision resolver.
//!
//! High-level modules
//! - `camera`: camera, projection and the per-model uniform
//! - `collision`: axis-aligned cube collision against the voxel grid
//! - `config`: engine configuration loaded from TOML
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `data_structures`: blocks, chunks, terrain, models and textures
//! - `flow`: the fixed-timestep event loop and the `GraphicsFlow` trait
//! - `game`: the demo scene state and its flow
//! - `input`: logical input actions and winit translation
//! - `pipelines`: the render pipeline definition
//! - `resources`: chunk meshing, texture loading and built-in assets
//! - `transform`: rotation/translation/projection matrix composition
//!

pub mod camera;
pub mod collision;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod game;
pub mod input;
pub mod pipelines;
pub mod resources;
pub mod transform;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
