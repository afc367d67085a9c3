//! Engine data structures: blocks, chunks, terrain, models and textures.
//!
//! - `block` is the block type registry (mesh class and atlas cells per type)
//! - `chunk` holds the fixed-size voxel grid and its dirty flag
//! - `terrain` generates the demo chunk from a seed
//! - `model` contains mesh and material definitions, GPU resources for models
//! - `texture` contains GPU texture wrapper and creation utilities

pub mod block;
pub mod chunk;
pub mod model;
pub mod terrain;
pub mod texture;
