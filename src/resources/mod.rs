/**
 * This module contains all logic for producing meshes and textures: the chunk
 * mesher, texture layouts and file loading, and the built-in assets.
 */
pub mod assets;
pub mod mesh;
pub mod texture;

pub use mesh::generate_mesh;
pub use texture::{load_atlas, texture_layout};
