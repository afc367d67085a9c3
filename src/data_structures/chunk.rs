//! The fixed-size voxel grid and the chunk that owns it.

use std::fmt;

use crate::data_structures::{block::BlockType, model::Mesh};
use crate::resources::mesh::generate_mesh;

/// Edge length of a chunk in cells.
pub const CHUNK_SIZE: usize = 16;

/// A dense `16 × 16 × 16` grid of blocks indexed `[x][y][z]`.
///
/// Coordinates are signed so callers can probe neighbours without casting;
/// anything outside `[0, CHUNK_SIZE)` reads as `None` and is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: [[[BlockType; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE],
}

impl VoxelGrid {
    /// A grid where every cell is air.
    pub fn new() -> Self {
        Self::filled(BlockType::Air)
    }

    pub fn filled(block: BlockType) -> Self {
        Self {
            cells: [[[block; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE],
        }
    }

    fn index(x: i32, y: i32, z: i32) -> Option<(usize, usize, usize)> {
        let size = CHUNK_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) && (0..size).contains(&z) {
            Some((x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        Self::index(x, y, z).map(|(x, y, z)| self.cells[x][y][z])
    }

    /// Writes a cell. Returns `false` and leaves the grid untouched when the
    /// coordinates are out of range.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> bool {
        match Self::index(x, y, z) {
            Some((x, y, z)) => {
                self.cells[x][y][z] = block;
                true
            }
            None => false,
        }
    }

    /// Every cell with its coordinates, `x` outermost and `z` innermost.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32, i32), BlockType)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, plane)| {
            plane.iter().enumerate().flat_map(move |(y, column)| {
                column
                    .iter()
                    .enumerate()
                    .map(move |(z, block)| ((x as i32, y as i32, z as i32), *block))
            })
        })
    }

    pub fn solid_count(&self) -> usize {
        self.iter().filter(|(_, block)| block.is_solid()).count()
    }
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("size", &CHUNK_SIZE)
            .field("solid", &self.solid_count())
            .finish()
    }
}

/**
 * A voxel grid plus a dirty flag.
 *
 * Any successful write marks the chunk dirty. [`remesh`](Self::remesh)
 * regenerates the whole mesh and clears the flag; there is no partial
 * remeshing.
 */
#[derive(Clone, Debug)]
pub struct Chunk {
    grid: VoxelGrid,
    dirty: bool,
}

impl Chunk {
    /// A freshly created chunk is dirty so it gets meshed on first use.
    pub fn new(grid: VoxelGrid) -> Self {
        Self { grid, dirty: true }
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> bool {
        let changed = self.grid.get(x, y, z).is_some_and(|old| old != block);
        if changed {
            self.grid.set(x, y, z, block);
            self.dirty = true;
        }
        changed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn remesh(&mut self) -> Mesh {
        self.dirty = false;
        generate_mesh(&self.grid)
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new(VoxelGrid::new())
    }
}
