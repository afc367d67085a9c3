//! Seeded generation of the demo chunk.
//!
//! Two generators exist: a uniform scatter of grass blocks and a smoothed
//! heightmap with grass, dirt and stone layers. Both draw from a
//! `ChaCha8Rng` seeded from the world config, so a seed always produces the
//! same chunk.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::{Generator, WorldConfig},
    data_structures::{
        block::BlockType,
        chunk::{CHUNK_SIZE, VoxelGrid},
    },
};

/// Lowest column height the heightmap generator produces.
pub const MIN_HEIGHT: usize = 4;
/// Highest column height the heightmap generator produces.
pub const MAX_HEIGHT: usize = 12;
/// Dirt layers between the grass cap and the stone below.
const DIRT_DEPTH: usize = 3;

pub fn generate(config: &WorldConfig) -> VoxelGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let grid = match config.generator {
        Generator::Scatter { one_in } => scatter(&mut rng, one_in),
        Generator::Heightmap { smoothness } => heightmap(&mut rng, smoothness),
    };
    log::info!(
        "Generated chunk with {:?} (seed {}): {} solid blocks",
        config.generator,
        config.seed,
        grid.solid_count()
    );
    grid
}

/// Every cell becomes grass with probability `1 / one_in`.
///
/// `one_in` of 0 or 1 fills the whole grid.
pub fn scatter<R: Rng>(rng: &mut R, one_in: u32) -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    for x in 0..CHUNK_SIZE as i32 {
        for y in 0..CHUNK_SIZE as i32 {
            for z in 0..CHUNK_SIZE as i32 {
                if one_in <= 1 || rng.gen_range(0..one_in) == 0 {
                    grid.set(x, y, z, BlockType::Grass);
                }
            }
        }
    }
    grid
}

/**
 * Fills a `width × height` row-major buffer with uniform noise in `[0, 1)`
 * and smooths it `smoothness` times.
 *
 * A pass averages each cell with its +x, +y and +x+y neighbours (in place,
 * so earlier results feed later ones), then copies the first row onto the
 * last row and the first column onto the last column.
 */
pub fn populate_2d_noise<R: Rng>(
    rng: &mut R,
    width: usize,
    height: usize,
    smoothness: u32,
) -> Vec<f32> {
    let mut buffer: Vec<f32> = (0..width * height)
        .map(|_| rng.gen_range(0..10_000u32) as f32 * 0.0001)
        .collect();
    if width < 2 || height < 2 {
        return buffer;
    }

    for _ in 0..smoothness {
        for x in 0..width - 1 {
            for y in 0..height - 1 {
                buffer[y * width + x] = (buffer[y * width + x]
                    + buffer[y * width + x + 1]
                    + buffer[(y + 1) * width + x]
                    + buffer[(y + 1) * width + x + 1])
                    / 4.0;
            }
        }
        for x in 0..width - 1 {
            buffer[(height - 1) * width + x] = buffer[x];
        }
        for y in 0..height {
            buffer[y * width + (width - 1)] = buffer[y * width];
        }
    }
    buffer
}

/// Column heights in `[MIN_HEIGHT, MAX_HEIGHT]`, indexed `[x * CHUNK_SIZE + z]`.
pub fn column_heights<R: Rng>(rng: &mut R, smoothness: u32) -> Vec<usize> {
    let noise = populate_2d_noise(rng, CHUNK_SIZE, CHUNK_SIZE, smoothness);
    let (min, max) = noise
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = (MAX_HEIGHT - MIN_HEIGHT) as f32;

    noise
        .iter()
        .map(|&v| {
            let t = if max > min { (v - min) / (max - min) } else { 0.5 };
            MIN_HEIGHT + (t * range).round() as usize
        })
        .collect()
}

/// Layered terrain: grass on top, three dirt below, stone underneath.
pub fn heightmap<R: Rng>(rng: &mut R, smoothness: u32) -> VoxelGrid {
    let heights = column_heights(rng, smoothness);
    let mut grid = VoxelGrid::new();
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let height = heights[x * CHUNK_SIZE + z];
            for y in 0..height {
                let depth = height - 1 - y;
                let block = match depth {
                    0 => BlockType::Grass,
                    d if d <= DIRT_DEPTH => BlockType::Dirt,
                    _ => BlockType::Stone,
                };
                grid.set(x as i32, y as i32, z as i32, block);
            }
        }
    }
    grid
}
