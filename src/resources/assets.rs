//! Built-in assets: the block atlas, the dirt texture and the test character.
//!
//! All pixel data is generated in code and stored bottom row first, the same
//! order [`load_atlas`](super::texture::load_atlas) produces for image files.

use image::{Rgb, RgbImage};

use crate::{
    data_structures::{block::BlockType, model::Mesh},
    resources::mesh::{ATLAS_CELLS, AtlasCell, Face},
};

/// Edge length of the block atlas in pixels.
pub const ATLAS_SIZE: u32 = 256;
/// Edge length of one atlas cell in pixels.
pub const CELL_SIZE: u32 = ATLAS_SIZE / ATLAS_CELLS;

const GRASS: [u8; 3] = [86, 160, 58];
const DIRT: [u8; 3] = [134, 96, 67];
const STONE: [u8; 3] = [125, 125, 125];

/// `colour` shaded by up to ±12 per channel depending on the pixel.
fn speckle(colour: [u8; 3], x: u32, y: u32) -> Rgb<u8> {
    let shade = ((x * 7 + y * 13) ^ (x * y)) % 5;
    let offset = shade as i16 * 6 - 12;
    Rgb(colour.map(|c| (c as i16 + offset).clamp(0, 255) as u8))
}

fn paint_cell(atlas: &mut RgbImage, index: u8, pixel: impl Fn(u32, u32) -> Rgb<u8>) {
    let x0 = (index as u32 % ATLAS_CELLS) * CELL_SIZE;
    let y0 = (index as u32 / ATLAS_CELLS) * CELL_SIZE;
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            atlas.put_pixel(x0 + x, y0 + y, pixel(x, y));
        }
    }
}

/// The 256×256 block atlas.
///
/// Every cell referenced by the block registry is painted; the rest show a
/// magenta checker so a wrong index is obvious.
pub fn block_atlas() -> RgbImage {
    let mut atlas = RgbImage::from_fn(ATLAS_SIZE, ATLAS_SIZE, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgb([255, 0, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });

    for block in BlockType::ALL.into_iter().filter(|b| b.is_solid()) {
        let (top, side, bottom) = (block.top_index(), block.side_index(), block.bottom_index());
        match block {
            BlockType::Grass => {
                paint_cell(&mut atlas, top, |x, y| speckle(GRASS, x, y));
                // higher rows are higher v, i.e. the top edge of a side face
                paint_cell(&mut atlas, side, |x, y| {
                    if y >= CELL_SIZE - 3 {
                        speckle(GRASS, x, y)
                    } else {
                        speckle(DIRT, x, y)
                    }
                });
                paint_cell(&mut atlas, bottom, |x, y| speckle(DIRT, x, y));
            }
            BlockType::Dirt => {
                for cell in [top, side, bottom] {
                    paint_cell(&mut atlas, cell, |x, y| speckle(DIRT, x, y));
                }
            }
            BlockType::Stone => {
                for cell in [top, side, bottom] {
                    paint_cell(&mut atlas, cell, |x, y| speckle(STONE, x, y));
                }
            }
            BlockType::Air => {}
        }
    }
    atlas
}

/// A 16×16 dirt texture for the character.
pub fn dirt_texture() -> RgbImage {
    RgbImage::from_fn(CELL_SIZE, CELL_SIZE, |x, y| speckle(DIRT, x, y))
}

const WHOLE_TEXTURE: AtlasCell = AtlasCell {
    u_small: 0.0,
    u_big: 1.0,
    v_small: 0.0,
    v_big: 1.0,
};

/// Appends all six faces of an axis-aligned box.
pub fn push_box(mesh: &mut Mesh, min: [f32; 3], max: [f32; 3], cell: AtlasCell) {
    for face in Face::ALL {
        face.emit(mesh, min, max, cell);
    }
}

/**
 * A small blocky figure standing on its local origin: two legs, a torso and
 * a head, centred on the Y axis so it spins in place.
 */
pub fn character_mesh() -> Mesh {
    let parts: [([f32; 3], [f32; 3]); 4] = [
        // legs
        ([-0.25, 0.0, -0.1], [-0.02, 0.6, 0.1]),
        ([0.02, 0.0, -0.1], [0.25, 0.6, 0.1]),
        // torso
        ([-0.3, 0.6, -0.15], [0.3, 1.3, 0.15]),
        // head
        ([-0.2, 1.3, -0.2], [0.2, 1.7, 0.2]),
    ];
    let mut mesh = Mesh::with_capacity(parts.len() * 36);
    for (min, max) in parts {
        push_box(&mut mesh, min, max, WHOLE_TEXTURE);
    }
    mesh
}
