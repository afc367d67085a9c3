use crate::data_structures::{
    block::{BlockType, MeshClass},
    chunk::VoxelGrid,
    model::{Mesh, ModelVertex},
};

/// Number of atlas cells along each axis.
pub const ATLAS_CELLS: u32 = 16;

/// One face of a unit cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    NegX,
    PosX,
    NegZ,
    PosZ,
    NegY,
    PosY,
}

/// Corner of the atlas cell a vertex samples from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Uv {
    Small,
    Big,
}
use Uv::{Big, Small};

/// Offset from the block origin plus the `(u, v)` corner for one vertex.
type Corner = ([f32; 3], (Uv, Uv));

/**
 * Two triangles per face. Seen from outside the cube they wind clockwise
 * once the vertex shader has flipped z into world space, matching
 * `FrontFace::Cw` in the pipeline.
 *
 * Side faces put the big `v` on the vertices with `y = 1`, so textures are
 * upright.
 */
#[rustfmt::skip]
const CORNERS: [[Corner; 6]; 6] = [
    // -x
    [
        ([0.0, 0.0, 0.0], (Big, Small)), ([0.0, 0.0, 1.0], (Small, Small)), ([0.0, 1.0, 0.0], (Big, Big)),
        ([0.0, 1.0, 1.0], (Small, Big)), ([0.0, 1.0, 0.0], (Big, Big)),     ([0.0, 0.0, 1.0], (Small, Small)),
    ],
    // +x
    [
        ([1.0, 0.0, 0.0], (Small, Small)), ([1.0, 1.0, 0.0], (Small, Big)), ([1.0, 0.0, 1.0], (Big, Small)),
        ([1.0, 1.0, 1.0], (Big, Big)),     ([1.0, 0.0, 1.0], (Big, Small)), ([1.0, 1.0, 0.0], (Small, Big)),
    ],
    // -z
    [
        ([0.0, 0.0, 0.0], (Small, Small)), ([0.0, 1.0, 0.0], (Small, Big)), ([1.0, 0.0, 0.0], (Big, Small)),
        ([1.0, 1.0, 0.0], (Big, Big)),     ([1.0, 0.0, 0.0], (Big, Small)), ([0.0, 1.0, 0.0], (Small, Big)),
    ],
    // +z
    [
        ([0.0, 0.0, 1.0], (Big, Small)), ([1.0, 0.0, 1.0], (Small, Small)), ([0.0, 1.0, 1.0], (Big, Big)),
        ([1.0, 1.0, 1.0], (Small, Big)), ([0.0, 1.0, 1.0], (Big, Big)),     ([1.0, 0.0, 1.0], (Small, Small)),
    ],
    // -y
    [
        ([0.0, 0.0, 0.0], (Small, Small)), ([1.0, 0.0, 0.0], (Small, Big)), ([0.0, 0.0, 1.0], (Big, Small)),
        ([1.0, 0.0, 1.0], (Big, Big)),     ([0.0, 0.0, 1.0], (Big, Small)), ([1.0, 0.0, 0.0], (Small, Big)),
    ],
    // +y
    [
        ([0.0, 1.0, 0.0], (Big, Small)), ([0.0, 1.0, 1.0], (Small, Small)), ([1.0, 1.0, 0.0], (Big, Big)),
        ([1.0, 1.0, 1.0], (Small, Big)), ([1.0, 1.0, 0.0], (Big, Big)),     ([0.0, 1.0, 1.0], (Small, Small)),
    ],
];

impl Face {
    /// Emission order of the mesher.
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegZ,
        Face::PosZ,
        Face::NegY,
        Face::PosY,
    ];

    pub fn normal(self) -> [f32; 3] {
        let [x, y, z] = self.neighbor_offset();
        [x as f32, y as f32, z as f32]
    }

    pub fn neighbor_offset(self) -> [i32; 3] {
        match self {
            Face::NegX => [-1, 0, 0],
            Face::PosX => [1, 0, 0],
            Face::NegZ => [0, 0, -1],
            Face::PosZ => [0, 0, 1],
            Face::NegY => [0, -1, 0],
            Face::PosY => [0, 1, 0],
        }
    }

    /// Atlas cell a block of type `block` shows on this face.
    pub fn atlas_index(self, block: BlockType) -> u8 {
        match self {
            Face::PosY => block.top_index(),
            Face::NegY => block.bottom_index(),
            _ => block.side_index(),
        }
    }

    /// Appends this face of a box spanning `min..max` to `mesh`, sampling
    /// the atlas cell `cell`.
    pub fn emit(self, mesh: &mut Mesh, min: [f32; 3], max: [f32; 3], cell: AtlasCell) {
        let normal = self.normal();
        for (offset, (u, v)) in CORNERS[self as usize] {
            let position = [0, 1, 2].map(|i| min[i] + offset[i] * (max[i] - min[i]));
            let u = match u {
                Small => cell.u_small,
                Big => cell.u_big,
            };
            let v = match v {
                Small => cell.v_small,
                Big => cell.v_big,
            };
            mesh.push(ModelVertex::new(position, normal, [u, v]));
        }
    }
}

/// Texture-coordinate bounds of one atlas cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtlasCell {
    pub u_small: f32,
    pub u_big: f32,
    pub v_small: f32,
    pub v_big: f32,
}

/// Bounds of cell `index`, counting along `u` first. Row 0 is at `v = 0`.
pub fn atlas_uv(index: u8) -> AtlasCell {
    let cells = ATLAS_CELLS as f32;
    let column = (index as u32 % ATLAS_CELLS) as f32;
    let row = (index as u32 / ATLAS_CELLS) as f32;
    AtlasCell {
        u_small: column / cells,
        u_big: (column + 1.0) / cells,
        v_small: row / cells,
        v_big: (row + 1.0) / cells,
    }
}

fn is_face_visible(grid: &VoxelGrid, [x, y, z]: [i32; 3], face: Face) -> bool {
    let [dx, dy, dz] = face.neighbor_offset();
    match grid.get(x + dx, y + dy, z + dz) {
        Some(neighbor) => neighbor.is_passthrough(),
        // grid boundary
        None => true,
    }
}

/**
 * Builds the culled mesh of a voxel grid.
 *
 * Cells are visited `x`, then `y`, then `z`, each ascending. Every cube
 * block emits its visible faces in [`Face::ALL`] order, six vertices each.
 * A face is visible when it lies on the grid boundary or the neighbour is
 * passthrough.
 */
pub fn generate_mesh(grid: &VoxelGrid) -> Mesh {
    let mut mesh = Mesh::new();
    for ((x, y, z), block) in grid.iter() {
        match block.mesh_class() {
            MeshClass::Empty => continue,
            MeshClass::Cube => {}
        }
        let min = [x as f32, y as f32, z as f32];
        let max = [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0];
        for face in Face::ALL {
            if is_face_visible(grid, [x, y, z], face) {
                face.emit(&mut mesh, min, max, atlas_uv(face.atlas_index(block)));
            }
        }
    }
    mesh
}
