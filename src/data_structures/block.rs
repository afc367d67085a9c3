//! Block type registry.
//!
//! A [`BlockType`] is an 8-bit identifier. Everything the renderer and the
//! collision resolver need to know about a type lives in one static
//! [`BlockProperties`] record per type.

/**
 * How a block turns into geometry.
 *
 * `Empty` blocks produce no faces and never collide. `Cube` blocks produce up
 * to six faces and are solid.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshClass {
    Empty,
    Cube,
}

/// Mesh class plus the atlas cells used for the top, side and bottom faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockProperties {
    pub mesh_class: MeshClass,
    pub top: u8,
    pub side: u8,
    pub bottom: u8,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
}

const PROPERTIES: [BlockProperties; 4] = [
    // Air
    BlockProperties {
        mesh_class: MeshClass::Empty,
        top: 0,
        side: 0,
        bottom: 0,
    },
    // Grass
    BlockProperties {
        mesh_class: MeshClass::Cube,
        top: 98,
        side: 243,
        bottom: 242,
    },
    // Dirt
    BlockProperties {
        mesh_class: MeshClass::Cube,
        top: 242,
        side: 242,
        bottom: 242,
    },
    // Stone
    BlockProperties {
        mesh_class: MeshClass::Cube,
        top: 241,
        side: 241,
        bottom: 241,
    },
];

impl BlockType {
    pub const ALL: [BlockType; 4] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
    ];

    /// Looks up a registered type by its identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn properties(self) -> &'static BlockProperties {
        &PROPERTIES[self as usize]
    }

    pub fn mesh_class(self) -> MeshClass {
        self.properties().mesh_class
    }

    pub fn top_index(self) -> u8 {
        self.properties().top
    }

    pub fn side_index(self) -> u8 {
        self.properties().side
    }

    pub fn bottom_index(self) -> u8 {
        self.properties().bottom
    }

    /// Whether light, the camera and neighbouring faces see through this block.
    pub fn is_passthrough(self) -> bool {
        self.mesh_class() == MeshClass::Empty
    }

    pub fn is_solid(self) -> bool {
        !self.is_passthrough()
    }
}
