#![allow(dead_code)]

use cinnamon::{
    cgmath::Matrix4,
    config::MovementConfig,
    data_structures::{block::BlockType, chunk::VoxelGrid},
};

pub const EPSILON: f32 = 1e-5;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

pub fn assert_matrix_eq(actual: &Matrix4<f32>, expected: &Matrix4<f32>) {
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                approx_eq(actual[col][row], expected[col][row]),
                "m[{col}][{row}] = {} but expected {}\nactual:   {:?}\nexpected: {:?}",
                actual[col][row],
                expected[col][row],
                actual,
                expected
            );
        }
    }
}

/// A grid with grass at every listed cell.
pub fn grid_with(cells: &[(i32, i32, i32)]) -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    for &(x, y, z) in cells {
        assert!(grid.set(x, y, z, BlockType::Grass));
    }
    grid
}

pub fn movement() -> MovementConfig {
    MovementConfig::default()
}
