//! Discrete-step collision between the player cube and the voxel grid.
//!
//! The player is an axis-aligned cube that is only tested at its eight
//! corners. World space has the grid's z axis flipped: cell `(i, j, k)`
//! covers `x ∈ [i, i+1]`, `y ∈ [j, j+1]`, `z ∈ [-(k+1), -k]`.
//!
//! Movement is resolved per group (strafe, forward/back, vertical). A group
//! moves a full step and, if that overlaps a solid cell, walks back along the
//! same direction in small increments. There is no sliding along walls.

use cgmath::{Point3, Vector3};

use crate::{
    config::MovementConfig,
    data_structures::chunk::{CHUNK_SIZE, VoxelGrid},
    input::Actions,
    transform::Transform,
};

/// Outcome of a single resolved move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The full step was taken.
    Free,
    /// The step collided and was walked back `steps` increments.
    Resolved { steps: u32 },
    /// Still overlapping after the walk-back budget ran out.
    Embedded,
}

/// Whether a world-space point lies inside a solid cell.
///
/// Points outside the chunk are empty. The upper bounds are closed, so a
/// point exactly on `x = 16`, `y = 16` or `z = -16` is in range but maps to
/// index 16, which is outside the grid and therefore empty.
pub fn is_point_inside_block(grid: &VoxelGrid, point: Point3<f32>) -> bool {
    let size = CHUNK_SIZE as f32;
    if point.x < 0.0
        || point.y < 0.0
        || point.z > 0.0
        || point.x > size
        || point.y > size
        || point.z < -size
    {
        return false;
    }
    let (x, y, z) = (
        point.x.floor() as i32,
        point.y.floor() as i32,
        (-point.z).floor() as i32,
    );
    grid.get(x, y, z).is_some_and(|block| block.is_solid())
}

/// Whether any corner of the cube centred at `center` with half edge
/// `half_size` is inside a solid cell.
pub fn is_aabb_inside_block(grid: &VoxelGrid, center: Point3<f32>, half_size: f32) -> bool {
    const SIGNS: [f32; 2] = [-1.0, 1.0];
    SIGNS.iter().any(|&sx| {
        SIGNS.iter().any(|&sy| {
            SIGNS.iter().any(|&sz| {
                let corner = Point3::new(
                    center.x + sx * half_size,
                    center.y + sy * half_size,
                    center.z + sz * half_size,
                );
                is_point_inside_block(grid, corner)
            })
        })
    })
}

/// Moves `position` one step along `direction` and walks back on overlap.
pub fn resolve_move(
    grid: &VoxelGrid,
    position: &mut Point3<f32>,
    direction: Vector3<f32>,
    movement: &MovementConfig,
) -> Resolution {
    *position = *position + direction * movement.step;
    if !is_aabb_inside_block(grid, *position, movement.half_size) {
        return Resolution::Free;
    }

    let back = direction * movement.walkback_increment;
    for steps in 1..=movement.walkback_steps {
        *position = *position - back;
        if !is_aabb_inside_block(grid, *position, movement.half_size) {
            return Resolution::Resolved { steps };
        }
    }
    Resolution::Embedded
}

/// Strafe direction for the held actions; left wins over right.
pub fn strafe_direction(actions: Actions, yaw: f32) -> Option<Vector3<f32>> {
    let (sin, cos) = yaw.sin_cos();
    let left = Vector3::new(-cos, 0.0, -sin);
    if actions.contains(Actions::STRAFE_LEFT) {
        Some(left)
    } else if actions.contains(Actions::STRAFE_RIGHT) {
        Some(-left)
    } else {
        None
    }
}

/// Forward/backward direction for the held actions; forward wins.
pub fn forward_direction(actions: Actions, yaw: f32) -> Option<Vector3<f32>> {
    let (sin, cos) = yaw.sin_cos();
    let forward = Vector3::new(sin, 0.0, -cos);
    if actions.contains(Actions::FORWARD) {
        Some(forward)
    } else if actions.contains(Actions::BACKWARD) {
        Some(-forward)
    } else {
        None
    }
}

/// Vertical direction for the held actions; ascend wins.
pub fn vertical_direction(actions: Actions) -> Option<Vector3<f32>> {
    if actions.contains(Actions::ASCEND) {
        Some(Vector3::unit_y())
    } else if actions.contains(Actions::DESCEND) {
        Some(-Vector3::unit_y())
    } else {
        None
    }
}

/**
 * Runs the three movement groups in order (strafe, forward/back, vertical)
 * against `transform.position`. Each group sees the position left by the
 * previous one. Returns the resolution per group, `None` where the group
 * had no held action.
 */
pub fn apply_movement(
    grid: &VoxelGrid,
    transform: &mut Transform,
    actions: Actions,
    movement: &MovementConfig,
) -> [Option<Resolution>; 3] {
    let yaw = transform.yaw.0;
    let directions = [
        strafe_direction(actions, yaw),
        forward_direction(actions, yaw),
        vertical_direction(actions),
    ];
    directions.map(|direction| {
        let direction = direction?;
        let resolution = resolve_move(grid, &mut transform.position, direction, movement);
        if resolution == Resolution::Embedded {
            log::trace!(
                "Player still embedded at {:?} after {} walk-back steps",
                transform.position,
                movement.walkback_steps
            );
        }
        Some(resolution)
    })
}
