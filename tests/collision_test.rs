use std::f32::consts::FRAC_PI_4;

use cinnamon::{
    cgmath::{Point3, Rad, Vector3},
    collision::{
        Resolution, apply_movement, forward_direction, is_aabb_inside_block,
        is_point_inside_block, resolve_move, strafe_direction, vertical_direction,
    },
    data_structures::{block::BlockType, chunk::VoxelGrid},
    input::Actions,
    transform::Transform,
};

use crate::common::test_utils::{approx_eq, grid_with, movement};

mod common;

/// The single column of cells (0, 0, 0..16).
fn column() -> VoxelGrid {
    let cells: Vec<(i32, i32, i32)> = (0..16).map(|z| (0, 0, z)).collect();
    grid_with(&cells)
}

/// Every cell with the given x index is solid.
fn wall_at_x(x: i32) -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    for y in 0..16 {
        for z in 0..16 {
            grid.set(x, y, z, BlockType::Stone);
        }
    }
    grid
}

#[test]
fn should_treat_points_outside_the_chunk_as_empty() {
    let grid = VoxelGrid::filled(BlockType::Stone);
    assert!(!is_point_inside_block(&grid, Point3::new(-0.1, 1.0, -1.0)));
    assert!(!is_point_inside_block(&grid, Point3::new(1.0, -0.1, -1.0)));
    assert!(!is_point_inside_block(&grid, Point3::new(1.0, 1.0, 0.1)));
    assert!(!is_point_inside_block(&grid, Point3::new(16.1, 1.0, -1.0)));
    assert!(!is_point_inside_block(&grid, Point3::new(1.0, 1.0, -16.1)));
    assert!(is_point_inside_block(&grid, Point3::new(1.0, 1.0, -1.0)));
}

#[test]
fn should_treat_the_closed_upper_bound_as_empty() {
    let grid = VoxelGrid::filled(BlockType::Stone);
    assert!(!is_point_inside_block(&grid, Point3::new(16.0, 0.5, -0.5)));
    assert!(!is_point_inside_block(&grid, Point3::new(0.5, 16.0, -0.5)));
    assert!(!is_point_inside_block(&grid, Point3::new(0.5, 0.5, -16.0)));
    assert!(is_point_inside_block(&grid, Point3::new(15.9, 15.9, -15.9)));
}

#[test]
fn should_flip_z_when_looking_up_cells() {
    let grid = grid_with(&[(0, 0, 3)]);
    assert!(is_point_inside_block(&grid, Point3::new(0.5, 0.5, -3.5)));
    assert!(!is_point_inside_block(&grid, Point3::new(0.5, 0.5, -2.5)));
    assert!(!is_point_inside_block(&grid, Point3::new(0.5, 0.5, 3.5)));
}

#[test]
fn should_detect_overlap_at_any_corner() {
    let grid = grid_with(&[(4, 4, 4)]);
    // only the (+x, +y, -z) corner reaches into cell (4, 4, 4)
    let center = Point3::new(3.9, 3.9, -3.9);
    assert!(is_aabb_inside_block(&grid, center, 0.2));
    assert!(!is_aabb_inside_block(&grid, center, 0.05));
}

#[test]
fn should_take_free_moves_unchanged() {
    let grid = VoxelGrid::new();
    let mut position = Point3::new(5.0, 5.0, -5.0);
    let resolution = resolve_move(&grid, &mut position, Vector3::unit_x(), &movement());
    assert_eq!(resolution, Resolution::Free);
    assert!(approx_eq(position.x, 5.1));
    assert!(approx_eq(position.y, 5.0));
    assert!(approx_eq(position.z, -5.0));
}

#[test]
fn should_keep_bounded_residual_when_embedded() {
    let grid = VoxelGrid::filled(BlockType::Stone);
    let mut position = Point3::new(8.5, 8.5, -8.5);
    let resolution = resolve_move(&grid, &mut position, Vector3::unit_x(), &movement());
    assert_eq!(resolution, Resolution::Embedded);
    // ten increments of 0.01 exactly undo the 0.1 step
    assert!(approx_eq(position.x, 8.5));
}

#[test]
fn should_stop_at_the_column_boundary() {
    let grid = wall_at_x(0);
    let mut transform = Transform::new(Point3::new(2.05, 0.5, -8.0), Rad(0.0), Rad(0.0));
    let mut resolutions = Vec::new();
    for _ in 0..20 {
        let [strafe, forward, vertical] =
            apply_movement(&grid, &mut transform, Actions::STRAFE_LEFT, &movement());
        assert_eq!((forward, vertical), (None, None));
        resolutions.push(strafe.expect("strafe group should run"));
    }

    assert!(resolutions[..8].iter().all(|r| *r == Resolution::Free));
    match resolutions[8] {
        Resolution::Resolved { steps } => assert!(steps <= 10),
        other => panic!("expected the ninth step to collide, got {:?}", other),
    }
    let x = transform.position.x;
    assert!((1.195..=1.215).contains(&x), "settled at x = {x}");
    assert!(!is_aabb_inside_block(&grid, transform.position, 0.2));
    assert!(approx_eq(transform.position.y, 0.5));
    assert!(approx_eq(transform.position.z, -8.0));
}

#[test]
fn should_stop_beside_a_single_column() {
    let grid = column();
    let mut transform = Transform::new(Point3::new(2.05, 0.5, -8.0), Rad(0.0), Rad(0.0));
    let mut collided = false;
    for _ in 0..20 {
        let [strafe, _, _] =
            apply_movement(&grid, &mut transform, Actions::STRAFE_LEFT, &movement());
        collided |= matches!(strafe, Some(Resolution::Resolved { .. }));
    }
    assert!(collided);
    let x = transform.position.x;
    assert!((1.195..=1.215).contains(&x), "settled at x = {x}");
    assert!(!is_aabb_inside_block(&grid, transform.position, 0.2));
}

#[test]
fn should_stop_in_front_of_a_single_column() {
    let grid = column();
    // yaw 0 walks forward towards -z, straight at the column's front face
    let mut transform = Transform::new(Point3::new(0.5, 0.5, 1.0), Rad(0.0), Rad(0.0));
    let mut collided = false;
    for _ in 0..20 {
        let [_, forward, _] = apply_movement(&grid, &mut transform, Actions::FORWARD, &movement());
        collided |= matches!(forward, Some(Resolution::Resolved { .. }));
    }
    assert!(collided);
    let z = transform.position.z;
    assert!((0.195..=0.215).contains(&z), "settled at z = {z}");
    assert!(approx_eq(transform.position.x, 0.5));
    assert!(!is_aabb_inside_block(&grid, transform.position, 0.2));
}

#[test]
fn should_cancel_diagonal_moves_without_sliding() {
    let grid = wall_at_x(5);
    let start = Point3::new(4.65, 3.5, -8.0);
    let mut transform = Transform::new(start, Rad(0.0), Rad(FRAC_PI_4));
    for _ in 0..6 {
        apply_movement(&grid, &mut transform, Actions::FORWARD, &movement());
        let moved = transform.position - start;
        if moved.x == 0.0 {
            continue;
        }
        // still on the diagonal; rounding grows with the coordinates, so compare the ratio
        let ratio = moved.x / -moved.z;
        assert!((ratio - 1.0).abs() < 1e-4, "slid to {:?}", transform.position);
    }
    assert!(transform.position.x < 4.8);
    assert!(transform.position.x > 4.65);
}

#[test]
fn should_prefer_left_forward_and_ascend() {
    let both = Actions::all();
    let left = strafe_direction(both, 0.0).unwrap();
    assert!(approx_eq(left.x, -1.0) && approx_eq(left.z, 0.0));

    let forward = forward_direction(both, 0.0).unwrap();
    assert!(approx_eq(forward.x, 0.0) && approx_eq(forward.z, -1.0));

    assert_eq!(vertical_direction(both), Some(Vector3::unit_y()));
    assert_eq!(
        vertical_direction(Actions::DESCEND),
        Some(-Vector3::unit_y())
    );
    assert_eq!(strafe_direction(Actions::FORWARD, 0.0), None);
}

#[test]
fn should_rotate_movement_with_yaw() {
    let yaw = FRAC_PI_4 * 2.0;
    let right = strafe_direction(Actions::STRAFE_RIGHT, yaw).unwrap();
    assert!(approx_eq(right.x, 0.0) && approx_eq(right.z, 1.0));
    let back = forward_direction(Actions::BACKWARD, yaw).unwrap();
    assert!(approx_eq(back.x, -1.0) && approx_eq(back.z, 0.0));
}

#[test]
fn should_run_the_groups_in_order() {
    let grid = VoxelGrid::new();
    let mut transform = Transform::at(8.0, 8.0, -8.0);
    let resolutions = apply_movement(
        &grid,
        &mut transform,
        Actions::STRAFE_RIGHT | Actions::BACKWARD | Actions::ASCEND,
        &movement(),
    );
    assert_eq!(resolutions, [Some(Resolution::Free); 3]);
    assert!(approx_eq(transform.position.x, 8.1));
    assert!(approx_eq(transform.position.y, 8.1));
    assert!(approx_eq(transform.position.z, -7.9));

    let idle = apply_movement(&grid, &mut transform, Actions::empty(), &movement());
    assert_eq!(idle, [None; 3]);
}
