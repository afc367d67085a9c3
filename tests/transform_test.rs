use std::f32::consts::FRAC_PI_2;

use cinnamon::{
    camera::{Camera, ModelUniform, OPENGL_TO_WGPU_MATRIX, Projection},
    cgmath::{Deg, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4},
    transform::{
        Transform, brightness, mat4_mult, pitch_matrix, position_matrix, yaw_matrix,
    },
};

use crate::common::test_utils::{approx_eq, assert_matrix_eq};

mod common;

#[rustfmt::skip]
fn sample_matrix() -> Matrix4<f32> {
    Matrix4::new(
        1.0,  2.0,  3.0,  4.0,
        5.0,  6.0,  7.0,  8.0,
        9.0,  10.0, 11.0, 12.0,
        13.0, 14.0, 15.0, 16.0,
    )
}

fn posed() -> Transform {
    Transform::new(Point3::new(1.0, 2.0, -3.0), Rad(0.3), Rad(1.1))
}

#[test]
fn should_treat_identity_as_neutral_in_mat4_mult() {
    let m = sample_matrix();
    let identity = Matrix4::identity();
    assert_matrix_eq(&mat4_mult(&identity, &m), &m);
    assert_matrix_eq(&mat4_mult(&m, &identity), &m);
}

#[test]
fn should_apply_the_second_argument_first() {
    let a = Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0));
    let b = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
    // scale after translate: (0 + 1) * 2
    let p = mat4_mult(&b, &a) * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!(approx_eq(p.x, 2.0));
}

#[test]
fn should_produce_identity_model_matrix_at_rest() {
    assert_matrix_eq(&Transform::default().model_matrix(), &Matrix4::identity());
}

#[test]
fn should_write_position_into_the_translation_column() {
    let model = Transform::at(4.0, 5.0, -6.0).model_matrix();
    assert!(approx_eq(model.w.x, 4.0));
    assert!(approx_eq(model.w.y, 5.0));
    assert!(approx_eq(model.w.z, -6.0));
    assert!(approx_eq(model.w.w, 1.0));
}

#[test]
fn should_rotate_with_column_major_pitch_and_yaw() {
    let up = Vector4::new(0.0, 1.0, 0.0, 0.0);
    let pitched = pitch_matrix(Rad(FRAC_PI_2)) * up;
    assert!(approx_eq(pitched.y, 0.0));
    assert!(approx_eq(pitched.z, -1.0));

    let right = Vector4::new(1.0, 0.0, 0.0, 0.0);
    let yawed = yaw_matrix(Rad(FRAC_PI_2)) * right;
    assert!(approx_eq(yawed.x, 0.0));
    assert!(approx_eq(yawed.z, 1.0));
}

#[test]
fn should_undo_the_camera_pose_with_the_view_matrix() {
    let camera = posed();
    let product = camera.view_matrix() * camera.model_matrix();
    assert_matrix_eq(&product, &Matrix4::identity());
}

#[test]
fn should_map_the_camera_position_to_the_view_origin() {
    let camera = posed();
    let p = camera.view_matrix() * Vector4::new(1.0, 2.0, -3.0, 1.0);
    assert!(approx_eq(p.x, 0.0) && approx_eq(p.y, 0.0) && approx_eq(p.z, 0.0));
}

#[test]
fn should_build_the_normal_matrix_from_negated_angles() {
    let model = posed();
    let normal = model.normal_matrix();
    let expected = mat4_mult(&yaw_matrix(Rad(-1.1)), &pitch_matrix(Rad(-0.3)));
    assert_matrix_eq(&normal, &expected);
    // no translation
    assert!(approx_eq(normal.w.x, 0.0) && approx_eq(normal.w.y, 0.0) && approx_eq(normal.w.z, 0.0));
}

#[test]
fn should_undo_a_pure_yaw_in_the_normal_matrix() {
    let model = Transform::new(Point3::new(3.0, 0.0, 0.0), Rad(0.0), Rad(0.7));
    let mut rotation = model.model_matrix();
    rotation.w = Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert_matrix_eq(&(model.normal_matrix() * rotation), &Matrix4::identity());
}

#[test]
fn should_compose_projection_view_model_in_order() {
    let projection = Projection::new(800, 400, Deg(90.0), 0.01, 100.0);
    let camera = posed();
    let model = Transform::new(Point3::new(8.0, 0.0, -2.0), Rad(0.0), Rad(0.5));
    let expected = projection.matrix() * camera.view_matrix() * model.model_matrix();
    assert_matrix_eq(
        &position_matrix(&projection.matrix(), &camera, &model),
        &expected,
    );
}

#[test]
fn should_build_the_perspective_projection() {
    let projection = Projection::new(800, 400, Deg(90.0), 0.01, 100.0);
    let m = projection.matrix();
    let (n, f) = (0.01f32, 100.0f32);
    assert!(approx_eq(projection.aspect(), 2.0));
    assert!(approx_eq(m[0][0], 0.5));
    assert!(approx_eq(m[1][1], 1.0));
    assert!(approx_eq(m[2][2], -(f + n) / (f - n)));
    assert!(approx_eq(m[2][3], -1.0));
    assert!(approx_eq(m[3][2], -2.0 * f * n / (f - n)));
    assert!(approx_eq(m[3][3], 0.0));
}

#[test]
fn should_regenerate_the_projection_on_resize() {
    let mut projection = Projection::new(800, 400, Deg(90.0), 0.01, 100.0);
    projection.resize(400, 400);
    assert!(approx_eq(projection.aspect(), 1.0));
    assert!(approx_eq(projection.matrix()[0][0], 1.0));
    assert!(approx_eq(projection.matrix()[1][1], 1.0));

    // a minimised window must not produce NaNs
    projection.resize(400, 0);
    assert!(projection.matrix()[0][0].is_finite());
}

#[test]
fn should_remap_depth_in_the_model_uniform() {
    let projection = Projection::new(800, 400, Deg(90.0), 0.01, 100.0);
    let camera = Camera::new(Point3::new(0.0, 0.0, 2.0));
    let model = Transform::default();
    let mut uniform = ModelUniform::new();
    uniform.update(&projection, &camera, &model);

    let expected =
        OPENGL_TO_WGPU_MATRIX * position_matrix(&projection.matrix(), &camera.transform, &model);
    assert_matrix_eq(&Matrix4::from(uniform.position_matrix), &expected);
    assert_matrix_eq(&Matrix4::from(uniform.normal_matrix), &Matrix4::identity());
}

#[test]
fn should_light_faces_by_the_fixed_direction() {
    let identity = Matrix4::identity();
    assert!(approx_eq(brightness(&identity, Vector3::unit_y()), 0.85));
    assert!(approx_eq(brightness(&identity, -Vector3::unit_y()), 0.15));
    assert!(approx_eq(brightness(&identity, Vector3::unit_z()), 0.5));
}
