//! Rotation, translation and projection composition.
//!
//! All matrices are column-major `cgmath::Matrix4<f32>`, i.e. `m[col][row]`,
//! which is also the layout the shader expects. Only pitch (about X) and yaw
//! (about Y) are modelled; there is no roll.
//!
//! Composition order is not symmetric between models and the camera:
//!
//! - model: rotate around the local origin (yaw after pitch), then translate
//! - view: translate by the negated camera position, then yaw, then pitch,
//!   all with negated angles
//! - normal: the model's rotation with negated angles and no translation
//! - position: `projection · view · model`

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3};

/// Position plus pitch/yaw orientation of a camera or a rendered model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Point3<f32>,
    pub pitch: Rad<f32>,
    pub yaw: Rad<f32>,
}

impl Transform {
    pub fn new<P: Into<Rad<f32>>, Y: Into<Rad<f32>>>(
        position: Point3<f32>,
        pitch: P,
        yaw: Y,
    ) -> Self {
        Self {
            position,
            pitch: pitch.into(),
            yaw: yaw.into(),
        }
    }

    /// A transform at `(x, y, z)` without rotation.
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Converts from model space to world space.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let (pitch, yaw) = rotation_matrices(self.pitch, self.yaw);
        let mut model = mat4_mult(&yaw, &pitch);
        // The translation column is written directly instead of multiplied in.
        model.w.x = self.position.x;
        model.w.y = self.position.y;
        model.w.z = self.position.z;
        model
    }

    /// Converts from world space to view space when `self` is the camera.
    ///
    /// Camera motion has to be undone in the opposite order and with the
    /// opposite sign from how it was accumulated, so the translation comes
    /// first here.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let (pitch, yaw) = rotation_matrices(-self.pitch, -self.yaw);
        let translation = Matrix4::from_translation(-self.position.to_vec());
        let view = mat4_mult(&yaw, &translation);
        mat4_mult(&pitch, &view)
    }

    /// Reorients vertex normals of a model without translating them.
    pub fn normal_matrix(&self) -> Matrix4<f32> {
        let (pitch, yaw) = rotation_matrices(-self.pitch, -self.yaw);
        mat4_mult(&yaw, &pitch)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            pitch: Rad(0.0),
            yaw: Rad(0.0),
        }
    }
}

/// Composes two matrices where `a` is applied first and `b` second: `b · a`.
pub fn mat4_mult(b: &Matrix4<f32>, a: &Matrix4<f32>) -> Matrix4<f32> {
    *b * *a
}

/// Rotation about the local X axis.
#[rustfmt::skip]
pub fn pitch_matrix(pitch: Rad<f32>) -> Matrix4<f32> {
    let (sin, cos) = pitch.0.sin_cos();
    Matrix4::new(
        1.0, 0.0,  0.0, 0.0,
        0.0, cos, -sin, 0.0,
        0.0, sin,  cos, 0.0,
        0.0, 0.0,  0.0, 1.0,
    )
}

/// Rotation about the local Y axis.
#[rustfmt::skip]
pub fn yaw_matrix(yaw: Rad<f32>) -> Matrix4<f32> {
    let (sin, cos) = yaw.0.sin_cos();
    Matrix4::new(
        cos,  0.0, sin, 0.0,
        0.0,  1.0, 0.0, 0.0,
        -sin, 0.0, cos, 0.0,
        0.0,  0.0, 0.0, 1.0,
    )
}

/// Returns `(pitch_matrix, yaw_matrix)` for the given angles.
pub fn rotation_matrices(pitch: Rad<f32>, yaw: Rad<f32>) -> (Matrix4<f32>, Matrix4<f32>) {
    (pitch_matrix(pitch), yaw_matrix(yaw))
}

/// Final vertex transform: `projection · view · model`, evaluated model first.
pub fn position_matrix(
    projection: &Matrix4<f32>,
    camera: &Transform,
    model: &Transform,
) -> Matrix4<f32> {
    let projection_view = mat4_mult(projection, &camera.view_matrix());
    mat4_mult(&projection_view, &model.model_matrix())
}

/// Direction of the single fixed light. Not normalised.
pub const LIGHT_DIRECTION: [f32; 3] = [0.7, 0.7, 0.0];

/// Brightness factor the fragment shader multiplies into the texture colour.
///
/// Mirrors `fs_main` in `voxel_shader.wgsl`: no clamping, the dot product is
/// only remapped with `* 0.5 + 0.5`.
pub fn brightness(normal_matrix: &Matrix4<f32>, normal: Vector3<f32>) -> f32 {
    let transformed = (*normal_matrix * normal.extend(1.0)).truncate();
    transformed.dot(Vector3::from(LIGHT_DIRECTION)) * 0.5 + 0.5
}
