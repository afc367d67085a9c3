//! Camera, perspective projection and the per-model shader uniform.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Matrix4, Point3, Rad, SquareMatrix};

use crate::transform::{self, Transform};

/// Maps OpenGL clip-space depth (`-1..1`) onto the `0..1` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A first-person camera: a transform without a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub transform: Transform,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            transform: Transform {
                position,
                ..Default::default()
            },
        }
    }

    /// Applies a pointer delta. Pitch is clamped to straight up/down.
    pub fn look(&mut self, dx: f64, dy: f64, sensitivity: f32) {
        let pitch = self.transform.pitch.0 + dy as f32 * sensitivity;
        self.transform.pitch = Rad(pitch.clamp(-FRAC_PI_2, FRAC_PI_2));
        self.transform.yaw += Rad(dx as f32 * sensitivity);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.transform.view_matrix()
    }
}

/// Symmetric perspective projection.
///
/// The matrix is regenerated on every [`resize`](Self::resize) rather than
/// patched.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
    matrix: Matrix4<f32>,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let mut projection = Self {
            aspect: 1.0,
            fovy: fovy.into(),
            znear,
            zfar,
            matrix: Matrix4::identity(),
        };
        projection.resize(width, height);
        projection
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
        self.matrix = self.calc_matrix();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// The OpenGL-style projection matrix (depth in `-1..1`).
    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    #[rustfmt::skip]
    fn calc_matrix(&self) -> Matrix4<f32> {
        let (near, far) = (self.znear, self.zfar);
        // half height and half width of the near plane
        let top = near * (self.fovy.0 / 2.0).tan();
        let right = top * self.aspect;
        Matrix4::new(
            near / right, 0.0,        0.0,                                0.0,
            0.0,          near / top, 0.0,                                0.0,
            0.0,          0.0,        -(far + near) / (far - near),      -1.0,
            0.0,          0.0,        -(2.0 * far * near) / (far - near), 0.0,
        )
    }
}

/// Per-model shader uniform: the combined position matrix and the normal
/// matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub position_matrix: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new() -> Self {
        Self {
            position_matrix: Matrix4::identity().into(),
            normal_matrix: Matrix4::identity().into(),
        }
    }

    pub fn update(&mut self, projection: &Projection, camera: &Camera, model: &Transform) {
        let position = transform::position_matrix(&projection.matrix(), &camera.transform, model);
        self.position_matrix = (OPENGL_TO_WGPU_MATRIX * position).into();
        self.normal_matrix = model.normal_matrix().into();
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::new()
    }
}
