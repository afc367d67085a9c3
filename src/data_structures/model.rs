//! Meshes, materials and renderable models.
//!
//! A [`Mesh`] is plain CPU data produced by the chunk mesher or the built-in
//! assets. Uploading it yields a [`GpuMesh`]; combining that with a
//! [`Material`], a [`Transform`] and a uniform buffer yields a [`Model`]
//! that can be drawn through [`DrawModel`].

use wgpu::util::DeviceExt;

use crate::{
    camera::{Camera, ModelUniform},
    context::Context,
    data_structures::texture::Texture,
    transform::Transform,
};

/// Anything that can describe its own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One vertex: position, normal and atlas coordinates, 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl ModelVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }
}

/**
 * Stride layout: position (vec3), normal (vec3), tex coords (vec2).
 *
 * The shader locations must match `VertexInput` in `voxel_shader.wgsl`.
 */
impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Non-indexed triangle list, six vertices per quad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<ModelVertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, vertex: ModelVertex) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[ModelVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The raw bytes in GPU vertex buffer layout.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl From<Vec<ModelVertex>> for Mesh {
    fn from(vertices: Vec<ModelVertex>) -> Self {
        Self { vertices }
    }
}

/// A mesh living in GPU memory.
///
/// Empty meshes are kept without a buffer, since wgpu rejects zero-sized
/// vertex buffers.
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, mesh: &Mesh, name: &str) -> Self {
        let vertex_buffer = (!mesh.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Vertex Buffer", name)),
                contents: mesh.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            vertex_count: mesh.vertex_count(),
        }
    }
}

/// A texture together with the bind group that exposes it to the shader.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        texture: Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some(name),
        });

        Self {
            name: name.to_string(),
            texture,
            bind_group,
        }
    }
}

/// A drawable object: geometry, texture, pose and its own uniform buffer.
#[derive(Debug)]
pub struct Model {
    pub name: String,
    pub transform: Transform,
    pub mesh: GpuMesh,
    pub material: Material,
    uniform: ModelUniform,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl Model {
    pub fn new(ctx: &Context, name: &str, mesh: &Mesh, texture: Texture) -> Self {
        let device = &ctx.device;
        let uniform = ModelUniform::new();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &ctx.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(&format!("{name} uniform_bind_group")),
        });

        Self {
            name: name.to_string(),
            transform: Transform::default(),
            mesh: ctx.upload_mesh(mesh, name),
            material: Material::new(device, name, texture, &ctx.texture_layout),
            uniform,
            uniform_buffer,
            uniform_bind_group,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Swaps in freshly generated geometry, e.g. after a remesh.
    pub fn replace_mesh(&mut self, ctx: &Context, mesh: &Mesh) {
        self.mesh = ctx.upload_mesh(mesh, &self.name);
    }

    /// Recomputes the position and normal matrices and writes them to the GPU.
    pub fn write_uniform(&mut self, ctx: &Context, camera: &Camera) {
        self.uniform.update(&ctx.projection, camera, &self.transform);
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub trait DrawModel {
    fn draw_mesh(
        &mut self,
        mesh: &GpuMesh,
        material: &Material,
        uniforms: &wgpu::BindGroup,
    );
    fn draw_model(&mut self, model: &Model);
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_mesh(
        &mut self,
        mesh: &GpuMesh,
        material: &Material,
        uniforms: &wgpu::BindGroup,
    ) {
        let Some(buffer) = &mesh.vertex_buffer else {
            log::trace!("Skipping draw of {:?}: mesh has no vertices", mesh.name);
            return;
        };
        self.set_vertex_buffer(0, buffer.slice(..));
        self.set_bind_group(0, &material.bind_group, &[]);
        self.set_bind_group(1, uniforms, &[]);
        self.draw(0..mesh.vertex_count, 0..1);
    }

    fn draw_model(&mut self, model: &Model) {
        self.draw_mesh(&model.mesh, &model.material, &model.uniform_bind_group);
    }
}
