use std::path::Path;

use anyhow::Context as _;

/// Bind group layout for a material: a filterable 2D texture at binding 0 and
/// its sampler at binding 1, both visible to the fragment stage.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Model texture_bind_group_layout"),
    })
}

/// Loads an image file as an RGB atlas.
///
/// Image files store the top row first while textures are uploaded bottom
/// row first, so the image is flipped vertically after decoding.
pub fn load_atlas(path: &Path) -> anyhow::Result<image::RgbImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load atlas image {}", path.display()))?;
    let mut rgb = img.to_rgb8();
    image::imageops::flip_vertical_in_place(&mut rgb);
    log::info!(
        "Loaded atlas {} ({}x{})",
        path.display(),
        rgb.width(),
        rgb.height()
    );
    Ok(rgb)
}
