use log::{debug, info};

use crate::loaders::{EnvironmentMap, FACE_NAMES};

/// Cube texture sampled for reflections
pub struct EnvironmentTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl EnvironmentTexture {
    /// Upload `env_map`, or a 1x1 black cube when the scene has none
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        env_map: Option<&EnvironmentMap>,
    ) -> Self {
        let size = env_map.map_or(1, EnvironmentMap::size);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Environment Cube"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: FACE_NAMES.len() as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let black = [0u8, 0, 0, 255];
        for layer in 0..FACE_NAMES.len() {
            let pixels: &[u8] = match env_map {
                Some(map) => map.faces()[layer].as_raw(),
                None => &black,
            };
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * size),
                    rows_per_image: Some(size),
                },
                wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
            );
        }

        match env_map {
            Some(_) => info!("Uploaded {}px environment cube", size),
            None => debug!("No environment map, reflections disabled"),
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Environment Cube View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Environment Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { view, sampler }
    }
}
