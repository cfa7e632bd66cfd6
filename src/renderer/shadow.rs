use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::lights::{Light, LightKind, LightRig};
use crate::types::{GpuLight, LightsUniform, ShadowViewUniform, MAX_SHADOW_VIEWS};

pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Shadow views of the whole rig, in texture-array layer order
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLayout {
    /// First layer of each light; `None` for lights without a shadow
    pub first_layer: [(LightKind, Option<usize>); 3],
    pub views: Vec<Mat4>,
}

impl ShadowLayout {
    pub fn from_rig(rig: &LightRig) -> Self {
        let mut views = Vec::with_capacity(rig.shadow_view_count());
        let first_layer = LightKind::SHADOW_CASTERS.map(|kind| {
            let matrices = rig.get(kind).shadow_view_projections();
            if matrices.is_empty() {
                return (kind, None);
            }
            let first = views.len();
            views.extend(matrices);
            (kind, Some(first))
        });
        Self { first_layer, views }
    }

    pub fn layer_of(&self, kind: LightKind) -> Option<usize> {
        self.first_layer
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, layer)| *layer)
    }
}

fn pack_light(light: &Light, layer: Option<usize>) -> GpuLight {
    let (near, far, texel) = light
        .shadow()
        .map(|v| (v.near(), v.far(), 1.0 / v.map_size() as f32))
        .unwrap_or((0.0, 0.0, 0.0));
    GpuLight {
        position: light.position.to_array(),
        intensity: light.intensity,
        direction: light.direction().to_array(),
        range: light.range,
        color: light.color,
        cos_cone: if light.kind == LightKind::Spot { light.angle.cos() } else { -1.0 },
        shadow_layer: layer.map_or(-1, |l| l as i32),
        shadow_near: near,
        shadow_far: far,
        shadow_texel: texel,
    }
}

/// Everything the fragment shader needs to light and shadow a surface
pub fn pack_lights(rig: &LightRig, layout: &ShadowLayout) -> LightsUniform {
    let mut shadow_view_proj = [[[0.0; 4]; 4]; MAX_SHADOW_VIEWS];
    for (slot, view) in shadow_view_proj.iter_mut().zip(&layout.views) {
        *slot = view.to_cols_array_2d();
    }
    let ambient = rig.ambient();
    let pack = |kind| pack_light(rig.get(kind), layout.layer_of(kind));
    LightsUniform {
        ambient: ambient.color,
        ambient_intensity: ambient.intensity,
        directional: pack(LightKind::Directional),
        spot: pack(LightKind::Spot),
        point: pack(LightKind::Point),
        shadow_view_proj,
    }
}

/// One depth texture array holding every shadow view, plus a pass binding per layer
pub struct ShadowMaps {
    layer_views: Vec<wgpu::TextureView>,
    array_view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    view_buffers: Vec<wgpu::Buffer>,
    view_bind_groups: Vec<wgpu::BindGroup>,
    view_layout: wgpu::BindGroupLayout,
}

impl ShadowMaps {
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Maps"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: MAX_SHADOW_VIEWS as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let layer_views = (0..MAX_SHADOW_VIEWS as u32)
            .map(|layer| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("Shadow Layer"),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    base_array_layer: layer,
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();

        let array_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Shadow Array"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let view_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_view_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let view_buffers: Vec<_> = (0..MAX_SHADOW_VIEWS)
            .map(|_| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Shadow View Buffer"),
                    contents: bytemuck::cast_slice(&[ShadowViewUniform {
                        view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                    }]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                })
            })
            .collect();

        let view_bind_groups = view_buffers
            .iter()
            .map(|buffer| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("shadow_view_bind_group"),
                    layout: &view_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                })
            })
            .collect();

        Self {
            layer_views,
            array_view,
            sampler,
            view_buffers,
            view_bind_groups,
            view_layout,
        }
    }

    pub fn view_layout(&self) -> &wgpu::BindGroupLayout {
        &self.view_layout
    }

    pub fn array_view(&self) -> &wgpu::TextureView {
        &self.array_view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn layer(&self, index: usize) -> Option<(&wgpu::TextureView, &wgpu::BindGroup)> {
        Some((self.layer_views.get(index)?, self.view_bind_groups.get(index)?))
    }

    /// Upload this frame's light view-projections
    pub fn write_views(&self, queue: &wgpu::Queue, layout: &ShadowLayout) {
        for (buffer, view) in self.view_buffers.iter().zip(&layout.views) {
            queue.write_buffer(
                buffer,
                0,
                bytemuck::cast_slice(&[ShadowViewUniform {
                    view_proj: view.to_cols_array_2d(),
                }]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::DEFAULT_SHADOW_MAP_SIZE;

    fn rig() -> LightRig {
        LightRig::new(DEFAULT_SHADOW_MAP_SIZE).unwrap()
    }

    #[test]
    fn test_layers_are_consecutive() {
        let layout = ShadowLayout::from_rig(&rig());
        assert_eq!(layout.views.len(), MAX_SHADOW_VIEWS);
        assert_eq!(layout.layer_of(LightKind::Directional), Some(0));
        assert_eq!(layout.layer_of(LightKind::Spot), Some(1));
        assert_eq!(layout.layer_of(LightKind::Point), Some(2));
        assert_eq!(layout.layer_of(LightKind::Ambient), None);
    }

    #[test]
    fn test_packed_lights() {
        let rig = rig();
        let layout = ShadowLayout::from_rig(&rig);
        let packed = pack_lights(&rig, &layout);

        assert_eq!(packed.ambient_intensity, 0.3);
        assert_eq!(packed.directional.shadow_layer, 0);
        assert_eq!(packed.point.shadow_layer, 2);
        assert_eq!(packed.directional.cos_cone, -1.0);
        assert!((packed.spot.cos_cone - (std::f32::consts::PI * 0.3).cos()).abs() < 1e-6);
        assert_eq!(packed.spot.range, 10.0);
        assert_eq!(packed.point.shadow_near, 0.1);
        assert_eq!(packed.point.shadow_far, 5.0);
        assert!((packed.spot.shadow_texel - 1.0 / 1024.0).abs() < 1e-9);
        assert_eq!(
            packed.shadow_view_proj[7],
            rig.get(LightKind::Point).shadow_view_projections()[5].to_cols_array_2d()
        );
    }
}
