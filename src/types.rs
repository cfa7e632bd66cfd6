//! Plain-old-data structs shared with the WGSL shaders.
//!
//! Every struct is `#[repr(C)]` and padded to WGSL uniform alignment by hand,
//! so the field order here must match `scene.wgsl` / `shadow.wgsl` / `lines.wgsl`.

/// Mesh vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Debug line vertex for shadow frustum helpers
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub time: f32,
}

/// Per-object data: transforms plus the material parameters read this frame
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub env_intensity: f32,
    pub receive_shadow: f32,
    pub _pad: f32,
}

/// Light data for one light, packed for the fragment shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position: [f32; 3],
    pub intensity: f32,
    pub direction: [f32; 3],
    pub range: f32,
    pub color: [f32; 3],
    pub cos_cone: f32,
    /// First layer in the shadow texture array, -1 when the light casts no shadow
    pub shadow_layer: i32,
    pub shadow_near: f32,
    pub shadow_far: f32,
    pub shadow_texel: f32,
}

pub const MAX_SHADOW_VIEWS: usize = 8;

/// Every light in the rig plus the view-projection of each shadow layer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient: [f32; 3],
    pub ambient_intensity: f32,
    pub directional: GpuLight,
    pub spot: GpuLight,
    pub point: GpuLight,
    pub shadow_view_proj: [[[f32; 4]; 4]; MAX_SHADOW_VIEWS],
}

/// View-projection for a single depth-only shadow pass
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowViewUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    // WGSL uniform structs are laid out in 16-byte rows
    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(size_of::<CameraUniform>() % 16, 0);
        assert_eq!(size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(size_of::<GpuLight>() % 16, 0);
        assert_eq!(size_of::<LightsUniform>() % 16, 0);
        assert_eq!(size_of::<ShadowViewUniform>(), 64);
    }

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(size_of::<Vertex>(), 24);
        assert_eq!(size_of::<LineVertex>(), 24);
    }
}
