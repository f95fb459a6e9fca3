//! Buffer/vertex types shared across pipelines.
//!
//! All types here are `#[repr(C)]` and `bytemuck`-safe so they can be uploaded to GPU buffers
//! without extra copies. Uniform structs pad to 16-byte boundaries to satisfy std140 layout.

use bytemuck::{Pod, Zeroable};

/// Maximum lights the shader's fixed-size array holds. The full rig
/// (startup + model supplement) is seven lights.
pub const MAX_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    /// Camera basis for billboarding, xyz + pad.
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
    pub cam_pos: [f32; 4],
    /// x = seconds since start; rest padding.
    pub time_pad: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    /// rgb albedo + emissive strength in w.
    pub color_emissive: [f32; 4],
}

/// One light in the rig. `pos_kind.w` selects the kind: 0 ambient,
/// 1 directional, 2 point. Directionals store the normalized direction
/// toward the light in `dir_range.xyz`; points store their range in
/// `dir_range.w`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightRaw {
    pub pos_kind: [f32; 4],
    pub color_intensity: [f32; 4],
    pub dir_range: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightsUniform {
    /// x = active light count.
    pub count_pad: [f32; 4],
    pub lights: [LightRaw; MAX_LIGHTS],
}

/// Environment contribution. `ambient.rgb` is the panorama's average
/// radiance (zero until it loads); `ambient.w` is 1 once the texture is
/// resident so the shader switches from the gradient background.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct EnvParams {
    pub ambient: [f32; 4],
}

/// Flicker state for the particle material: x = world-space point size
/// (already aspect-scaled), y = opacity, rest padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleMaterial {
    pub size_opacity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
}

/// Unit-quad corner for the particle billboard, in [-0.5, 0.5].
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleVertex {
    pub corner: [f32; 2],
}

impl ParticleVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
    };
}

/// Per-point instance data, interleaved from the field's flat buffers at
/// upload time.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

impl ParticleInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32x3],
    };
}
