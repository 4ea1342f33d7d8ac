//! Uniform block shared by both shader stages

use bytemuck::{Pod, Zeroable};
use rain_core::{Mat3, RainMaterial};

/// Mirrors `struct Uniforms` in `rain.wgsl`, 112 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RainUniforms {
    /// `mat3x3<f32>` columns, each padded to 16 bytes
    pub transform: [[f32; 4]; 3],
    pub background_color: [f32; 4],
    pub rain_color: [f32; 4],
    pub texture_size: [f32; 2],
    pub time: f32,
    pub scale: f32,
    pub trail: f32,
    pub speed: f32,
    pub _pad: [f32; 2],
}

impl RainUniforms {
    pub fn new(material: &RainMaterial, transform: &Mat3) -> Self {
        let params = material.params();
        Self {
            transform: transform.to_padded_cols(),
            background_color: params.background_color,
            rain_color: params.rain_color,
            texture_size: params.texture_size,
            time: material.time(),
            scale: params.scale,
            trail: params.trail,
            speed: params.speed,
            _pad: [0.0; 2],
        }
    }
}
