//! Rain Renderer - GPU rendering of the digital rain effect
//!
//! One pipeline, one draw: a textured quad whose fragment shader combines
//! a scrambling glyph atlas lookup with falling streaks. The CPU twin of the
//! shader lives in `rain-core`; this crate only moves data to the GPU.

pub mod pipeline;
pub mod shaders;
pub mod texture;
pub mod uniforms;

pub use pipeline::{RainPipeline, vertex_buffer_layouts};
pub use texture::{
    AtlasImage, GlyphTexture, TextureError, glyph_sampler_descriptor, glyph_texture_descriptor,
};
pub use uniforms::RainUniforms;
