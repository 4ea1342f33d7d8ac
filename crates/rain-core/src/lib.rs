//! Rain Core - the digital rain effect as plain Rust
//!
//! This crate holds everything about the effect that does not need a GPU:
//! - Startup parameters and the per-frame material
//! - A CPU reference of the shader (`hash`, `text`, `rain`, color mix)
//! - Quad geometry and the transforms that place it on screen
//! - A glyph atlas sampler and a software rasterizer built on the above
//!
//! The GPU renderer mirrors the shader functions in WGSL and feeds them the
//! same `RainMaterial`.

pub mod atlas;
pub mod clock;
pub mod geometry;
pub mod math;
pub mod params;
pub mod shader;
pub mod software;

pub use atlas::{AtlasError, AtlasSampler, GlyphAtlas};
pub use clock::FrameClock;
pub use geometry::{DEFAULT_QUAD_SCALE, Mat3, MeshPlacement, QuadGeometry};
pub use math::{Vec2, Vec4};
pub use params::{RainMaterial, RainParams};
pub use shader::{TILE_SIZE, TextCoords, VertexOutput, hash, rain, shade, text, text_coords, vertex};
pub use software::{CLEAR_COLOR, Frame, SoftwareRenderer};
