//! CPU-side glyph atlas
//!
//! Keeps the red channel of the atlas and samples it the way the GPU sampler
//! is configured: repeat wrapping, nearest filtering, no mipmaps.

use thiserror::Error;

use crate::math::Vec2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AtlasError {
    #[error("atlas has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("expected {expected} bytes of RGBA data for {width}x{height}, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Anything the fragment stage can read glyph intensity from
pub trait AtlasSampler {
    /// Red channel at `uv`, normalized to `[0, 1]`
    fn sample_red(&self, uv: Vec2) -> f32;
}

/// Red channel of a glyph atlas image
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    width: u32,
    height: u32,
    red: Vec<u8>,
}

impl GlyphAtlas {
    /// Build from tightly packed RGBA8 rows
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, AtlasError> {
        if width == 0 || height == 0 {
            return Err(AtlasError::Empty { width, height });
        }

        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AtlasError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        let red = rgba.chunks_exact(4).map(|px| px[0]).collect();
        Ok(Self { width, height, red })
    }

    /// Build from a single-channel buffer, one byte per texel
    pub fn from_red(width: u32, height: u32, red: Vec<u8>) -> Result<Self, AtlasError> {
        if width == 0 || height == 0 {
            return Err(AtlasError::Empty { width, height });
        }

        let expected = width as usize * height as usize;
        if red.len() != expected {
            return Err(AtlasError::SizeMismatch {
                width,
                height,
                expected,
                actual: red.len(),
            });
        }

        Ok(Self { width, height, red })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw red value at integer texel coordinates, wrapping on both axes
    pub fn texel(&self, x: i64, y: i64) -> u8 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.red[y * self.width as usize + x]
    }
}

impl AtlasSampler for GlyphAtlas {
    fn sample_red(&self, uv: Vec2) -> f32 {
        // Nearest: the texel whose cell contains the coordinate
        let x = (uv[0] * self.width as f32).floor() as i64;
        let y = (uv[1] * self.height as f32).floor() as i64;
        self.texel(x, y) as f32 / 255.0
    }
}
