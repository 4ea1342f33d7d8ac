//! Common test utilities and harness
//!
//! Provides an isolated directory with a generated glyph atlas and a helper
//! for rendering frames through the CPU pipeline.

use std::path::PathBuf;

use rain_config::Config;
use rain_core::{Frame, GlyphAtlas, MeshPlacement, RainMaterial, SoftwareRenderer};
use rain_renderer::AtlasImage;
use tempfile::TempDir;

/// Atlas dimensions used by the shader defaults
pub const ATLAS_WIDTH: u32 = 256;
pub const ATLAS_HEIGHT: u32 = 128;

/// Test environment with an atlas image on disk
pub struct TestEnvironment {
    /// Temporary directory holding test files
    pub temp_dir: TempDir,
    /// Path to the written atlas PNG
    pub atlas_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new environment with a striped 256x128 atlas.
    ///
    /// Every other texel column is lit, so any 16x16 tile contains both lit
    /// and dark texels.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let atlas_path = temp_dir.path().join("captureFont.png");

        let img = image::RgbaImage::from_fn(ATLAS_WIDTH, ATLAS_HEIGHT, |x, _| {
            let v = if x % 2 == 0 { 255 } else { 0 };
            image::Rgba([v, v, v, 255])
        });
        img.save(&atlas_path).expect("Failed to write test atlas");

        Self {
            temp_dir,
            atlas_path,
        }
    }

    /// Write a config file and return its path
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join("config.toml");
        std::fs::write(&path, content).expect("Failed to write test config");
        path
    }

    /// Decode the atlas the way the app does
    pub fn load_atlas(&self) -> GlyphAtlas {
        AtlasImage::from_path(&self.atlas_path)
            .expect("Atlas should load")
            .to_glyph_atlas()
            .expect("Atlas should convert")
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a frame at `time` with parameters from `config`
pub fn render(config: &Config, atlas: &GlyphAtlas, width: u32, height: u32, time: f32) -> Frame {
    let mut material = RainMaterial::new(config.rain_params());
    material.set_time(time);
    let placement = MeshPlacement::centered(width as f32, height as f32, config.effect.quad_scale);
    SoftwareRenderer::new(width, height, placement).render(&material, atlas)
}
