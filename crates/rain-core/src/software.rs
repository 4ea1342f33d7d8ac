//! Software rasterizer for the rain quad
//!
//! Renders a frame entirely on the CPU through the reference shader. Used by
//! the snapshot tool and by tests; the GPU path never goes through here.

use crate::atlas::AtlasSampler;
use crate::geometry::{MeshPlacement, QuadGeometry};
use crate::math::Vec4;
use crate::params::RainMaterial;
use crate::shader::shade;

/// Color of pixels the quad does not cover
pub const CLEAR_COLOR: Vec4 = [0.0, 0.0, 0.0, 1.0];

/// A rendered frame, row-major from the top-left pixel
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Quantize to RGBA8 rows, ready for an image encoder
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }
}

/// CPU renderer for a fixed surface size
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    placement: MeshPlacement,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32, placement: MeshPlacement) -> Self {
        Self {
            width,
            height,
            placement,
        }
    }

    /// Render one frame at the material's current time
    pub fn render<S: AtlasSampler + ?Sized>(&self, material: &RainMaterial, atlas: &S) -> Frame {
        let count = self.width as usize * self.height as usize;
        let mut pixels = Vec::with_capacity(count);

        let local_transform = self.placement.local_transform();
        let Some(to_local) = local_transform.inverse_affine() else {
            log::warn!("Degenerate quad placement {:?}, frame left clear", self.placement);
            pixels.resize(count, CLEAR_COLOR);
            return Frame {
                width: self.width,
                height: self.height,
                pixels,
            };
        };

        let scale = material.params().scale;
        for y in 0..self.height {
            for x in 0..self.width {
                // Sample at the pixel center
                let local = to_local.transform_point([x as f32 + 0.5, y as f32 + 0.5]);
                if !QuadGeometry::contains(local) {
                    pixels.push(CLEAR_COLOR);
                    continue;
                }

                let tex_coord = QuadGeometry::tex_coord_at(local);
                let uv = [tex_coord[0] * scale, tex_coord[1] * scale];
                pixels.push(shade(uv, material, atlas));
            }
        }

        Frame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::GlyphAtlas;
    use crate::params::RainParams;

    fn atlas(value: u8) -> GlyphAtlas {
        GlyphAtlas::from_red(256, 128, vec![value; 256 * 128]).unwrap()
    }

    #[test]
    fn test_quad_leaves_border_clear() {
        // 100 px quad centered on a 200x200 surface
        let placement = MeshPlacement {
            position: [100.0, 100.0],
            scale: 50.0,
        };
        let renderer = SoftwareRenderer::new(200, 200, placement);
        let material = RainMaterial::new(RainParams::default());
        let frame = renderer.render(&material, &atlas(0));

        assert_eq!(frame.pixel(0, 0), CLEAR_COLOR);
        assert_eq!(frame.pixel(199, 199), CLEAR_COLOR);
        assert_eq!(frame.pixel(40, 100), CLEAR_COLOR);
        // Glyph-free atlas: covered pixels are pure background
        assert_eq!(frame.pixel(100, 100), material.params().background_color);
        assert_eq!(frame.pixel(51, 51), material.params().background_color);
    }

    #[test]
    fn test_centered_placement_covers_surface() {
        let placement = MeshPlacement::centered(64.0, 32.0, 10.0);
        let renderer = SoftwareRenderer::new(64, 32, placement);
        let material = RainMaterial::new(RainParams::default());
        let frame = renderer.render(&material, &atlas(0));

        assert!(frame.pixels().iter().all(|px| *px == material.params().background_color));
    }

    #[test]
    fn test_pixels_shaded_at_vertex_stage_uv() {
        let placement = MeshPlacement {
            position: [40.0, 40.0],
            scale: 40.0,
        };
        let renderer = SoftwareRenderer::new(80, 80, placement);
        let params = RainParams::default().with_trail(3.0).with_speed(0.5);
        let mut material = RainMaterial::new(params);
        material.set_time(1.75);

        let striped: Vec<u8> = (0..256 * 128).map(|i| if i % 3 == 0 { 255 } else { 0 }).collect();
        let atlas = GlyphAtlas::from_red(256, 128, striped).unwrap();
        let frame = renderer.render(&material, &atlas);

        let to_local = placement.local_transform().inverse_affine().unwrap();
        let clip = placement.clip_transform(80.0, 80.0);
        for (x, y) in [(0, 0), (13, 57), (40, 40), (79, 21)] {
            let local = to_local.transform_point([x as f32 + 0.5, y as f32 + 0.5]);
            let tex_coord = QuadGeometry::tex_coord_at(local);
            let out = crate::shader::vertex(local, tex_coord, &clip, material.params().scale);
            assert_eq!(frame.pixel(x, y), shade(out.uv, &material, &atlas));
        }
    }

    #[test]
    fn test_frame_colors_bounded() {
        let placement = MeshPlacement::centered(48.0, 48.0, 200.0);
        let renderer = SoftwareRenderer::new(48, 48, placement);
        let mut material = RainMaterial::new(RainParams::default());
        material.set_time(3.25);
        let frame = renderer.render(&material, &atlas(255));

        let p = material.params();
        for px in frame.pixels() {
            for i in 0..4 {
                let lo = p.background_color[i].min(p.rain_color[i]);
                let hi = p.background_color[i].max(p.rain_color[i]);
                assert!(px[i] >= lo - 1e-6 && px[i] <= hi + 1e-6);
            }
        }
    }

    #[test]
    fn test_degenerate_placement_is_clear() {
        let placement = MeshPlacement {
            position: [2.0, 2.0],
            scale: 0.0,
        };
        let renderer = SoftwareRenderer::new(4, 4, placement);
        let frame = renderer.render(&RainMaterial::new(RainParams::default()), &atlas(255));
        assert_eq!(frame.pixels().len(), 16);
        assert!(frame.pixels().iter().all(|px| *px == CLEAR_COLOR));
    }

    #[test]
    fn test_to_rgba8() {
        let placement = MeshPlacement {
            position: [1.0, 1.0],
            scale: 0.0,
        };
        let frame = SoftwareRenderer::new(2, 1, placement)
            .render(&RainMaterial::new(RainParams::default()), &atlas(0));
        assert_eq!(frame.to_rgba8(), vec![0, 0, 0, 255, 0, 0, 0, 255]);
    }
}
