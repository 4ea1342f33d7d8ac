//! CPU reference of the rain shader
//!
//! Every function here has a line-for-line counterpart in `rain.wgsl`. They
//! are pure functions of the texture coordinate and the material, so any
//! pixel can be evaluated independently of every other.

use crate::atlas::AtlasSampler;
use crate::geometry::Mat3;
use crate::math::{Vec2, Vec4, div2, dot2, floor_mod, fract, mix4, mul2};
use crate::params::{RainMaterial, RainParams};

/// Glyph cell size in texels
pub const TILE_SIZE: f32 = 16.0;

const HASH_DIRECTION: Vec2 = [12.9898, 78.233];
const HASH_SCALE: f32 = 43758.5453123;

/// Glyph columns cycled per second, in tiles
const GLYPH_CYCLE_RATE: f32 = 0.1;

/// Frequency of the per-column phase offset
const COLUMN_PHASE_FREQUENCY: f32 = 10.0;

/// Scalar pseudo-random value in `[0, 1)` from a 2D seed
pub fn hash(seed: Vec2) -> f32 {
    fract(dot2(seed, HASH_DIRECTION).sin() * HASH_SCALE)
}

/// Intermediate coordinates of the glyph lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCoords {
    /// Origin of the tile containing the pixel, in tile-scaled units
    pub block: Vec2,
    /// Offset within the tile, in tile-scaled units
    pub local: Vec2,
    /// Final atlas coordinate handed to the sampler
    pub glyph_uv: Vec2,
}

/// Work out which atlas texel the glyph mask reads for `uv`.
///
/// Each tile picks a random starting column from its block hash and scrolls
/// through the atlas as time advances, so glyphs scramble in place.
pub fn text_coords(uv: Vec2, params: &RainParams, time: f32) -> TextCoords {
    let size = params.texture_size;
    let dim = div2([TILE_SIZE, TILE_SIZE], size);

    let frag = mul2(uv, size);
    let local = [
        floor_mod(frag[0], TILE_SIZE) * dim[0],
        floor_mod(frag[1], TILE_SIZE) * dim[1],
    ];
    let block = [frag[0] * dim[0] - local[0], frag[1] * dim[1] - local[1]];

    let cycle = ((hash(div2(block, size)) + time * GLYPH_CYCLE_RATE) * TILE_SIZE).floor();
    let glyph_uv = [(local[0] + cycle) * dim[0], (local[1] + cycle) * dim[1]];

    TextCoords {
        block,
        local,
        glyph_uv,
    }
}

/// Glyph mask at `uv`, the atlas red channel in `[0, 1]`
pub fn text<S: AtlasSampler + ?Sized>(uv: Vec2, params: &RainParams, time: f32, atlas: &S) -> f32 {
    atlas.sample_red(text_coords(uv, params, time).glyph_uv)
}

/// Position of `uv` within its column's falling streak, in `[0, 1)`.
///
/// Zero is the streak head; the value grows along the trail. Pixels are
/// grouped into 16-texel columns which share one phase offset.
pub fn streak_phase(uv: Vec2, params: &RainParams, time: f32) -> f32 {
    let frag_x = uv[0] * params.texture_size[0];
    let column_x = frag_x - floor_mod(frag_x, TILE_SIZE);

    let offset = (column_x * COLUMN_PHASE_FREQUENCY).sin();
    fract(-uv[1] + offset + params.speed * time)
}

/// Streak brightness at `uv`, in `[0, 1]`
pub fn rain(uv: Vec2, params: &RainParams, time: f32) -> f32 {
    let y = streak_phase(uv, params, time);
    let trail_factor = 1.0 / (y * params.trail);

    // max/min rather than clamp: a NaN factor lands on 0
    trail_factor.max(0.0).min(1.0)
}

/// Fragment stage: final color of the pixel at `uv`
pub fn shade<S: AtlasSampler + ?Sized>(uv: Vec2, material: &RainMaterial, atlas: &S) -> Vec4 {
    let params = material.params();
    let time = material.time();

    let rain_factor = rain(uv, params, time);
    let text_factor = text(uv, params, time, atlas);

    mix4(params.background_color, params.rain_color, rain_factor * text_factor)
}

/// Output of the vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip_position: [f32; 4],
    pub uv: Vec2,
}

/// Vertex stage: place a quad corner in clip space and scale its uv
pub fn vertex(position: Vec2, tex_coord: Vec2, transform: &Mat3, scale: f32) -> VertexOutput {
    let [x, y] = transform.transform_point(position);
    VertexOutput {
        clip_position: [x, y, 0.0, 1.0],
        uv: [tex_coord[0] * scale, tex_coord[1] * scale],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::GlyphAtlas;
    use crate::geometry::MeshPlacement;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn params(trail: f32, speed: f32) -> RainParams {
        RainParams::default().with_trail(trail).with_speed(speed)
    }

    fn solid_atlas(value: u8) -> GlyphAtlas {
        GlyphAtlas::from_red(256, 128, vec![value; 256 * 128]).unwrap()
    }

    #[test]
    fn test_hash_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let seed = [rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)];
            assert_eq!(hash(seed).to_bits(), hash(seed).to_bits());
        }
    }

    #[test]
    fn test_hash_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100_000 {
            let seed = [rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)];
            let h = hash(seed);
            assert!((0.0..1.0).contains(&h), "hash({:?}) = {}", seed, h);
        }
    }

    #[test]
    fn test_hash_origin() {
        // sin(0) * k = 0
        assert_eq!(hash([0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_hash_varies() {
        assert_ne!(hash([0.0625, 0.0]), hash([0.125, 0.0]));
    }

    #[test]
    fn test_rain_clamped() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50_000 {
            let uv = [rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0)];
            let p = params(rng.gen_range(0.0..10.0), rng.gen_range(-2.0..2.0));
            let time = rng.gen_range(0.0..10_000.0);
            let r = rain(uv, &p, time);
            assert!((0.0..=1.0).contains(&r), "rain {:?} {:?} t={} = {}", uv, p, time, r);
        }
    }

    #[test]
    fn test_rain_degenerate_trail() {
        assert_eq!(rain([0.3, 0.3], &params(f32::NAN, 1.0), 1.0), 0.0);
        assert_eq!(rain([0.3, 0.3], &params(-2.0, 1.0), 1.0), 0.0);
        assert_eq!(rain([0.3, 0.3], &params(0.0, 1.0), 1.0), 1.0);
    }

    #[test]
    fn test_rain_tail_just_above_head() {
        let p = params(3.0, 0.5);

        // Phase just below 1 is the dim end of the trail, not a new head
        let near = rain([0.0, 1.0e-9], &p, 0.0);
        let farther = rain([0.0, 1.0e-6], &p, 0.0);
        assert!((near - 1.0 / 3.0).abs() < 1e-5, "rain = {}", near);
        assert!((near - farther).abs() < 1e-5);
    }

    #[test]
    fn test_rain_periodic() {
        let p = params(3.0, 0.5);
        let mut rng = StdRng::seed_from_u64(9);
        let mut checked = 0;

        for _ in 0..2000 {
            let uv = [rng.gen_range(0.0..2.0), rng.gen_range(0.0..2.0)];
            let time = rng.gen_range(0.0..20.0);

            // Skip samples sitting on the wrap, where rounding may flip sides
            let y = streak_phase(uv, &p, time);
            if y.min(1.0 - y) < 0.05 {
                continue;
            }

            let base = rain(uv, &p, time);
            let shifted_time = rain(uv, &p, time + 1.0 / p.speed);
            let shifted_uv = rain([uv[0], uv[1] + 1.0], &p, time);
            assert!((base - shifted_time).abs() < 1e-3, "time shift at {:?} t={}", uv, time);
            assert!((base - shifted_uv).abs() < 1e-3, "uv shift at {:?} t={}", uv, time);
            checked += 1;
        }

        assert!(checked > 1000);
    }

    #[test]
    fn test_rain_column_shares_phase() {
        let p = params(3.0, 0.5);
        // Texels 32..48 form one column
        let a = streak_phase([32.0 / 256.0, 0.4], &p, 2.0);
        let b = streak_phase([47.0 / 256.0, 0.4], &p, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_block_advances_one_tile() {
        let p = RainParams::default();
        let step = TILE_SIZE / p.texture_size[0];

        let a = text_coords([0.125, 0.25], &p, 0.0);
        let b = text_coords([0.125 + step, 0.25], &p, 0.0);

        let tile_step = TILE_SIZE * (TILE_SIZE / p.texture_size[0]);
        assert_eq!(b.block[0] - a.block[0], tile_step);
        assert_eq!(b.block[1], a.block[1]);
        assert_eq!(a.local, b.local);
    }

    #[test]
    fn test_text_within_tile_shares_block() {
        let p = RainParams::default();
        let a = text_coords([16.0 / 256.0, 0.0], &p, 0.0);
        let b = text_coords([31.0 / 256.0, 15.0 / 128.0], &p, 0.0);
        assert_eq!(a.block, b.block);
        assert_ne!(a.local, b.local);
    }

    #[test]
    fn test_text_range() {
        let atlas = GlyphAtlas::from_red(
            256,
            128,
            (0..256 * 128).map(|i| (i % 251) as u8).collect(),
        )
        .unwrap();
        let p = RainParams::default();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10_000 {
            let uv = [rng.gen_range(0.0..2.0), rng.gen_range(0.0..2.0)];
            let t = text(uv, &p, rng.gen_range(0.0..100.0), &atlas);
            assert!((0.0..=1.0).contains(&t));
        }
    }

    #[test]
    fn test_origin_scenario() {
        let p = params(3.0, 0.5);
        let coords = text_coords([0.0, 0.0], &p, 0.0);
        assert_eq!(coords.block, [0.0, 0.0]);
        assert_eq!(coords.local, [0.0, 0.0]);

        // clamp(1 / (fract(sin(0) + 0) * 3), 0, 1) = clamp(inf, 0, 1)
        let expected = (1.0f32 / (fract(0.0f32.sin() + 0.0) * 3.0)).clamp(0.0, 1.0);
        assert_eq!(expected, 1.0);
        assert_eq!(rain([0.0, 0.0], &p, 0.0), expected);
    }

    #[test]
    fn test_shade_background_when_no_glyph() {
        let mut material = RainMaterial::new(params(3.0, 0.5));
        material.set_time(0.0);
        let atlas = solid_atlas(0);
        assert_eq!(shade([0.0, 0.0], &material, &atlas), material.params().background_color);
    }

    #[test]
    fn test_shade_rain_color_at_full_intensity() {
        let material = RainMaterial::new(params(3.0, 0.5));
        let atlas = solid_atlas(255);
        assert_eq!(shade([0.0, 0.0], &material, &atlas), material.params().rain_color);
    }

    #[test]
    fn test_shade_between_colors() {
        let material = RainMaterial::new(params(3.0, 0.5));
        let atlas = solid_atlas(255);
        let p = material.params();
        let color = shade([0.3, 0.7], &material, &atlas);
        for i in 0..4 {
            let lo = p.background_color[i].min(p.rain_color[i]);
            let hi = p.background_color[i].max(p.rain_color[i]);
            assert!(color[i] >= lo - 1e-6 && color[i] <= hi + 1e-6);
        }
    }

    #[test]
    fn test_vertex_stage() {
        let placement = MeshPlacement::centered(512.0, 256.0, 200.0);
        let transform = placement.clip_transform(512.0, 256.0);

        let out = vertex([0.0, 0.0], [0.5, 0.5], &transform, 2.0);
        assert_eq!(out.clip_position, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(out.uv, [1.0, 1.0]);

        let out = vertex([1.0, 1.0], [1.0, 1.0], &transform, 2.0);
        assert_eq!(out.clip_position, [1.0, -2.0, 0.0, 1.0]);
        assert_eq!(out.uv, [2.0, 2.0]);
    }
}
