//! Effect parameters and the per-frame material
//!
//! `RainParams` holds everything fixed at startup. `RainMaterial` pairs those
//! with the one value that changes every frame, the elapsed time.

use rand::Rng;

use crate::math::{Vec2, Vec4};

/// Logical size of the glyph atlas in texels
pub const DEFAULT_TEXTURE_SIZE: Vec2 = [256.0, 128.0];

/// Near-white green used for the glyph heads
pub const DEFAULT_RAIN_COLOR: Vec4 = [0.95, 1.0, 0.95, 1.0];

/// Dark green behind the glyphs
pub const DEFAULT_BACKGROUND_COLOR: Vec4 = [0.0, 0.25, 0.05, 1.0];

/// Texture-coordinate multiplier applied in the vertex stage
pub const DEFAULT_SCALE: f32 = 2.0;

/// Trail divisor is drawn from `TRAIL_MIN + TRAIL_SPAN * r`
pub const TRAIL_MIN: f32 = 3.0;
pub const TRAIL_SPAN: f32 = 4.0;

/// Fall speed is drawn from `SPEED_MIN + SPEED_SPAN * r`
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_SPAN: f32 = 1.0;

/// Immutable shader inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainParams {
    /// Atlas size in texels, used to convert between uv and texel space
    pub texture_size: Vec2,
    /// Color at full rain intensity
    pub rain_color: Vec4,
    /// Color at zero rain intensity
    pub background_color: Vec4,
    /// Texture-coordinate scale (how many atlas repeats span the quad)
    pub scale: f32,
    /// Trail-length divisor; larger values give shorter trails
    pub trail: f32,
    /// Fall-speed multiplier in uv units per second
    pub speed: f32,
}

impl RainParams {
    /// Parameters with the trail and speed drawn from `rng`.
    ///
    /// The random source is injected so a seeded generator reproduces the
    /// same effect run after run.
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let trail_r: f32 = rng.gen_range(0.0..1.0);
        let speed_r: f32 = rng.gen_range(0.0..1.0);

        Self {
            trail: TRAIL_MIN + TRAIL_SPAN * trail_r,
            speed: SPEED_MIN + SPEED_SPAN * speed_r,
            ..Self::default()
        }
    }

    pub fn with_trail(mut self, trail: f32) -> Self {
        self.trail = trail;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

impl Default for RainParams {
    /// Midpoints of the randomized ranges
    fn default() -> Self {
        Self {
            texture_size: DEFAULT_TEXTURE_SIZE,
            rain_color: DEFAULT_RAIN_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            scale: DEFAULT_SCALE,
            trail: TRAIL_MIN + TRAIL_SPAN * 0.5,
            speed: SPEED_MIN + SPEED_SPAN * 0.5,
        }
    }
}

/// Parameters plus the elapsed time, the full uniform set for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainMaterial {
    params: RainParams,
    time: f32,
}

impl RainMaterial {
    pub fn new(params: RainParams) -> Self {
        Self { params, time: 0.0 }
    }

    pub fn params(&self) -> &RainParams {
        &self.params
    }

    /// Elapsed time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Write the per-frame time uniform
    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }
}
