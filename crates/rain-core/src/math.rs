//! Scalar and vector helpers with shader-language semantics
//!
//! These mirror the WGSL built-ins used by the rain shader so the CPU
//! reference produces the same numbers as the GPU (up to float precision).

/// 2D vector as stored in vertex and uniform data
pub type Vec2 = [f32; 2];

/// RGBA color as stored in the uniform block
pub type Vec4 = [f32; 4];

/// Largest `f32` below `1.0`
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Fractional part, `x - floor(x)`, kept in `[0, 1)`.
///
/// For tiny negative `x` the subtraction rounds up to exactly `1.0`; that
/// case stays at the top of the period, just below `1.0`. Non-finite
/// input yields `0.0`.
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    if f.is_nan() { 0.0 } else { f.min(BELOW_ONE) }
}

/// Floored modulo, `x - y * floor(x / y)`.
///
/// Unlike `%` the result takes the sign of `y`, which is what the shader's
/// tiling math expects for coordinates left of or above the origin.
#[inline]
pub fn floor_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Linear blend `a * (1 - t) + b * t`.
///
/// Written in this form so `t == 0` returns `a` and `t == 1` returns `b`
/// exactly.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Component-wise [`mix`] over an RGBA color
#[inline]
pub fn mix4(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    [
        mix(a[0], b[0], t),
        mix(a[1], b[1], t),
        mix(a[2], b[2], t),
        mix(a[3], b[3], t),
    ]
}

#[inline]
pub fn dot2(a: Vec2, b: Vec2) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
pub fn mul2(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] * b[0], a[1] * b[1]]
}

#[inline]
pub fn div2(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] / b[0], a[1] / b[1]]
}
