//! Quad geometry and 2D transforms
//!
//! The effect draws a single two-triangle quad. Its local space spans
//! `[-1, 1]` on both axes; a 3x3 affine matrix places it in pixel space and
//! a projection maps pixels (y down) to clip space.

use crate::math::Vec2;

/// Default uniform scale of the quad in pixels per local unit
pub const DEFAULT_QUAD_SCALE: f32 = 200.0;

/// Column-major 3x3 matrix, laid out like WGSL's `mat3x3<f32>` columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub cols: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Pixel space (origin top-left, y down) to clip space
    pub fn projection(width: f32, height: f32) -> Self {
        Self {
            cols: [
                [2.0 / width, 0.0, 0.0],
                [0.0, -2.0 / height, 0.0],
                [-1.0, 1.0, 1.0],
            ],
        }
    }

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [x, y, 1.0]],
        }
    }

    pub fn scale(s: f32) -> Self {
        Self {
            cols: [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `self * rhs`, so `rhs` applies first
    pub fn mul(&self, rhs: &Mat3) -> Mat3 {
        let mut cols = [[0.0; 3]; 3];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, value) in col.iter_mut().enumerate() {
                *value = (0..3).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Mat3 { cols }
    }

    /// Transform a point (implicit `w = 1`)
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let m = &self.cols;
        [
            m[0][0] * p[0] + m[1][0] * p[1] + m[2][0],
            m[0][1] * p[0] + m[1][1] * p[1] + m[2][1],
        ]
    }

    /// Inverse of an affine matrix, `None` when degenerate
    pub fn inverse_affine(&self) -> Option<Mat3> {
        let [[a, b, _], [c, d, _], [tx, ty, _]] = self.cols;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let ia = d * inv_det;
        let ib = -b * inv_det;
        let ic = -c * inv_det;
        let id = a * inv_det;
        Some(Mat3 {
            cols: [
                [ia, ib, 0.0],
                [ic, id, 0.0],
                [-(ia * tx + ic * ty), -(ib * tx + id * ty), 1.0],
            ],
        })
    }

    /// Columns padded to 16 bytes, the uniform-buffer layout of `mat3x3<f32>`
    pub fn to_padded_cols(&self) -> [[f32; 4]; 3] {
        let c = &self.cols;
        [
            [c[0][0], c[0][1], c[0][2], 0.0],
            [c[1][0], c[1][1], c[1][2], 0.0],
            [c[2][0], c[2][1], c[2][2], 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Two triangles covering local `[-1, 1]`, with texture coordinates `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct QuadGeometry {
    pub positions: [Vec2; 6],
    pub tex_coords: [Vec2; 6],
}

impl QuadGeometry {
    pub const VERTEX_COUNT: u32 = 6;

    pub fn new() -> Self {
        Self {
            positions: [
                [-1.0, -1.0],
                [-1.0, 1.0],
                [1.0, -1.0],
                [1.0, -1.0],
                [-1.0, 1.0],
                [1.0, 1.0],
            ],
            tex_coords: [
                [0.0, 0.0],
                [0.0, 1.0],
                [1.0, 0.0],
                [1.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
            ],
        }
    }

    /// Texture coordinate at a local-space point inside the quad.
    ///
    /// Both triangles map position to texture coordinate by the same affine
    /// rule, so interpolation reduces to `(p + 1) / 2`.
    pub fn tex_coord_at(local: Vec2) -> Vec2 {
        [(local[0] + 1.0) * 0.5, (local[1] + 1.0) * 0.5]
    }

    /// Whether a local-space point lies on the quad
    pub fn contains(local: Vec2) -> bool {
        (-1.0..=1.0).contains(&local[0]) && (-1.0..=1.0).contains(&local[1])
    }
}

impl Default for QuadGeometry {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the quad sits on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPlacement {
    /// Quad center in pixels
    pub position: Vec2,
    /// Pixels per local unit
    pub scale: f32,
}

impl MeshPlacement {
    /// Center the quad and grow the scale until it covers the surface.
    ///
    /// `base_scale` is kept when it already covers a `width` x `height`
    /// surface, otherwise it is raised to half the larger dimension.
    pub fn centered(width: f32, height: f32, base_scale: f32) -> Self {
        let cover = width.max(height) * 0.5;
        Self {
            position: [width * 0.5, height * 0.5],
            scale: base_scale.max(cover),
        }
    }

    /// Local quad space to pixel space
    pub fn local_transform(&self) -> Mat3 {
        Mat3::translation(self.position[0], self.position[1]).mul(&Mat3::scale(self.scale))
    }

    /// Local quad space to clip space for a surface of the given size
    pub fn clip_transform(&self, width: f32, height: f32) -> Mat3 {
        Mat3::projection(width, height).mul(&self.local_transform())
    }
}
