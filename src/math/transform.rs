//! Placement transform shared by the raster and vector renderers

use crate::io::configuration::{POSITION_DECIMALS, SCALE_DECIMALS};
use crate::math::format::format_fixed;

/// 2-D affine matrix in SVG `matrix(a b c d e f)` order
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    /// Horizontal scale component
    pub a: f64,
    /// Vertical skew component
    pub b: f64,
    /// Horizontal skew component
    pub c: f64,
    /// Vertical scale component
    pub d: f64,
    /// Horizontal translation
    pub e: f64,
    /// Vertical translation
    pub f: f64,
}

impl Affine {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Pure translation
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Non-uniform scale about the origin
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation in screen space (y pointing down)
    pub fn rotate_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Composes `self · other`: `other` is applied to points first
    pub fn then_local(&self, other: &Self) -> Self {
        Self {
            a: self.a.mul_add(other.a, self.c * other.b),
            b: self.b.mul_add(other.a, self.d * other.b),
            c: self.a.mul_add(other.c, self.c * other.d),
            d: self.b.mul_add(other.c, self.d * other.d),
            e: self.a.mul_add(other.e, self.c.mul_add(other.f, self.e)),
            f: self.b.mul_add(other.e, self.d.mul_add(other.f, self.f)),
        }
    }

    /// Maps a point through the transform
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a.mul_add(x, self.c.mul_add(y, self.e)),
            self.b.mul_add(x, self.d.mul_add(y, self.f)),
        )
    }

    /// Largest absolute component difference between two matrices
    pub fn max_difference(&self, other: &Self) -> f64 {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }

    /// Converts to the rasterizer's single-precision transform
    pub fn to_skia(&self) -> resvg::tiny_skia::Transform {
        resvg::tiny_skia::Transform::from_row(
            self.a as f32,
            self.b as f32,
            self.c as f32,
            self.d as f32,
            self.e as f32,
            self.f as f32,
        )
    }
}

/// Frame placing an asset's local `[0, w] × [0, h]` box on the canvas
///
/// Composition order is translate to center, rotate, scale, then shift by half the
/// intrinsic size so the asset's midpoint lands on the center. Both renderers derive
/// their transform from this value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementTransform {
    /// Canvas-space center `(x, y)`
    pub center: (f64, f64),
    /// Rotation in degrees
    pub rotation: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Intrinsic `(width, height)` of the asset
    pub intrinsic: (f64, f64),
}

impl PlacementTransform {
    /// Local offset that centers the asset on the frame origin
    pub fn origin_offset(&self) -> (f64, f64) {
        (-self.intrinsic.0 / 2.0, -self.intrinsic.1 / 2.0)
    }

    /// Full composed matrix
    pub fn matrix(&self) -> Affine {
        let (ox, oy) = self.origin_offset();
        Affine::translate(self.center.0, self.center.1)
            .then_local(&Affine::rotate_degrees(self.rotation))
            .then_local(&Affine::scale(self.scale, self.scale))
            .then_local(&Affine::translate(ox, oy))
    }

    /// SVG `transform` attribute value with the same composition as [`Self::matrix`]
    pub fn to_svg(&self) -> String {
        let (ox, oy) = self.origin_offset();
        format!(
            "translate({} {}) rotate({}) scale({}) translate({} {})",
            format_fixed(self.center.0, POSITION_DECIMALS),
            format_fixed(self.center.1, POSITION_DECIMALS),
            format_fixed(self.rotation, POSITION_DECIMALS),
            format_fixed(self.scale, SCALE_DECIMALS),
            format_fixed(ox, POSITION_DECIMALS),
            format_fixed(oy, POSITION_DECIMALS),
        )
    }
}
