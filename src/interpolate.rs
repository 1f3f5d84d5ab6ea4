//! Interpolation utilities

use num_traits::Float;

use nalgebra::Vector4;

use crate::error::RenderResult;

/// Describes a type that can be linearly interpolated towards another value of the same shape.
///
/// Interpolation happens in screen space after the W-divide, so no perspective correction
/// is applied at this level.
pub trait Interpolate: Sized {
    /// Interpolate from `self` (at `t = 0`) to `other` (at `t = 1`).
    ///
    /// Fails if the two values do not have the same shape.
    fn lerp(&self, other: &Self, t: f32) -> RenderResult<Self>;
}

/// Convenience method for linearly interpolating two scalars as `x1 + (x2 - x1) * t`.
///
/// Returns `x2` exactly when `t` is one.
#[inline]
pub fn linear_interpolate<N: Float>(t: N, x1: N, x2: N) -> N {
    if t == N::one() { x2 } else { x1 + (x2 - x1) * t }
}

impl Interpolate for f32 {
    #[inline(always)]
    fn lerp(&self, other: &f32, t: f32) -> RenderResult<f32> {
        Ok(linear_interpolate(t, *self, *other))
    }
}

impl Interpolate for Vector4<f32> {
    #[inline]
    fn lerp(&self, other: &Vector4<f32>, t: f32) -> RenderResult<Vector4<f32>> {
        Ok(self.zip_map(other, |a, b| linear_interpolate(t, a, b)))
    }
}
