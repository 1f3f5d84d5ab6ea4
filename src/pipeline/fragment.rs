//! Pixel shader interface

use crate::color::ColorRgba;
use crate::geometry::Vertex;

/// Fragment returned by the pixel shader, which can either be a color
/// value for the pixel or a discard flag to skip that pixel altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    /// Leave the destination pixel untouched, as if it was never there.
    Discard,
    /// Desired color for the pixel, blended over the existing one
    Color(ColorRgba),
}

impl From<Option<ColorRgba>> for Fragment {
    #[inline]
    fn from(color: Option<ColorRgba>) -> Fragment {
        match color {
            Some(color) => Fragment::Color(color),
            None => Fragment::Discard,
        }
    }
}

impl From<ColorRgba> for Fragment {
    #[inline]
    fn from(color: ColorRgba) -> Fragment {
        Fragment::Color(color)
    }
}

/// Computes the color of a covered pixel from the interpolated vertex.
///
/// The vertex position is in screen space: X and Y are pixel coordinates,
/// Z is the normalized device depth and W is the original clip-space W.
/// Attributes are interpolated linearly in screen space.
pub trait PixelShader {
    fn shade(&self, vertex: &Vertex) -> Fragment;
}

impl<F> PixelShader for F where F: Fn(&Vertex) -> Fragment {
    #[inline]
    fn shade(&self, vertex: &Vertex) -> Fragment {
        self(vertex)
    }
}

/// Shader that colors every pixel the same
#[derive(Debug, Clone, Copy)]
pub struct ConstantShader(pub ColorRgba);

impl PixelShader for ConstantShader {
    #[inline(always)]
    fn shade(&self, _: &Vertex) -> Fragment {
        Fragment::Color(self.0)
    }
}
