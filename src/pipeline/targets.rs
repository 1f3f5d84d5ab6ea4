//! Render target selection

use crate::error::{RenderError, RenderResult};
use crate::geometry::{Dimensions, HasDimensions};
use crate::pixels::{ColorBuffer, DepthBuffer};

/// Color and/or depth buffers a triangle is rendered into.
///
/// At least one buffer is always present, and when both are they share dimensions.
/// The buffers are borrowed exclusively for as long as the targets exist.
#[derive(Debug)]
pub struct RenderTargets<'a> {
    pub(crate) color: Option<&'a mut ColorBuffer>,
    pub(crate) depth: Option<&'a mut DepthBuffer>,
    dimensions: Dimensions,
}

impl<'a> RenderTargets<'a> {
    /// Fails with `NoRenderTarget` if neither buffer is given, or `DimensionMismatch`
    /// if both are given with different sizes.
    pub fn new(color: Option<&'a mut ColorBuffer>, depth: Option<&'a mut DepthBuffer>) -> RenderResult<RenderTargets<'a>> {
        let dimensions = match (&color, &depth) {
            (Some(c), Some(d)) => {
                let (c, d) = (c.dimensions(), d.dimensions());

                if c != d {
                    return Err(RenderError::DimensionMismatch(c.width, c.height, d.width, d.height));
                }

                c
            }
            (Some(c), None) => c.dimensions(),
            (None, Some(d)) => d.dimensions(),
            (None, None) => return Err(RenderError::NoRenderTarget),
        };

        Ok(RenderTargets { color, depth, dimensions })
    }

    /// Render into a color buffer only, without depth testing
    pub fn color(color: &'a mut ColorBuffer) -> RenderTargets<'a> {
        let dimensions = color.dimensions();

        RenderTargets { color: Some(color), depth: None, dimensions }
    }

    /// Render into a depth buffer only
    pub fn depth(depth: &'a mut DepthBuffer) -> RenderTargets<'a> {
        let dimensions = depth.dimensions();

        RenderTargets { color: None, depth: Some(depth), dimensions }
    }

    /// Render into both buffers, depth testing every pixel
    pub fn color_depth(color: &'a mut ColorBuffer, depth: &'a mut DepthBuffer) -> RenderResult<RenderTargets<'a>> {
        RenderTargets::new(Some(color), Some(depth))
    }

    #[inline]
    pub fn has_color(&self) -> bool { self.color.is_some() }

    #[inline]
    pub fn has_depth(&self) -> bool { self.depth.is_some() }
}

impl<'a> HasDimensions for RenderTargets<'a> {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}
