//! Triangle rendering pipeline
//!
//! Triangles are given in homogeneous clip space. Each one is classified against the
//! canonical view volume `-w <= x, y, z <= w`, clipped if it straddles the volume,
//! and scan-converted into the render targets.

use nalgebra::Vector4;

use tracing::trace;

use crate::error::{RenderError, RenderResult};
use crate::color::{Blend, DefaultBlend};
use crate::geometry::{Vertex, clip_triangle, fan};

pub mod fragment;
pub mod targets;
pub(crate) mod rasterization;

pub use self::fragment::{Fragment, PixelShader, ConstantShader};
pub use self::targets::RenderTargets;

use self::rasterization::Rasterizer;

/// How triangles whose vertices all lie outside the view volume are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityTest {
    /// Discard the triangle without clipping.
    ///
    /// This is conservative: a large triangle can still cross the view volume
    /// with every vertex outside of it, and will be culled anyway.
    Vertices,
    /// Clip the triangle and draw whatever is left of it.
    Clip,
}

impl Default for VisibilityTest {
    fn default() -> VisibilityTest { VisibilityTest::Vertices }
}

/// Everything needed to render one triangle.
pub struct RenderTriangleParams<'a, S, B = DefaultBlend> {
    /// Vertices in homogeneous clip space
    pub vertices: [Vertex; 3],
    pub targets: RenderTargets<'a>,
    pub pixel_shader: S,
    pub blend: B,
    pub visibility: VisibilityTest,
}

impl<'a, S> RenderTriangleParams<'a, S, DefaultBlend> where S: PixelShader {
    /// Parameters with the default blend function and visibility test
    pub fn new(vertices: [Vertex; 3], targets: RenderTargets<'a>, pixel_shader: S) -> RenderTriangleParams<'a, S, DefaultBlend> {
        RenderTriangleParams {
            vertices,
            targets,
            pixel_shader,
            blend: DefaultBlend,
            visibility: VisibilityTest::default(),
        }
    }
}

impl<'a, S, O> RenderTriangleParams<'a, S, O> {
    #[must_use]
    pub fn with_blend<B>(self, blend: B) -> RenderTriangleParams<'a, S, B> where B: Blend {
        RenderTriangleParams {
            vertices: self.vertices,
            targets: self.targets,
            pixel_shader: self.pixel_shader,
            blend,
            visibility: self.visibility,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityTest) -> RenderTriangleParams<'a, S, O> {
        self.visibility = visibility;
        self
    }
}

/// Render a single triangle into the parameter's targets.
pub fn render_triangle<S, B>(params: &mut RenderTriangleParams<S, B>) -> RenderResult<()> where S: PixelShader, B: Blend {
    let RenderTriangleParams { ref vertices, ref mut targets, ref pixel_shader, ref blend, visibility } = *params;

    draw_triangle(targets, vertices, pixel_shader, blend, visibility)
}

/// Checks if a clip-space position is inside the canonical view volume
#[inline]
pub fn is_point_visible(p: &Vector4<f32>) -> bool {
    let w = p.w;

    p.x >= -w && p.x <= w &&
        p.y >= -w && p.y <= w &&
        p.z >= -w && p.z <= w
}

pub(crate) fn draw_triangle<S, B>(targets: &mut RenderTargets,
                                  vertices: &[Vertex; 3],
                                  shader: &S,
                                  blend: &B,
                                  visibility: VisibilityTest) -> RenderResult<()> where S: PixelShader, B: Blend {
    let visible = vertices.iter().filter(|v| is_point_visible(&v.position)).count();

    let mut rasterizer = Rasterizer { targets, shader, blend };

    if visible == 3 {
        return rasterizer.fill_triangle(*vertices);
    }

    if visible == 0 && visibility == VisibilityTest::Vertices {
        trace!("discarding triangle with no visible vertices");
        return Ok(());
    }

    let polygon = clip_triangle(vertices)?;

    if polygon.is_empty() {
        trace!("triangle clipped away entirely");
        return Ok(());
    }

    if polygon.len() < 3 {
        return Err(RenderError::DegenerateClip(polygon.len()));
    }

    trace!(vertices = polygon.len(), "clipped triangle");

    for triangle in fan(&polygon) {
        rasterizer.fill_triangle(triangle)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use crate::color::ColorRgba;
    use crate::pixels::{ColorBuffer, DepthBuffer, FAR_DEPTH};

    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vector4::new(x, y, z, 1.0))
    }

    fn lit(buffer: &ColorBuffer) -> usize {
        buffer.as_slice().iter().filter(|c| **c != ColorRgba::BLACK).count()
    }

    #[test]
    fn test_point_visibility() {
        assert!(is_point_visible(&Vector4::new(1.0, -1.0, 0.0, 1.0)));
        assert!(is_point_visible(&Vector4::new(2.0, 0.0, -2.0, 2.0)));
        assert!(!is_point_visible(&Vector4::new(1.1, 0.0, 0.0, 1.0)));
        assert!(!is_point_visible(&Vector4::new(0.0, 0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_straddling_triangle_is_clipped() {
        let mut color = ColorBuffer::new_with(9, 9, ColorRgba::BLACK);

        {
            let targets = RenderTargets::color(&mut color);
            let triangle = [vertex(-1.0, -1.0, 0.0), vertex(3.0, -1.0, 0.0), vertex(-1.0, 1.0, 0.0)];

            render_triangle(&mut RenderTriangleParams::new(triangle, targets, ConstantShader(ColorRgba::RED))).unwrap();
        }

        assert_eq!(*color.at(8, 0).unwrap(), ColorRgba::RED);
        assert_eq!(*color.at(0, 8).unwrap(), ColorRgba::RED);
        assert_eq!(*color.at(8, 8).unwrap(), ColorRgba::BLACK);
    }

    #[test]
    fn test_all_outside_culling_policy() {
        // Every vertex is outside but the triangle covers the whole view volume
        let triangle = [vertex(-3.0, -3.0, 0.0), vertex(6.0, -3.0, 0.0), vertex(-3.0, 6.0, 0.0)];

        let mut color = ColorBuffer::new_with(4, 4, ColorRgba::BLACK);

        render_triangle(&mut RenderTriangleParams::new(triangle, RenderTargets::color(&mut color), ConstantShader(ColorRgba::RED))).unwrap();

        assert_eq!(lit(&color), 0);

        render_triangle(&mut RenderTriangleParams::new(triangle, RenderTargets::color(&mut color), ConstantShader(ColorRgba::RED))
            .with_visibility(VisibilityTest::Clip)).unwrap();

        assert_eq!(lit(&color), 16);
    }

    #[test]
    fn test_discard_leaves_pixels() {
        let mut color = ColorBuffer::new_with(6, 6, ColorRgba::BLUE);
        let triangle = [vertex(-1.0, -1.0, 0.0), vertex(1.0, -1.0, 0.0), vertex(0.0, 1.0, 0.0)];

        let discard = |_: &Vertex| Fragment::Discard;

        render_triangle(&mut RenderTriangleParams::new(triangle, RenderTargets::color(&mut color), discard)).unwrap();

        assert!(color.as_slice().iter().all(|c| *c == ColorRgba::BLUE));
    }

    #[test]
    fn test_custom_blend() {
        let mut color = ColorBuffer::new_with(4, 4, ColorRgba::new(10, 0, 0, 255));
        let triangle = [vertex(-1.0, -1.0, 0.0), vertex(1.0, -1.0, 0.0), vertex(-1.0, 1.0, 0.0)];

        let add = |old: ColorRgba, new: ColorRgba| ColorRgba::new(old.r + new.r, old.g, old.b, old.a);

        let mut params = RenderTriangleParams::new(triangle, RenderTargets::color(&mut color), ConstantShader(ColorRgba::new(5, 0, 0, 255)))
            .with_blend(add);

        render_triangle(&mut params).unwrap();

        assert_eq!(color.at(0, 0).unwrap().r, 15);
        assert_eq!(color.at(3, 3).unwrap().r, 10);
    }

    #[test]
    fn test_depth_buffer_only() {
        let mut depth = DepthBuffer::new_with(4, 4, FAR_DEPTH);
        let triangle = [vertex(-1.0, -1.0, 0.5), vertex(1.0, -1.0, 0.5), vertex(-1.0, 1.0, 0.5)];

        render_triangle(&mut RenderTriangleParams::new(triangle, RenderTargets::depth(&mut depth), ConstantShader(ColorRgba::RED))).unwrap();

        assert_eq!(*depth.at(0, 0).unwrap(), 0.5);
        assert_eq!(*depth.at(3, 3).unwrap(), FAR_DEPTH);
    }
}
