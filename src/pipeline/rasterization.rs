//! Scanline triangle filling

use std::mem;

use crate::error::{RenderError, RenderResult};
use crate::color::Blend;
use crate::geometry::{Dimensions, HasDimensions, LineSegment, LineStepper, StepCount, Vertex};
use crate::interpolate::Interpolate;

use super::{Fragment, PixelShader, RenderTargets};

/// Borrowed state shared by every pixel of a single draw.
pub(crate) struct Rasterizer<'r, 'a: 'r, S: 'r, B: 'r> {
    pub targets: &'r mut RenderTargets<'a>,
    pub shader: &'r S,
    pub blend: &'r B,
}

impl<'r, 'a, S, B> Rasterizer<'r, 'a, S, B> where S: PixelShader, B: Blend {
    /// Fill a triangle that lies entirely inside the view volume.
    ///
    /// Vertex positions are in homogeneous clip space.
    pub fn fill_triangle(&mut self, mut vertices: [Vertex; 3]) -> RenderResult<()> {
        // W division (homogeneous clip space -> NDC)
        for vertex in vertices.iter_mut() {
            let w = vertex.position.w;

            if w == 0.0 {
                return Err(RenderError::ZeroW);
            }

            vertex.position.x /= w;
            vertex.position.y /= w;
            vertex.position.z /= w;
        }

        // Viewport transformation, [-1, 1] to the nearest pixel
        let Dimensions { width, height } = self.targets.dimensions();

        for vertex in vertices.iter_mut() {
            vertex.position.x = to_pixel(vertex.position.x, width);
            vertex.position.y = to_pixel(vertex.position.y, height);
        }

        // Sort by Y
        if vertices[0].position.y > vertices[1].position.y {
            vertices.swap(0, 1);
        }
        if vertices[0].position.y > vertices[2].position.y {
            vertices.swap(0, 2);
        }
        if vertices[1].position.y > vertices[2].position.y {
            vertices.swap(1, 2);
        }

        let [v0, v1, v2] = vertices;

        let (y0, y1, y2) = (v0.position.y, v1.position.y, v2.position.y);

        if y0 == y1 {
            // flat top
            self.fill_spans(LineSegment::new(v0, v2), LineSegment::new(v1, v2))
        } else if y1 == y2 {
            // flat bottom
            self.fill_spans(LineSegment::new(v0, v1), LineSegment::new(v0, v2))
        } else {
            let split = v0.lerp(&v2, (y1 - y0) / (y2 - y0))?;

            self.fill_spans(LineSegment::new(v0, v1), LineSegment::new(v0, split))?;
            self.fill_spans(LineSegment::new(v1, v2), LineSegment::new(split, v2))
        }
    }

    /// Walk two edges of a flat-topped or flat-bottomed triangle in lock-step,
    /// filling the horizontal span between them on every row.
    fn fill_spans(&mut self, mut a: LineSegment, mut b: LineSegment) -> RenderResult<()> {
        if a.start.position.x > b.start.position.x {
            mem::swap(&mut a, &mut b);
        }

        let mut left = LineStepper::new(a, StepCount::YDifference)?;
        let mut right = LineStepper::new(b, StepCount::YDifference)?;

        loop {
            debug_assert_eq!(left.current().position.y, right.current().position.y);

            let span = LineStepper::new(LineSegment::new(*left.current(), *right.current()), StepCount::XDifference)?;

            for vertex in span {
                self.plot(&vertex)?;
            }

            if !(left.step() && right.step()) {
                return Ok(());
            }
        }
    }

    /// Depth test, shade and blend a single pixel.
    ///
    /// X and Y are truncated, span vertices always land on whole pixels.
    fn plot(&mut self, vertex: &Vertex) -> RenderResult<()> {
        let x = vertex.position.x as i64;
        let y = vertex.position.y as i64;

        if let Some(ref mut depth) = self.targets.depth {
            let stored = depth.at_mut(x, y)?;
            let z = vertex.position.z;

            if z < *stored {
                *stored = z;
            } else {
                // occluded
                return Ok(());
            }
        }

        if let Some(ref mut color) = self.targets.color {
            let destination = color.at_mut(x, y)?;

            if let Fragment::Color(new) = self.shader.shade(vertex) {
                *destination = self.blend.blend(*destination, new);
            }
        }

        Ok(())
    }
}

/// Maps a normalized device coordinate to the nearest pixel along an axis of `size` pixels.
#[inline]
fn to_pixel(ndc: f32, size: u32) -> f32 {
    ((ndc + 1.0) / 2.0 * (size as f32 - 1.0)).round()
}

#[cfg(test)]
mod test {
    use nalgebra::Vector4;

    use crate::color::{ColorRgba, DefaultBlend};
    use crate::pixels::{ColorBuffer, DepthBuffer, FAR_DEPTH};
    use crate::pipeline::ConstantShader;

    use super::*;

    /// Vertex whose clip-space position lands exactly on pixel `(x, y)` of a 5x5 target
    fn pixel_vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vector4::new(x / 2.0 - 1.0, y / 2.0 - 1.0, z, 1.0))
    }

    fn fill(targets: &mut RenderTargets, vertices: [Vertex; 3], color: ColorRgba) -> RenderResult<()> {
        Rasterizer { targets, shader: &ConstantShader(color), blend: &DefaultBlend }.fill_triangle(vertices)
    }

    #[test]
    fn test_to_pixel() {
        assert_eq!(to_pixel(-1.0, 5), 0.0);
        assert_eq!(to_pixel(1.0, 5), 4.0);
        assert_eq!(to_pixel(0.0, 5), 2.0);
        assert_eq!(to_pixel(0.1, 5), 2.0);
    }

    #[test]
    fn test_flat_base_footprint() {
        let mut color = ColorBuffer::new_with(5, 5, ColorRgba::BLACK);
        let mut depth = DepthBuffer::new_with(5, 5, FAR_DEPTH);

        {
            let mut targets = RenderTargets::color_depth(&mut color, &mut depth).unwrap();

            let triangle = [pixel_vertex(0.0, 0.0, 0.5), pixel_vertex(4.0, 0.0, 0.5), pixel_vertex(2.0, 4.0, 0.5)];

            fill(&mut targets, triangle, ColorRgba::WHITE).unwrap();
        }

        // Row 0 is the full base, row 4 only the apex. Half-pixel span ends round away from zero.
        let expected = [
            "#####",
            ".####",
            ".###.",
            "..##.",
            "..#..",
        ];

        for (y, row) in expected.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let lit = *color.at(x as i64, y as i64).unwrap() == ColorRgba::WHITE;
                assert_eq!(lit, c == '#', "pixel ({}, {})", x, y);
                assert_eq!(*depth.at(x as i64, y as i64).unwrap() == 0.5, lit);
            }
        }
    }

    #[test]
    fn test_general_triangle_is_split() {
        let mut color = ColorBuffer::new_with(5, 5, ColorRgba::BLACK);

        {
            let mut targets = RenderTargets::color(&mut color);

            let triangle = [pixel_vertex(0.0, 0.0, 0.0), pixel_vertex(4.0, 2.0, 0.0), pixel_vertex(0.0, 4.0, 0.0)];

            fill(&mut targets, triangle, ColorRgba::RED).unwrap();
        }

        // the split row reaches the far vertex, and the left edge is fully covered
        assert_eq!(*color.at(4, 2).unwrap(), ColorRgba::RED);

        for y in 0..5 {
            assert_eq!(*color.at(0, y).unwrap(), ColorRgba::RED);
        }

        assert_eq!(*color.at(4, 0).unwrap(), ColorRgba::BLACK);
        assert_eq!(*color.at(4, 4).unwrap(), ColorRgba::BLACK);
    }

    #[test]
    fn test_depth_only_target() {
        let mut depth = DepthBuffer::new_with(5, 5, FAR_DEPTH);

        {
            let mut targets = RenderTargets::depth(&mut depth);

            let triangle = [pixel_vertex(0.0, 0.0, 0.25), pixel_vertex(4.0, 0.0, 0.25), pixel_vertex(0.0, 4.0, 0.25)];

            fill(&mut targets, triangle, ColorRgba::RED).unwrap();
        }

        assert_eq!(*depth.at(0, 0).unwrap(), 0.25);
        assert_eq!(*depth.at(4, 4).unwrap(), FAR_DEPTH);
    }

    #[test]
    fn test_plot_truncates() {
        let mut color = ColorBuffer::new_with(5, 5, ColorRgba::BLACK);

        {
            let mut targets = RenderTargets::color(&mut color);
            let mut rasterizer = Rasterizer { targets: &mut targets, shader: &ConstantShader(ColorRgba::RED), blend: &DefaultBlend };

            rasterizer.plot(&Vertex::new(Vector4::new(1.7, 2.9, 0.0, 1.0))).unwrap();
        }

        assert_eq!(*color.at(1, 2).unwrap(), ColorRgba::RED);
        assert_eq!(color.as_slice().iter().filter(|c| **c == ColorRgba::RED).count(), 1);
    }

    #[test]
    fn test_zero_w_is_error() {
        let mut color = ColorBuffer::new_with(5, 5, ColorRgba::BLACK);
        let mut targets = RenderTargets::color(&mut color);

        let mut degenerate = pixel_vertex(0.0, 0.0, 0.0);
        degenerate.position.w = 0.0;

        let triangle = [degenerate, pixel_vertex(4.0, 0.0, 0.0), pixel_vertex(0.0, 4.0, 0.0)];

        assert_eq!(fill(&mut targets, triangle, ColorRgba::RED).unwrap_err(), RenderError::ZeroW);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut color = ColorBuffer::new_with(5, 5, ColorRgba::BLACK);
        let mut targets = RenderTargets::color(&mut color);

        // x = 1.5w maps past the right edge
        let triangle = [pixel_vertex(0.0, 0.0, 0.0), pixel_vertex(6.0, 0.0, 0.0), pixel_vertex(0.0, 4.0, 0.0)];

        match fill(&mut targets, triangle, ColorRgba::RED) {
            Err(RenderError::InvalidPixelCoordinate(x, _)) => assert!(x >= 5),
            other => panic!("expected invalid coordinate, got {:?}", other),
        }
    }
}
