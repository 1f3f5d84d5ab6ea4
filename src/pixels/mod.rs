//! Color and depth buffers
use crate::error::RenderResult;
use crate::color::ColorRgba;
use crate::geometry::{Dimensions, Coordinate, HasDimensions};

/// Depth value representing the farthest possible distance.
///
/// Depth buffers should be cleared to this before rendering a frame.
pub const FAR_DEPTH: f32 = ::std::f32::MAX;

/// Two-dimensional, row-major grid of pixels.
///
/// Every access is bounds checked and returns `RenderError::InvalidPixelCoordinate`
/// rather than clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T> {
    dimensions: Dimensions,
    pixels: Vec<T>,
}

/// Buffer of RGBA colors
pub type ColorBuffer = PixelBuffer<ColorRgba>;

/// Buffer of depth values, smaller is closer
pub type DepthBuffer = PixelBuffer<f32>;

impl<T: Copy> PixelBuffer<T> {
    /// Create a new buffer with every pixel set to `value`.
    pub fn new_with(width: u32, height: u32, value: T) -> PixelBuffer<T> {
        let dimensions = Dimensions::new(width, height);

        PixelBuffer { dimensions, pixels: vec![value; dimensions.area()] }
    }

    /// Set every pixel to `value`
    pub fn clear(&mut self, value: T) {
        for pixel in self.pixels.iter_mut() {
            *pixel = value;
        }
    }
}

impl<T> PixelBuffer<T> {
    #[inline(always)]
    pub fn width(&self) -> u32 { self.dimensions.width }

    #[inline(always)]
    pub fn height(&self) -> u32 { self.dimensions.height }

    /// Get a reference to the pixel at the given coordinate.
    pub fn pixel_ref(&self, coord: Coordinate) -> RenderResult<&T> {
        let coord = self.dimensions.checked_coordinate(coord.x as i64, coord.y as i64)?;

        Ok(&self.pixels[coord.into_index(self.dimensions)])
    }

    /// Get a mutable reference to the pixel at the given coordinate.
    pub fn pixel_mut(&mut self, coord: Coordinate) -> RenderResult<&mut T> {
        let coord = self.dimensions.checked_coordinate(coord.x as i64, coord.y as i64)?;

        Ok(&mut self.pixels[coord.into_index(self.dimensions)])
    }

    /// Get a reference to the pixel at a signed position
    #[inline]
    pub fn at(&self, x: i64, y: i64) -> RenderResult<&T> {
        let coord = self.dimensions.checked_coordinate(x, y)?;

        Ok(&self.pixels[coord.into_index(self.dimensions)])
    }

    /// Get a mutable reference to the pixel at a signed position
    #[inline]
    pub fn at_mut(&mut self, x: i64, y: i64) -> RenderResult<&mut T> {
        let coord = self.dimensions.checked_coordinate(x, y)?;

        Ok(&mut self.pixels[coord.into_index(self.dimensions)])
    }

    /// All pixels in row-major order
    #[inline]
    pub fn as_slice(&self) -> &[T] { &self.pixels }

    /// Iterate over every pixel along with its coordinate
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (Coordinate, &T)> + '_ {
        let width = self.dimensions.width.max(1);

        self.pixels.iter().enumerate().map(move |(i, pixel)| {
            (Coordinate::new(i as u32 % width, i as u32 / width), pixel)
        })
    }
}

impl<T> HasDimensions for PixelBuffer<T> {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

#[cfg(test)]
mod test {
    use crate::error::RenderError;

    use super::*;

    #[test]
    fn test_access_is_row_major() {
        let mut buffer = DepthBuffer::new_with(3, 2, FAR_DEPTH);

        *buffer.at_mut(2, 1).unwrap() = 0.5;

        assert_eq!(buffer.as_slice()[5], 0.5);
        assert_eq!(*buffer.pixel_ref(Coordinate::new(2, 1)).unwrap(), 0.5);
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let mut buffer = ColorBuffer::new_with(3, 2, ColorRgba::BLACK);

        assert_eq!(buffer.at(3, 0).unwrap_err(), RenderError::InvalidPixelCoordinate(3, 0));
        assert_eq!(buffer.at_mut(0, -1).unwrap_err(), RenderError::InvalidPixelCoordinate(0, -1));
        assert!(buffer.pixel_mut(Coordinate::new(0, 2)).is_err());
    }

    #[test]
    fn test_enumerate_and_clear() {
        let mut buffer = ColorBuffer::new_with(2, 2, ColorRgba::BLACK);

        *buffer.at_mut(1, 1).unwrap() = ColorRgba::RED;

        let red: Vec<_> = buffer.enumerate_pixels().filter(|&(_, c)| *c == ColorRgba::RED).map(|(coord, _)| coord).collect();

        assert_eq!(red, vec![Coordinate::new(1, 1)]);

        buffer.clear(ColorRgba::WHITE);

        assert!(buffer.as_slice().iter().all(|c| *c == ColorRgba::WHITE));
    }
}
