use std::convert::TryFrom;

use crate::error::{RenderError, RenderResult};

use super::Coordinate;

/// Defines types with set dimensions
pub trait HasDimensions {
    /// Returns the dimensions of the object
    fn dimensions(&self) -> Dimensions;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline(always)]
    pub fn new(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Returns the number of pixels as `usize` by multiplying the current width and height
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks if the given coordinate is within the dimension bounds
    #[inline]
    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Converts a signed pixel position into a coordinate, rejecting anything outside
    /// `[0, width) x [0, height)`.
    pub fn checked_coordinate(&self, x: i64, y: i64) -> RenderResult<Coordinate> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(cx), Ok(cy)) if self.in_bounds(Coordinate::new(cx, cy)) => Ok(Coordinate::new(cx, cy)),
            _ => Err(RenderError::InvalidPixelCoordinate(x, y)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_checked_coordinate() {
        let dim = Dimensions::new(4, 3);

        assert_eq!(dim.checked_coordinate(3, 2), Ok(Coordinate::new(3, 2)));
        assert_eq!(dim.checked_coordinate(4, 0), Err(RenderError::InvalidPixelCoordinate(4, 0)));
        assert_eq!(dim.checked_coordinate(0, -1), Err(RenderError::InvalidPixelCoordinate(0, -1)));
        assert_eq!(dim.checked_coordinate(0, 1 << 33), Err(RenderError::InvalidPixelCoordinate(0, 1 << 33)));
        assert_eq!(dim.area(), 12);
    }

    #[test]
    fn test_in_bounds() {
        let dim = Dimensions::new(4, 3);

        assert!(dim.in_bounds(Coordinate::new(0, 0)));
        assert!(dim.in_bounds(Coordinate::new(3, 2)));
        assert!(!dim.in_bounds(Coordinate::new(4, 2)));
        assert!(!dim.in_bounds(Coordinate::new(3, 3)));
    }
}
