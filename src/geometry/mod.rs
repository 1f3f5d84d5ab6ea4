//! Geometry structures

pub mod dimension;
pub mod coordinate;
pub mod vertex;
pub mod line;
pub mod clip;

pub use self::dimension::{Dimensions, HasDimensions};
pub use self::coordinate::Coordinate;
pub use self::vertex::{Attribute, Vertex, ATTRIBUTE_CAPACITY, MAX_ATTRIBUTES};
pub use self::line::{LineSegment, LineStepper, StepCount};
pub use self::clip::{ClippingPlane, Polygon, ALL_CLIPPING_PLANES, clip_triangle, fan};
