//! Clipping planes

use smallvec::SmallVec;

use crate::error::RenderResult;
use crate::interpolate::Interpolate;

use super::Vertex;

/// Convex polygon produced by clipping a triangle.
///
/// Each of the six planes can add at most one vertex, so nine fit inline.
pub type Polygon = SmallVec<[Vertex; 9]>;

/// The six planes bounding the canonical view volume `-w <= x, y, z <= w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippingPlane {
    /// `x <= w`
    Right,
    /// `-x <= w`
    Left,
    /// `y <= w`
    Top,
    /// `-y <= w`
    Bottom,
    /// `z <= w`
    Far,
    /// `-z <= w`
    Near,
}

/// All clipping planes in the order they are applied: X, then Y, then Z, positive side first.
pub const ALL_CLIPPING_PLANES: [ClippingPlane; 6] = [
    ClippingPlane::Right,
    ClippingPlane::Left,
    ClippingPlane::Top,
    ClippingPlane::Bottom,
    ClippingPlane::Far,
    ClippingPlane::Near,
];

impl ClippingPlane {
    /// Position component index and sign for this plane
    #[inline]
    fn axis(self) -> (usize, f32) {
        match self {
            ClippingPlane::Right => (0, 1.0),
            ClippingPlane::Left => (0, -1.0),
            ClippingPlane::Top => (1, 1.0),
            ClippingPlane::Bottom => (1, -1.0),
            ClippingPlane::Far => (2, 1.0),
            ClippingPlane::Near => (2, -1.0),
        }
    }

    /// Signed distance to the plane, non-negative when inside
    #[inline]
    fn distance(self, v: &Vertex) -> f32 {
        let (component, sign) = self.axis();

        v.position.w - sign * v.position[component]
    }

    /// Check if the clipping plane has the given clip-space point inside of it
    #[inline]
    pub fn has_inside(self, v: &Vertex) -> bool {
        let (component, sign) = self.axis();

        sign * v.position[component] <= v.position.w
    }

    /// Find the intersection of the edge `v1 -> v2` and the clipping plane
    #[inline]
    pub fn intersect(self, v1: &Vertex, v2: &Vertex) -> RenderResult<Vertex> {
        let a = self.distance(v1);
        let b = self.distance(v2);

        v1.lerp(v2, a / (a - b))
    }

    /// Clip a polygon against this plane, keeping the part inside of it.
    pub fn clip(self, polygon: &[Vertex]) -> RenderResult<Polygon> {
        let mut result = Polygon::new();

        for (i, curr) in polygon.iter().enumerate() {
            let prev = &polygon[(i + polygon.len() - 1) % polygon.len()];

            let curr_inside = self.has_inside(curr);

            if curr_inside != self.has_inside(prev) {
                result.push(self.intersect(prev, curr)?);
            }

            if curr_inside {
                result.push(*curr);
            }
        }

        Ok(result)
    }
}

/// Clip a triangle against all six planes of the view volume.
///
/// Returns the clipped convex polygon, or an empty polygon if nothing is left.
pub fn clip_triangle(vertices: &[Vertex; 3]) -> RenderResult<Polygon> {
    let mut polygon: Polygon = vertices.iter().cloned().collect();

    for plane in ALL_CLIPPING_PLANES.iter() {
        polygon = plane.clip(&polygon)?;

        if polygon.is_empty() {
            break;
        }
    }

    Ok(polygon)
}

/// Split a convex polygon into a fan of triangles sharing its first vertex.
pub fn fan(polygon: &[Vertex]) -> impl Iterator<Item = [Vertex; 3]> + '_ {
    (1..polygon.len().saturating_sub(1)).map(move |i| [polygon[0], polygon[i], polygon[i + 1]])
}

#[cfg(test)]
mod test {
    use nalgebra::Vector4;

    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::with_attributes(Vector4::new(x, y, z, 1.0), &[&[x, y]]).unwrap()
    }

    #[test]
    fn test_inside_triangle_unchanged() {
        let triangle = [vertex(-0.5, -0.5, 0.0), vertex(0.5, -0.5, 0.0), vertex(0.0, 0.5, 0.0)];

        let polygon = clip_triangle(&triangle).unwrap();

        assert_eq!(polygon.len(), 3);

        for v in triangle.iter() {
            assert!(polygon.contains(v));
        }
    }

    #[test]
    fn test_outside_single_plane_is_empty() {
        let triangle = [vertex(1.5, -0.5, 0.0), vertex(2.5, -0.5, 0.0), vertex(2.0, 0.5, 0.0)];

        assert!(clip_triangle(&triangle).unwrap().is_empty());

        let behind = [vertex(0.0, 0.0, -2.0), vertex(0.5, 0.0, -3.0), vertex(0.0, 0.5, -2.5)];

        assert!(clip_triangle(&behind).unwrap().is_empty());
    }

    #[test]
    fn test_straddle_single_plane() {
        // One vertex pokes out past x = w
        let triangle = [vertex(0.0, -0.5, 0.0), vertex(2.0, 0.0, 0.0), vertex(0.0, 0.5, 0.0)];

        let polygon = clip_triangle(&triangle).unwrap();

        assert_eq!(polygon.len(), 4);

        for v in polygon.iter() {
            assert!(v.position.x <= 1.0 + 1e-6);
            // attributes travel with the position
            assert!((v.attribute(0).unwrap().as_slice()[0] - v.position.x).abs() < 1e-6);
        }

        let on_plane = polygon.iter().filter(|v| (v.position.x - 1.0).abs() < 1e-6).count();

        assert_eq!(on_plane, 2);

        let triangles: Vec<_> = fan(&polygon).collect();

        assert_eq!(triangles.len(), 2);
        assert!(triangles.iter().all(|t| t[0] == polygon[0]));
    }

    #[test]
    fn test_fan_sizes() {
        let v = vertex(0.0, 0.0, 0.0);

        assert_eq!(fan(&[]).count(), 0);
        assert_eq!(fan(&[v, v]).count(), 0);
        assert_eq!(fan(&[v; 3]).count(), 1);
        assert_eq!(fan(&[v; 7]).count(), 5);
    }
}
