//! Vertex and per-vertex attribute storage

use std::ops::AddAssign;

use nalgebra::Vector4;

use crate::error::{RenderError, RenderResult};
use crate::interpolate::{Interpolate, linear_interpolate};

/// Maximum number of scalar components in a single attribute.
pub const ATTRIBUTE_CAPACITY: usize = 4;

/// Maximum number of attributes a vertex can carry.
pub const MAX_ATTRIBUTES: usize = 4;

/// Fixed-capacity sequence of scalars carried alongside a vertex position,
/// such as a texture coordinate or a normal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attribute {
    data: [f32; ATTRIBUTE_CAPACITY],
    size: u8,
}

impl Attribute {
    /// Create an attribute from the given components.
    ///
    /// Fails with `CapacityExceeded` if more than `ATTRIBUTE_CAPACITY` components are given.
    pub fn new(values: &[f32]) -> RenderResult<Attribute> {
        if values.len() > ATTRIBUTE_CAPACITY {
            return Err(RenderError::CapacityExceeded(ATTRIBUTE_CAPACITY));
        }

        let mut attribute = Attribute::default();

        attribute.data[..values.len()].copy_from_slice(values);
        attribute.size = values.len() as u8;

        Ok(attribute)
    }

    /// Number of components in use
    #[inline(always)]
    pub fn size(&self) -> u8 { self.size }

    /// The components in use
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..self.size as usize]
    }

    /// Get a single component, if it is in use
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.as_slice().get(index).cloned()
    }

    fn check_size(&self, other: &Attribute) -> RenderResult<()> {
        if self.size == other.size {
            Ok(())
        } else {
            Err(RenderError::AttributeSizeMismatch(self.size, other.size))
        }
    }

    /// Per-component `(end - self) / divisor`
    fn increment_towards(&self, end: &Attribute, divisor: f32) -> RenderResult<Attribute> {
        self.check_size(end)?;

        let mut result = Attribute { size: self.size, ..Attribute::default() };

        for i in 0..self.size as usize {
            result.data[i] = (end.data[i] - self.data[i]) / divisor;
        }

        Ok(result)
    }
}

impl Interpolate for Attribute {
    fn lerp(&self, other: &Attribute, t: f32) -> RenderResult<Attribute> {
        self.check_size(other)?;

        let mut result = Attribute { size: self.size, ..Attribute::default() };

        for i in 0..self.size as usize {
            result.data[i] = linear_interpolate(t, self.data[i], other.data[i]);
        }

        Ok(result)
    }
}

impl<'a> AddAssign<&'a Attribute> for Attribute {
    /// Element-wise accumulation.
    ///
    /// Panics if the attributes differ in size.
    fn add_assign(&mut self, other: &'a Attribute) {
        assert_eq!(self.size, other.size, "attribute size mismatch");

        for (a, b) in self.data.iter_mut().zip(other.data.iter()).take(self.size as usize) {
            *a += *b;
        }
    }
}

/// Homogeneous position plus an ordered list of attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in homogeneous clip space, or screen space once the filler has projected it.
    pub position: Vector4<f32>,
    attributes: [Attribute; MAX_ATTRIBUTES],
    attribute_count: u8,
}

impl Vertex {
    /// Creates a vertex with no attributes
    pub fn new(position: Vector4<f32>) -> Vertex {
        Vertex {
            position,
            attributes: [Attribute::default(); MAX_ATTRIBUTES],
            attribute_count: 0,
        }
    }

    /// Creates a vertex with the given attributes, in order
    pub fn with_attributes(position: Vector4<f32>, attributes: &[&[f32]]) -> RenderResult<Vertex> {
        let mut vertex = Vertex::new(position);

        for values in attributes {
            vertex.push_attribute(Attribute::new(values)?)?;
        }

        Ok(vertex)
    }

    /// Appends an attribute, failing with `CapacityExceeded` if the vertex is already full.
    pub fn push_attribute(&mut self, attribute: Attribute) -> RenderResult<()> {
        let count = self.attribute_count as usize;

        if count >= MAX_ATTRIBUTES {
            return Err(RenderError::CapacityExceeded(MAX_ATTRIBUTES));
        }

        self.attributes[count] = attribute;
        self.attribute_count += 1;

        Ok(())
    }

    #[inline(always)]
    pub fn attribute_count(&self) -> u8 { self.attribute_count }

    /// Attributes in use
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..self.attribute_count as usize]
    }

    #[inline]
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes().get(index)
    }

    /// Checks that both vertices carry the same number of attributes with pairwise equal sizes.
    pub fn check_shape(&self, other: &Vertex) -> RenderResult<()> {
        if self.attribute_count != other.attribute_count {
            return Err(RenderError::AttributeCountMismatch(self.attribute_count, other.attribute_count));
        }

        for (a, b) in self.attributes().iter().zip(other.attributes()) {
            a.check_size(b)?;
        }

        Ok(())
    }

    /// Per-step increment from `self` to `end` over `steps` steps, for position and attributes.
    pub(crate) fn increment_towards(&self, end: &Vertex, steps: f32) -> RenderResult<Vertex> {
        self.check_shape(end)?;

        let mut increment = Vertex::new((end.position - self.position) / steps);

        for (a, b) in self.attributes().iter().zip(end.attributes()) {
            increment.push_attribute(a.increment_towards(b, steps)?)?;
        }

        Ok(increment)
    }
}

impl Interpolate for Vertex {
    fn lerp(&self, other: &Vertex, t: f32) -> RenderResult<Vertex> {
        self.check_shape(other)?;

        let mut result = Vertex::new(Interpolate::lerp(&self.position, &other.position, t)?);

        for (a, b) in self.attributes().iter().zip(other.attributes()) {
            result.push_attribute(a.lerp(b, t)?)?;
        }

        Ok(result)
    }
}

impl<'a> AddAssign<&'a Vertex> for Vertex {
    /// Accumulates position and attributes.
    ///
    /// Panics if the vertices differ in shape.
    fn add_assign(&mut self, other: &'a Vertex) {
        assert_eq!(self.attribute_count, other.attribute_count, "attribute count mismatch");

        self.position += other.position;

        let count = self.attribute_count as usize;

        for (a, b) in self.attributes[..count].iter_mut().zip(other.attributes()) {
            *a += b;
        }
    }
}
