//! Line segments and the incremental line stepper

use crate::error::RenderResult;

use super::Vertex;

/// Ordered pair of vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vertex,
    pub end: Vertex,
}

impl LineSegment {
    #[inline(always)]
    pub fn new(start: Vertex, end: Vertex) -> LineSegment {
        LineSegment { start, end }
    }
}

/// Which difference between the endpoints determines the number of steps taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCount {
    /// One step per pixel along the major axis
    LargestDifference,
    /// One step per pixel in X, used to walk across a scanline
    XDifference,
    /// One step per pixel in Y, used to walk triangle edges
    YDifference,
}

impl StepCount {
    fn steps(self, dx: f32, dy: f32) -> u32 {
        let steps = match self {
            StepCount::LargestDifference => dx.abs().max(dy.abs()),
            StepCount::XDifference => dx.abs(),
            StepCount::YDifference => dy.abs(),
        };

        steps.round() as u32
    }
}

/// Walks a vertex along a line segment one pixel step at a time,
/// linearly interpolating position and attributes.
///
/// The X and Y components of both endpoints are rounded to the nearest pixel before
/// anything else, so the walk never drifts off the pixel grid. A stepper over `steps`
/// increments visits `steps + 1` vertices, the last being the rounded end point.
#[derive(Debug, Clone)]
pub struct LineStepper {
    current: Vertex,
    increment: Vertex,
    steps: u32,
    index: u32,
}

impl LineStepper {
    /// Fails if the endpoints differ in attribute shape.
    pub fn new(line: LineSegment, count: StepCount) -> RenderResult<LineStepper> {
        let LineSegment { mut start, mut end } = line;

        start.check_shape(&end)?;

        round_to_pixel(&mut start);
        round_to_pixel(&mut end);

        let difference = end.position - start.position;

        let steps = count.steps(difference.x, difference.y);

        let increment = if steps == 0 {
            start.increment_towards(&start, 1.0)?
        } else {
            start.increment_towards(&end, steps as f32)?
        };

        Ok(LineStepper { current: start, increment, steps, index: 0 })
    }

    /// The vertex at the current step
    #[inline(always)]
    pub fn current(&self) -> &Vertex { &self.current }

    /// Total number of increments this stepper will make
    #[inline(always)]
    pub fn steps(&self) -> u32 { self.steps }

    /// Number of increments made so far
    #[inline(always)]
    pub fn index(&self) -> u32 { self.index }

    #[inline]
    pub fn is_finished(&self) -> bool { self.index == self.steps }

    /// Advance one step. Returns `false` without changing anything once the end is reached.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        self.index += 1;
        self.current += &self.increment;

        true
    }
}

impl IntoIterator for LineStepper {
    type Item = Vertex;
    type IntoIter = LineStepperIter;

    /// Iterate over every vertex visited, including the starting one.
    fn into_iter(self) -> LineStepperIter {
        LineStepperIter { stepper: self, started: false }
    }
}

#[inline]
fn round_to_pixel(vertex: &mut Vertex) {
    vertex.position.x = vertex.position.x.round();
    vertex.position.y = vertex.position.y.round();
}

/// Iterator over the vertices visited by a `LineStepper`
pub struct LineStepperIter {
    stepper: LineStepper,
    started: bool,
}

impl Iterator for LineStepperIter {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        if !self.started {
            self.started = true;
        } else if !self.stepper.step() {
            return None;
        }

        Some(*self.stepper.current())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.stepper.steps - self.stepper.index) as usize + if self.started { 0 } else { 1 };
        (remaining, Some(remaining))
    }
}
