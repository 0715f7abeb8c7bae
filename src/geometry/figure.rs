//! Figures and shapes
//!
//! A [`Figure`] is one straight or curved segment of an outline. A [`Shape`]
//! is an ordered run of contiguous figures forming one sub-path. Both are
//! plain values: every transform returns a new figure and leaves the
//! original untouched.

use kurbo::{Affine, CubicBez, Line, ParamCurveExtrema, Point, QuadBez, Rect};
use serde::{Deserialize, Serialize};

/// One segment of an outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Figure {
    Line(Line),
    Cubic(CubicBez),
    Quad(QuadBez),
}

impl Figure {
    pub fn line(p0: Point, p1: Point) -> Self {
        Figure::Line(Line::new(p0, p1))
    }

    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Figure::Cubic(CubicBez::new(p0, p1, p2, p3))
    }

    pub fn quad(p0: Point, p1: Point, p2: Point) -> Self {
        Figure::Quad(QuadBez::new(p0, p1, p2))
    }

    /// The ordered, fixed-length point list of this figure
    pub fn points(&self) -> Vec<Point> {
        match self {
            Figure::Line(line) => vec![line.p0, line.p1],
            Figure::Cubic(cubic) => vec![cubic.p0, cubic.p1, cubic.p2, cubic.p3],
            Figure::Quad(quad) => vec![quad.p0, quad.p1, quad.p2],
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Figure::Line(line) => line.p0,
            Figure::Cubic(cubic) => cubic.p0,
            Figure::Quad(quad) => quad.p0,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Figure::Line(line) => line.p1,
            Figure::Cubic(cubic) => cubic.p3,
            Figure::Quad(quad) => quad.p2,
        }
    }

    /// Tight bounding box, including curve extrema
    pub fn bounding_box(&self) -> Rect {
        match self {
            Figure::Line(line) => line.bounding_box(),
            Figure::Cubic(cubic) => cubic.bounding_box(),
            Figure::Quad(quad) => quad.bounding_box(),
        }
    }

    /// Build a new figure of the same kind with every point mapped through `f`
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        match *self {
            Figure::Line(line) => Figure::Line(Line::new(f(line.p0), f(line.p1))),
            Figure::Cubic(c) => Figure::Cubic(CubicBez::new(f(c.p0), f(c.p1), f(c.p2), f(c.p3))),
            Figure::Quad(q) => Figure::Quad(QuadBez::new(f(q.p0), f(q.p1), f(q.p2))),
        }
    }

    pub fn transformed(&self, affine: Affine) -> Self {
        self.map_points(|p| affine * p)
    }

    /// Same figure with its end point moved to `end`
    pub fn with_end(&self, end: Point) -> Self {
        match *self {
            Figure::Line(line) => Figure::Line(Line::new(line.p0, end)),
            Figure::Cubic(c) => Figure::Cubic(CubicBez::new(c.p0, c.p1, c.p2, end)),
            Figure::Quad(q) => Figure::Quad(QuadBez::new(q.p0, q.p1, end)),
        }
    }

    /// Same figure traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        match *self {
            Figure::Line(line) => Figure::Line(Line::new(line.p1, line.p0)),
            Figure::Cubic(c) => Figure::Cubic(CubicBez::new(c.p3, c.p2, c.p1, c.p0)),
            Figure::Quad(q) => Figure::Quad(QuadBez::new(q.p2, q.p1, q.p0)),
        }
    }
}

/// One sub-path: contiguous figures plus an open/closed flag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub figures: Vec<Figure>,
    pub is_closed: bool,
}

impl Shape {
    pub fn open(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            is_closed: false,
        }
    }

    pub fn closed(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            is_closed: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Apply `f` to every figure, keeping the closed flag
    pub fn map_figures(&self, f: impl FnMut(&Figure) -> Figure) -> Self {
        Self {
            figures: self.figures.iter().map(f).collect(),
            is_closed: self.is_closed,
        }
    }
}

/// Union of the bounding boxes of every figure of every shape.
///
/// Returns `None` when no shape has a figure.
pub fn aggregate_bounding_box(shapes: &[Shape]) -> Option<Rect> {
    shapes
        .iter()
        .flat_map(|shape| shape.figures.iter())
        .map(Figure::bounding_box)
        .reduce(|acc, bbox| acc.union(bbox))
}
