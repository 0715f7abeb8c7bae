//! Duplicate and winding correction
//!
//! Icon sets often stack identical closed contours as gradient or shadow
//! layers. Those copies are removed before the outline is measured. The
//! polygon helpers (signed area, even-odd containment, nesting depth) work on
//! contours flattened with [`sample_contour_points`].

use crate::geometry::{Figure, Shape};
use kurbo::{ParamCurve, Point};
use tracing::debug;

/// Parametric steps taken along each curve when flattening
pub const CURVE_SAMPLE_COUNT: usize = 8;

/// Per-coordinate tolerance when comparing shapes
pub const DUPLICATE_EPSILON: f64 = 0.1;

/// Shoelace area; positive for counter-clockwise point order.
///
/// Fewer than three points enclose nothing and give zero.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice_area / 2.0
}

/// Flatten figures into a polyline.
///
/// Lines contribute both end points, curves `CURVE_SAMPLE_COUNT + 1` points.
/// The joint shared by consecutive figures appears once.
pub fn sample_contour_points(figures: &[Figure]) -> Vec<Point> {
    let mut points = Vec::new();
    for figure in figures {
        let sampled = sample_figure(figure);
        let skip = usize::from(!points.is_empty());
        points.extend(sampled.into_iter().skip(skip));
    }
    points
}

fn sample_figure(figure: &Figure) -> Vec<Point> {
    let steps = CURVE_SAMPLE_COUNT as f64;
    match figure {
        Figure::Line(line) => vec![line.p0, line.p1],
        Figure::Cubic(cubic) => (0..=CURVE_SAMPLE_COUNT)
            .map(|i| cubic.eval(i as f64 / steps))
            .collect(),
        Figure::Quad(quad) => (0..=CURVE_SAMPLE_COUNT)
            .map(|i| quad.eval(i as f64 / steps))
            .collect(),
    }
}

/// Even-odd ray cast towards +x
pub fn is_point_inside_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let Some(mut previous) = polygon.last().copied() else {
        return false;
    };

    for &current in polygon {
        if (current.y > point.y) != (previous.y > point.y) {
            let x_intersect =
                (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y)
                    + current.x;
            if point.x < x_intersect {
                inside = !inside;
            }
        }
        previous = current;
    }

    inside
}

/// How many other polygons contain the first point of `polygons[index]`.
///
/// Not used by [`correct`]; available for nesting-based winding analysis.
pub fn containment_depth(index: usize, polygons: &[Vec<Point>]) -> usize {
    let Some(test_point) = polygons.get(index).and_then(|polygon| polygon.first()) else {
        return 0;
    };

    polygons
        .iter()
        .enumerate()
        .filter(|(other, polygon)| *other != index && is_point_inside_polygon(*test_point, polygon))
        .count()
}

/// Same figure count and every point within [`DUPLICATE_EPSILON`], figure by
/// figure. A contour traced from another start vertex or in the opposite
/// direction is a different shape.
pub fn shapes_equal(a: &Shape, b: &Shape) -> bool {
    a.figures.len() == b.figures.len()
        && a.figures.iter().zip(&b.figures).all(|(fa, fb)| {
            let (pa, pb) = (fa.points(), fb.points());
            pa.len() == pb.len()
                && pa.iter().zip(&pb).all(|(p, q)| {
                    (p.x - q.x).abs() <= DUPLICATE_EPSILON && (p.y - q.y).abs() <= DUPLICATE_EPSILON
                })
        })
}

/// Drop every shape that has an equal counterpart anywhere else in the list,
/// including the first occurrence
pub fn remove_all_duplicates(shapes: &[Shape]) -> Vec<Shape> {
    shapes
        .iter()
        .enumerate()
        .filter(|(index, shape)| {
            !shapes
                .iter()
                .enumerate()
                .any(|(other, candidate)| other != *index && shapes_equal(shape, candidate))
        })
        .map(|(_, shape)| shape.clone())
        .collect()
}

/// Keep the first occurrence of each shape
pub fn deduplicate_shapes(shapes: &[Shape]) -> Vec<Shape> {
    let mut unique: Vec<Shape> = Vec::new();
    for shape in shapes {
        if !unique.iter().any(|existing| shapes_equal(existing, shape)) {
            unique.push(shape.clone());
        }
    }
    unique
}

/// Traverse the shape the other way round
pub fn reverse_shape_winding(shape: &Shape) -> Shape {
    Shape {
        figures: shape.figures.iter().rev().map(Figure::reversed).collect(),
        is_closed: shape.is_closed,
    }
}

/// Remove duplicated closed shapes.
///
/// Without closed shapes, or when no closed shape is duplicated, the input is
/// returned as is. Otherwise the surviving closed shapes come first, followed
/// by the open shapes; no shape's winding is changed.
pub fn correct(shapes: &[Shape]) -> Vec<Shape> {
    let (closed, open): (Vec<Shape>, Vec<Shape>) =
        shapes.iter().cloned().partition(|shape| shape.is_closed);

    if closed.is_empty() {
        return shapes.to_vec();
    }

    let survivors = remove_all_duplicates(&closed);
    if survivors.len() == closed.len() {
        return shapes.to_vec();
    }

    debug!(
        "Removed {} duplicated closed shapes",
        closed.len() - survivors.len()
    );
    survivors.into_iter().chain(open).collect()
}
