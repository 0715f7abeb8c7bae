//! Arc, circle, and ellipse conversion to cubic curves
//!
//! kurbo does the actual approximation; this module turns its path elements
//! into [`Figure`]s and keeps endpoints exact so neighbouring figures stay
//! contiguous.

use super::figure::Figure;
use kurbo::{Arc, Circle, Ellipse, PathEl, Point, Shape as _, SvgArc, Vec2};

/// Approximation tolerance used for every arc-like conversion, in source units
pub const CURVE_TOLERANCE: f64 = 0.1;

/// Convert an SVG elliptical arc into cubic curves.
///
/// Radii are taken by absolute value. Zero radii degrade to a straight line;
/// coincident endpoints produce nothing.
#[allow(clippy::too_many_arguments)]
pub fn arc_figures(
    from: Point,
    rx: f64,
    ry: f64,
    x_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Vec<Figure> {
    let svg_arc = SvgArc {
        from,
        to,
        radii: Vec2::new(rx.abs(), ry.abs()),
        x_rotation: x_rotation_deg.to_radians(),
        large_arc,
        sweep,
    };

    let Some(arc) = Arc::from_svg_arc(&svg_arc) else {
        if from == to {
            return Vec::new();
        }
        return vec![Figure::line(from, to)];
    };

    let mut figures = Vec::new();
    let mut current = from;
    for el in arc.append_iter(CURVE_TOLERANCE) {
        if let PathEl::CurveTo(p1, p2, p3) = el {
            figures.push(Figure::cubic(current, p1, p2, p3));
            current = p3;
        }
    }

    if let Some(last) = figures.last_mut() {
        *last = last.with_end(to);
    }
    figures
}

/// Closed run of cubic curves approximating a circle
pub fn circle_figures(center: Point, radius: f64) -> Vec<Figure> {
    figures_from_elements(Circle::new(center, radius).path_elements(CURVE_TOLERANCE))
}

/// Closed run of cubic curves approximating an axis-aligned ellipse
pub fn ellipse_figures(center: Point, rx: f64, ry: f64) -> Vec<Figure> {
    figures_from_elements(
        Ellipse::new(center, Vec2::new(rx, ry), 0.0).path_elements(CURVE_TOLERANCE),
    )
}

/// Flatten a single-subpath element stream into figures.
///
/// A trailing `ClosePath` snaps the final end point onto the start point when
/// they already coincide, and otherwise appends a closing line.
fn figures_from_elements(elements: impl Iterator<Item = PathEl>) -> Vec<Figure> {
    let mut figures: Vec<Figure> = Vec::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;

    for el in elements {
        match el {
            PathEl::MoveTo(p) => {
                start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                figures.push(Figure::line(current, p));
                current = p;
            }
            PathEl::QuadTo(p1, p2) => {
                figures.push(Figure::quad(current, p1, p2));
                current = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                figures.push(Figure::cubic(current, p1, p2, p3));
                current = p3;
            }
            PathEl::ClosePath => {
                if current.distance(start) > 1e-9 {
                    figures.push(Figure::line(current, start));
                } else if let Some(last) = figures.last_mut() {
                    *last = last.with_end(start);
                }
                current = start;
            }
        }
    }
    figures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous_loop(figures: &[Figure]) {
        assert!(!figures.is_empty());
        for pair in figures.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(figures.last().unwrap().end(), figures[0].start());
    }

    #[test]
    fn circle_is_closed_run_of_cubics() {
        let figures = circle_figures(Point::new(50.0, 50.0), 40.0);
        assert!(figures.len() >= 4);
        assert!(figures.iter().all(|f| matches!(f, Figure::Cubic(_))));
        assert_contiguous_loop(&figures);
    }

    #[test]
    fn ellipse_spans_its_radii() {
        let figures = ellipse_figures(Point::new(0.0, 0.0), 20.0, 10.0);
        assert_contiguous_loop(&figures);
        let bbox = figures
            .iter()
            .map(Figure::bounding_box)
            .reduce(|a, b| a.union(b))
            .unwrap();
        assert!((bbox.width() - 40.0).abs() < 0.5);
        assert!((bbox.height() - 20.0).abs() < 0.5);
    }

    #[test]
    fn arc_ends_exactly_on_target() {
        let to = Point::new(120.0, 30.0);
        let figures = arc_figures(Point::new(100.0, 30.0), 10.0, 10.0, 0.0, false, true, to);
        assert!(!figures.is_empty());
        assert_eq!(figures[0].start(), Point::new(100.0, 30.0));
        assert_eq!(figures.last().unwrap().end(), to);
    }

    #[test]
    fn zero_radius_arc_is_a_line() {
        let figures = arc_figures(
            Point::new(0.0, 0.0),
            0.0,
            0.0,
            0.0,
            false,
            false,
            Point::new(5.0, 5.0),
        );
        assert_eq!(
            figures,
            vec![Figure::line(Point::new(0.0, 0.0), Point::new(5.0, 5.0))]
        );
        assert!(arc_figures(Point::ZERO, 5.0, 5.0, 0.0, false, false, Point::ZERO).is_empty());
    }
}
