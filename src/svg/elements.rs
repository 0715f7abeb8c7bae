//! Basic shape elements
//!
//! `rect`, `circle`, `ellipse`, `line`, `polygon` and `polyline` are turned
//! into the same figure vocabulary as path data. Elements with degenerate
//! dimensions yield no shape.

use super::tokenizer::numbers;
use crate::geometry::curves::{arc_figures, circle_figures, ellipse_figures};
use crate::geometry::{Figure, Shape};
use kurbo::Point;

/// Four lines, clockwise in source space, or a rounded outline when a corner
/// radius is given
pub fn rect_shapes(x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) -> Vec<Shape> {
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    if rx > 0.0 || ry > 0.0 {
        return vec![rounded_rect(x, y, width, height, rx, ry)];
    }

    let corners = [
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ];
    vec![Shape::closed(closed_polyline(&corners))]
}

/// Straight edges alternating with quarter arcs, clockwise from the top edge
fn rounded_rect(x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) -> Shape {
    // a missing radius borrows the other one as given, then both clamp
    let (rx, ry) = (
        (if rx > 0.0 { rx } else { ry }).min(width / 2.0),
        (if ry > 0.0 { ry } else { rx }).min(height / 2.0),
    );
    let right = x + width;
    let bottom = y + height;

    let mut figures = Vec::new();
    let edge = |from: Point, to: Point, corner_end: Point, figures: &mut Vec<Figure>| {
        figures.push(Figure::line(from, to));
        figures.extend(arc_figures(to, rx, ry, 0.0, false, true, corner_end));
    };

    edge(
        Point::new(x + rx, y),
        Point::new(right - rx, y),
        Point::new(right, y + ry),
        &mut figures,
    );
    edge(
        Point::new(right, y + ry),
        Point::new(right, bottom - ry),
        Point::new(right - rx, bottom),
        &mut figures,
    );
    edge(
        Point::new(right - rx, bottom),
        Point::new(x + rx, bottom),
        Point::new(x, bottom - ry),
        &mut figures,
    );
    edge(
        Point::new(x, bottom - ry),
        Point::new(x, y + ry),
        Point::new(x + rx, y),
        &mut figures,
    );

    Shape::closed(figures)
}

pub fn circle_shapes(cx: f64, cy: f64, r: f64) -> Vec<Shape> {
    if r <= 0.0 {
        return Vec::new();
    }
    vec![Shape::closed(circle_figures(Point::new(cx, cy), r))]
}

pub fn ellipse_shapes(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<Shape> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    vec![Shape::closed(ellipse_figures(Point::new(cx, cy), rx, ry))]
}

pub fn line_shapes(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Shape> {
    vec![Shape::open(vec![Figure::line(
        Point::new(x1, y1),
        Point::new(x2, y2),
    )])]
}

/// Closed outline through every point of a `points` list; needs three points
pub fn polygon_shapes(points: &str) -> Vec<Shape> {
    let points = point_list(points);
    if points.len() < 3 {
        return Vec::new();
    }
    vec![Shape::closed(closed_polyline(&points))]
}

/// Open run of segments through a `points` list; needs two points
pub fn polyline_shapes(points: &str) -> Vec<Shape> {
    let points = point_list(points);
    if points.len() < 2 {
        return Vec::new();
    }
    let figures = points
        .windows(2)
        .map(|pair| Figure::line(pair[0], pair[1]))
        .collect();
    vec![Shape::open(figures)]
}

fn point_list(text: &str) -> Vec<Point> {
    numbers(text)
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Lines joining consecutive points and wrapping back to the first
fn closed_polyline(points: &[Point]) -> Vec<Figure> {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&from, &to)| Figure::line(from, to))
        .collect()
}
