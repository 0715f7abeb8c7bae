//! Glyph-space normalization
//!
//! Maps icon artwork from its source coordinates into font units: the
//! outline is scaled uniformly so its height spans descender to ascender,
//! flipped to Y-up, left-aligned at x = 0, and rounded to whole units.

use crate::geometry::{aggregate_bounding_box, Figure, Shape};
use crate::svg::ViewBox;
use crate::winding;
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Vertical metrics the artwork is fitted into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub ascender: f64,
    pub descender: f64,
    pub units_per_em: f64,
    /// Carried along for callers; scaling is driven by the outline bounds
    pub view_box: Option<ViewBox>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ascender: 800.0,
            descender: -200.0,
            units_per_em: 1000.0,
            view_box: None,
        }
    }
}

/// One icon's outline in font units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGlyphData {
    pub advance_width: i32,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// Nothing left to measure, either from the start or after duplicate
    /// removal
    #[error("no shapes to normalize")]
    EmptyInput,
    #[error("outline bounds are degenerate ({width} x {height})")]
    ZeroDimension { width: f64, height: f64 },
    /// Scaled width does not fit a glyph advance
    #[error("advance width {0} is out of range")]
    AdvanceOutOfRange(f64),
}

pub fn normalize(
    shapes: &[Shape],
    options: &NormalizeOptions,
) -> Result<NormalizedGlyphData, NormalizeError> {
    if shapes.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }

    let shapes = winding::correct(shapes);
    let bbox = aggregate_bounding_box(&shapes).ok_or(NormalizeError::EmptyInput)?;

    let (width, height) = (bbox.width(), bbox.height());
    if width == 0.0 || height == 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(NormalizeError::ZeroDimension { width, height });
    }

    let scale = (options.ascender - options.descender) / height;
    let placement = Affine::translate((-bbox.x0 * scale, options.descender + bbox.y1 * scale))
        * Affine::scale_non_uniform(scale, -scale);
    debug!(
        "Normalizing {} shapes, bounds {}x{}, scale {:.4}",
        shapes.len(),
        width,
        height,
        scale
    );

    let advance = round_half_up(width * scale);
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&advance) {
        return Err(NormalizeError::AdvanceOutOfRange(advance));
    }

    let shapes = shapes
        .iter()
        .map(|shape| shape.map_figures(|figure| place_figure(figure, placement)))
        .collect();

    Ok(NormalizedGlyphData {
        advance_width: advance as i32,
        shapes,
    })
}

fn place_figure(figure: &Figure, placement: Affine) -> Figure {
    figure
        .transformed(placement)
        .map_points(|p| Point::new(round_coordinate(p.x), round_coordinate(p.y)))
}

/// Snap to six decimals first so values that differ only by arithmetic noise
/// land on the same integer
fn round_coordinate(value: f64) -> f64 {
    round_half_up(round_half_up(value * 1e6) / 1e6)
}

/// Ties go towards positive infinity: 2.5 -> 3, -2.5 -> -2
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Shape {
        let corners = [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        Shape::closed(
            (0..4)
                .map(|i| Figure::line(corners[i], corners[(i + 1) % 4]))
                .collect(),
        )
    }

    fn bounds(data: &NormalizedGlyphData) -> Rect {
        aggregate_bounding_box(&data.shapes).unwrap()
    }

    #[test]
    fn square_fills_font_height() {
        let data = normalize(&[rect(0.0, 0.0, 100.0, 100.0)], &NormalizeOptions::default()).unwrap();
        assert_eq!(data.advance_width, 1000);
        assert_eq!(bounds(&data), Rect::new(0.0, -200.0, 1000.0, 800.0));
        assert!(data.shapes[0].is_closed);
        // source top-left lands on the ascender
        assert_eq!(data.shapes[0].figures[0].start(), Point::new(0.0, 800.0));
        assert_eq!(data.shapes[0].figures[1].end(), Point::new(1000.0, -200.0));
    }

    #[test]
    fn width_follows_aspect_ratio() {
        let options = NormalizeOptions::default();
        let tall = normalize(&[rect(0.0, 0.0, 50.0, 100.0)], &options).unwrap();
        assert_eq!(tall.advance_width, 500);
        let wide = normalize(&[rect(0.0, 0.0, 200.0, 100.0)], &options).unwrap();
        assert_eq!(wide.advance_width, 2000);
        let icon = normalize(&[rect(0.0, 0.0, 448.0, 512.0)], &options).unwrap();
        assert_eq!(icon.advance_width, 875);
    }

    #[test]
    fn offset_artwork_is_left_aligned() {
        let data = normalize(&[rect(50.0, 50.0, 100.0, 100.0)], &NormalizeOptions::default()).unwrap();
        assert_eq!(bounds(&data), Rect::new(0.0, -200.0, 1000.0, 800.0));
    }

    #[test]
    fn duplicated_backgrounds_do_not_count() {
        let shapes = vec![
            rect(0.0, 0.0, 512.0, 512.0),
            rect(0.0, 0.0, 512.0, 512.0),
            rect(100.0, 100.0, 50.0, 100.0),
        ];
        let data = normalize(&shapes, &NormalizeOptions::default()).unwrap();
        assert_eq!(data.shapes.len(), 1);
        assert_eq!(data.advance_width, 500);
    }

    #[test]
    fn every_coordinate_is_integral() {
        let curve = Shape::closed(vec![
            Figure::cubic(
                Point::new(0.0, 0.0),
                Point::new(3.3, 17.1),
                Point::new(21.7, 9.9),
                Point::new(33.3, 0.0),
            ),
            Figure::line(Point::new(33.3, 0.0), Point::new(0.0, 0.0)),
        ]);
        let data = normalize(&[curve], &NormalizeOptions::default()).unwrap();
        for figure in &data.shapes[0].figures {
            for p in figure.points() {
                assert_eq!(p.x, p.x.round());
                assert_eq!(p.y, p.y.round());
            }
        }
    }

    #[test]
    fn rounding_erases_noise_and_ties_go_up() {
        assert_eq!(round_coordinate(150.4999999998), 151.0);
        assert_eq!(round_coordinate(2.5), 3.0);
        assert_eq!(round_coordinate(-2.5), -2.0);
        assert_eq!(round_coordinate(-2.6), -3.0);
    }

    #[test]
    fn degenerate_input_is_rejected() {
        let options = NormalizeOptions::default();
        assert_eq!(normalize(&[], &options), Err(NormalizeError::EmptyInput));
        assert_eq!(
            normalize(&[Shape::default()], &options),
            Err(NormalizeError::EmptyInput)
        );

        let flat = Shape::open(vec![Figure::line(Point::new(0.0, 5.0), Point::new(10.0, 5.0))]);
        assert!(matches!(
            normalize(&[flat], &options),
            Err(NormalizeError::ZeroDimension { height, .. }) if height == 0.0
        ));

        let thin = rect(5.0, 0.0, 0.0, 10.0);
        assert!(matches!(
            normalize(&[thin], &options),
            Err(NormalizeError::ZeroDimension { width, .. }) if width == 0.0
        ));
    }

    #[test]
    fn advance_beyond_i32_is_rejected() {
        let sliver = rect(0.0, 0.0, 1e9, 1.0);
        assert_eq!(
            normalize(&[sliver], &NormalizeOptions::default()),
            Err(NormalizeError::AdvanceOutOfRange(1e12))
        );

        let long = rect(0.0, 0.0, 2_000_000.0, 1000.0);
        assert_eq!(
            normalize(&[long], &NormalizeOptions::default())
                .unwrap()
                .advance_width,
            2_000_000
        );
    }

    #[test]
    fn everything_duplicated_is_empty() {
        let shapes = vec![rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 10.0)];
        assert_eq!(
            normalize(&shapes, &NormalizeOptions::default()),
            Err(NormalizeError::EmptyInput)
        );
    }
}
