//! UFO format conversion utilities
//!
//! Conversion from assembled glyphs to norad's UFO types. Outlines are
//! kurbo paths; each sub-path becomes one UFO contour.

use super::features::liga_feature;
use crate::font_source::{Glyph, GlyphKind, IconFont};
use kurbo::{BezPath, PathEl, Point};
use norad::{Contour, ContourPoint, Font, PointType};
use tracing::warn;

impl Glyph {
    /// Convert to a norad glyph
    pub fn to_norad_glyph(&self) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(&self.name);
        glyph.width = f64::from(self.advance_width);

        if self.kind != GlyphKind::Notdef {
            match char::from_u32(self.unicode) {
                Some(codepoint) => {
                    glyph.codepoints.insert(codepoint);
                }
                None => warn!(
                    "Glyph '{}' has invalid code point {:#X}, leaving it unencoded",
                    self.name, self.unicode
                ),
            }
        }

        glyph.contours = outline_to_contours(&self.outline);
        glyph
    }
}

impl IconFont {
    /// Convert to a complete norad font, `liga` feature included
    pub fn to_norad_font(&self) -> Font {
        let mut font = Font::new();
        font.font_info = self.options.to_norad_font_info();
        font.features = liga_feature(self);

        let layer = font.default_layer_mut();
        for glyph in &self.glyphs {
            layer.insert_glyph(glyph.to_norad_glyph());
        }

        font
    }
}

/// Split an outline at every move and convert each piece
pub fn outline_to_contours(outline: &BezPath) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut current: Vec<PathEl> = Vec::new();

    for &element in outline.elements() {
        if matches!(element, PathEl::MoveTo(_)) && !current.is_empty() {
            contours.extend(to_contour(&current));
            current.clear();
        }
        current.push(element);
    }
    contours.extend(to_contour(&current));

    contours
}

/// Convert one sub-path, starting with a move, to a contour.
///
/// Open sub-paths start with a `move` point. Closed ones are cyclic: the
/// on-curve point that repeats the start is dropped and the first point takes
/// the type of the segment that returns to it.
fn to_contour(elements: &[PathEl]) -> Option<Contour> {
    let Some(PathEl::MoveTo(first)) = elements.first().copied() else {
        return None;
    };
    let is_closed = matches!(elements.last(), Some(PathEl::ClosePath));

    let mut points: Vec<ContourPoint> = Vec::new();
    let mut closing_type = PointType::Line;

    for element in &elements[1..] {
        match *element {
            PathEl::LineTo(p) => points.push(contour_point(p, PointType::Line)),
            PathEl::CurveTo(a, b, p) => {
                points.push(contour_point(a, PointType::OffCurve));
                points.push(contour_point(b, PointType::OffCurve));
                points.push(contour_point(p, PointType::Curve));
            }
            PathEl::QuadTo(a, p) => {
                points.push(contour_point(a, PointType::OffCurve));
                points.push(contour_point(p, PointType::QCurve));
            }
            PathEl::ClosePath | PathEl::MoveTo(_) => {}
        }
    }

    if is_closed {
        if let Some(last) = points.last() {
            if !matches!(last.typ, PointType::OffCurve) && Point::new(last.x, last.y) == first {
                closing_type = last.typ.clone();
                points.pop();
            }
        }
        points.insert(0, contour_point(first, closing_type));
    } else {
        points.insert(0, contour_point(first, PointType::Move));
    }

    Some(Contour::new(points, None))
}

fn contour_point(p: Point, typ: PointType) -> ContourPoint {
    ContourPoint::new(p.x, p.y, typ, false, None, None)
}
