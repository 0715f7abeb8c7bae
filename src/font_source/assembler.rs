//! Glyph and ligature assembly
//!
//! Turns normalized icon outlines into glyphs and collects the `liga`
//! substitutions that let a typed word render as its icon.

use super::metrics::FontOptions;
use super::naming::{character_glyph_name, claim_unique_name, NOTDEF};
use crate::geometry::Figure;
use crate::normalize::NormalizedGlyphData;
use indexmap::IndexSet;
use kurbo::BezPath;
use std::collections::HashSet;
use tracing::{debug, info};

/// One icon handed over by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDefinition {
    /// Unique within a font
    pub name: String,
    pub unicode: u32,
    pub ligature: Option<String>,
    pub normalized_data: NormalizedGlyphData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    Notdef,
    /// Empty placeholder for a character typed in a ligature
    Character,
    Icon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub name: String,
    pub unicode: u32,
    pub advance_width: i32,
    pub outline: BezPath,
    pub kind: GlyphKind,
}

impl Glyph {
    fn empty(name: String, unicode: u32, kind: GlyphKind) -> Self {
        Self {
            name,
            unicode,
            advance_width: 0,
            outline: BezPath::new(),
            kind,
        }
    }
}

/// Typing the glyphs at `components` in order shows the glyph at `glyph`.
/// Both refer to indices in [`IconFont::glyphs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LigatureSubstitution {
    pub components: Vec<usize>,
    pub glyph: usize,
}

/// An assembled font, ready for an encoder
#[derive(Debug, Clone, PartialEq)]
pub struct IconFont {
    pub options: FontOptions,
    pub glyphs: Vec<Glyph>,
    pub substitutions: Vec<LigatureSubstitution>,
}

impl IconFont {
    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.iter().find(|glyph| glyph.name == name)
    }

    pub fn icon_glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter().filter(|glyph| glyph.kind == GlyphKind::Icon)
    }
}

/// Outline drawing instructions for normalized shapes.
///
/// Shapes without figures are skipped entirely.
pub fn outline_for(data: &NormalizedGlyphData) -> BezPath {
    let mut path = BezPath::new();
    for shape in &data.shapes {
        let Some(first) = shape.figures.first() else {
            continue;
        };
        path.move_to(first.start());
        for figure in &shape.figures {
            match figure {
                Figure::Line(line) => path.line_to(line.p1),
                Figure::Cubic(cubic) => path.curve_to(cubic.p1, cubic.p2, cubic.p3),
                Figure::Quad(quad) => path.quad_to(quad.p1, quad.p2),
            }
        }
        if shape.is_closed {
            path.close_path();
        }
    }
    path
}

pub fn create_glyph(definition: &GlyphDefinition) -> Glyph {
    Glyph {
        name: definition.name.clone(),
        unicode: definition.unicode,
        advance_width: definition.normalized_data.advance_width,
        outline: outline_for(&definition.normalized_data),
        kind: GlyphKind::Icon,
    }
}

/// Assemble `.notdef`, one placeholder per distinct ligature character, then
/// the icons in the order given
pub fn create_font(definitions: &[GlyphDefinition], options: &FontOptions) -> IconFont {
    let mut glyphs = vec![Glyph::empty(NOTDEF.to_string(), 0, GlyphKind::Notdef)];
    glyphs.extend(character_glyphs(definitions));
    glyphs.extend(definitions.iter().map(create_glyph));

    let substitutions = build_substitutions(definitions, &glyphs);
    info!(
        "Assembled {} glyphs with {} ligatures",
        glyphs.len(),
        substitutions.len()
    );

    IconFont {
        options: options.clone(),
        glyphs,
        substitutions,
    }
}

fn ligature_text(definition: &GlyphDefinition) -> Option<&str> {
    definition
        .ligature
        .as_deref()
        .filter(|ligature| !ligature.is_empty())
}

/// One zero-width empty glyph per distinct ligature character, in first-seen
/// order across the whole batch
fn character_glyphs(definitions: &[GlyphDefinition]) -> Vec<Glyph> {
    let characters: IndexSet<char> = definitions
        .iter()
        .filter_map(ligature_text)
        .flat_map(str::chars)
        .collect();

    let mut taken: HashSet<String> = definitions
        .iter()
        .map(|definition| definition.name.clone())
        .collect();
    taken.insert(NOTDEF.to_string());

    characters
        .into_iter()
        .map(|ch| {
            let name = claim_unique_name(character_glyph_name(ch, &taken), &mut taken);
            Glyph::empty(name, ch as u32, GlyphKind::Character)
        })
        .collect()
}

/// Resolve ligatures against `glyphs`.
///
/// A definition whose icon glyph or any character glyph cannot be found is
/// skipped; this never fails.
pub fn build_substitutions(
    definitions: &[GlyphDefinition],
    glyphs: &[Glyph],
) -> Vec<LigatureSubstitution> {
    let find = |kind: GlyphKind, unicode: u32| {
        glyphs
            .iter()
            .position(|glyph| glyph.kind == kind && glyph.unicode == unicode)
    };

    let mut substitutions = Vec::new();
    for definition in definitions {
        let Some(ligature) = ligature_text(definition) else {
            continue;
        };
        let Some(glyph) = find(GlyphKind::Icon, definition.unicode) else {
            debug!("No icon glyph for ligature '{}', skipping", ligature);
            continue;
        };
        let components: Option<Vec<usize>> = ligature
            .chars()
            .map(|ch| find(GlyphKind::Character, ch as u32))
            .collect();
        match components {
            Some(components) => substitutions.push(LigatureSubstitution { components, glyph }),
            None => debug!(
                "Ligature '{}' has characters without glyphs, skipping",
                ligature
            ),
        }
    }
    substitutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use kurbo::{PathEl, Point};

    fn square_data() -> NormalizedGlyphData {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        NormalizedGlyphData {
            advance_width: 100,
            shapes: vec![Shape::closed(
                (0..4)
                    .map(|i| Figure::line(corners[i], corners[(i + 1) % 4]))
                    .collect(),
            )],
        }
    }

    fn definition(name: &str, unicode: u32, ligature: Option<&str>) -> GlyphDefinition {
        GlyphDefinition {
            name: name.to_string(),
            unicode,
            ligature: ligature.map(str::to_string),
            normalized_data: square_data(),
        }
    }

    #[test]
    fn outline_emits_move_segments_and_close() {
        let mut data = square_data();
        data.shapes.insert(0, Shape::default());
        data.shapes.push(Shape::open(vec![
            Figure::quad(Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 0.0)),
            Figure::cubic(
                Point::new(10.0, 0.0),
                Point::new(11.0, 1.0),
                Point::new(12.0, 1.0),
                Point::new(13.0, 0.0),
            ),
        ]));

        let elements = outline_for(&data).elements().to_vec();
        assert_eq!(
            elements,
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(100.0, 0.0)),
                PathEl::LineTo(Point::new(100.0, 100.0)),
                PathEl::LineTo(Point::new(0.0, 100.0)),
                PathEl::LineTo(Point::new(0.0, 0.0)),
                PathEl::ClosePath,
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(5.0, 5.0), Point::new(10.0, 0.0)),
                PathEl::CurveTo(
                    Point::new(11.0, 1.0),
                    Point::new(12.0, 1.0),
                    Point::new(13.0, 0.0)
                ),
            ]
        );
    }

    #[test]
    fn glyph_carries_definition_fields() {
        let glyph = create_glyph(&definition("home", 0xE000, None));
        assert_eq!(glyph.name, "home");
        assert_eq!(glyph.unicode, 0xE000);
        assert_eq!(glyph.advance_width, 100);
        assert_eq!(glyph.kind, GlyphKind::Icon);
        assert!(!glyph.outline.elements().is_empty());
    }

    #[test]
    fn font_order_is_notdef_characters_icons() {
        let definitions = vec![
            definition("star", 0xE000, Some("star")),
            definition("arrow", 0xE001, Some("arrow")),
            definition("plain", 0xE002, None),
        ];
        let font = create_font(&definitions, &FontOptions::default());

        let names: Vec<&str> = font.glyphs.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![".notdef", "s", "t", "a", "r", "o", "w", "star", "arrow", "plain"]
        );
        assert_eq!(font.glyphs[0].unicode, 0);
        assert_eq!(font.glyphs[0].advance_width, 0);
        assert!(font.glyphs[0].outline.elements().is_empty());
        assert!(font.glyphs[1..7].iter().all(|g| g.advance_width == 0));

        assert_eq!(
            font.substitutions,
            vec![
                LigatureSubstitution {
                    components: vec![1, 2, 3, 4],
                    glyph: 7
                },
                LigatureSubstitution {
                    components: vec![3, 4, 4, 5, 6],
                    glyph: 8
                },
            ]
        );
    }

    #[test]
    fn character_names_avoid_icon_names() {
        let definitions = vec![definition("a", 0xE000, Some("ab"))];
        let font = create_font(&definitions, &FontOptions::default());
        assert_eq!(font.glyphs[1].name, "uni0061");
        assert_eq!(font.glyphs[2].name, "b");
        assert_eq!(font.glyph("a").map(|g| g.kind), Some(GlyphKind::Icon));
    }

    #[test]
    fn unresolvable_ligatures_are_skipped() {
        let definitions = vec![
            definition("home", 0xE000, Some("home")),
            definition("cog", 0xE001, Some("cog")),
        ];
        let font = create_font(&definitions, &FontOptions::default());

        // drop the 'g' placeholder: the "cog" rule can no longer resolve
        let glyphs: Vec<Glyph> = font
            .glyphs
            .iter()
            .filter(|g| !(g.kind == GlyphKind::Character && g.unicode == 'g' as u32))
            .cloned()
            .collect();
        let substitutions = build_substitutions(&definitions, &glyphs);
        assert_eq!(substitutions.len(), 1);
        assert_eq!(glyphs[substitutions[0].glyph].name, "home");

        // no icon glyph with the definition's code point
        let orphan = vec![definition("ghost", 0xE100, Some("ho"))];
        assert!(build_substitutions(&orphan, &font.glyphs).is_empty());
    }

    #[test]
    fn empty_ligatures_are_ignored() {
        let definitions = vec![definition("blank", 0xE000, Some(""))];
        let font = create_font(&definitions, &FontOptions::default());
        assert_eq!(font.glyphs.len(), 2);
        assert!(font.substitutions.is_empty());
        assert_eq!(font.icon_glyphs().count(), 1);
    }
}
