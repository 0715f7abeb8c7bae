//! UFO file I/O operations

use crate::font_source::IconFont;
use anyhow::{Context, Result};
use norad::Font;
use std::path::Path;
use tracing::info;

/// Write an assembled font as a UFO package, replacing any existing one
pub fn write_ufo(font: &IconFont, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("Failed to replace existing UFO at {}", path.display()))?;
    }

    font.to_norad_font()
        .save(path)
        .with_context(|| format!("Failed to write UFO to {}", path.display()))?;
    info!("Wrote {} glyphs to {}", font.glyphs.len(), path.display());
    Ok(())
}

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let font = Font::load(path)?;
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{create_font, FontOptions, GlyphDefinition};
    use crate::geometry::{Figure, Shape};
    use crate::normalize::NormalizedGlyphData;
    use kurbo::Point;
    use tempfile::TempDir;

    fn triangle_font() -> IconFont {
        let definition = GlyphDefinition {
            name: "tri".to_string(),
            unicode: 0xE000,
            ligature: Some("tri".to_string()),
            normalized_data: NormalizedGlyphData {
                advance_width: 1000,
                shapes: vec![Shape::closed(vec![
                    Figure::line(Point::new(0.0, 0.0), Point::new(1000.0, 0.0)),
                    Figure::line(Point::new(1000.0, 0.0), Point::new(500.0, 800.0)),
                    Figure::line(Point::new(500.0, 800.0), Point::new(0.0, 0.0)),
                ])],
            },
        };
        let options = FontOptions {
            family_name: "Test Icons".to_string(),
            ..Default::default()
        };
        create_font(&[definition], &options)
    }

    #[test]
    fn written_ufo_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("TestIcons.ufo");
        let font = triangle_font();

        write_ufo(&font, &path).unwrap();
        // a second write replaces the first
        write_ufo(&font, &path).unwrap();

        let loaded = load_ufo_from_path(&path).unwrap();
        assert_eq!(loaded.font_info.family_name.as_deref(), Some("Test Icons"));
        assert_eq!(loaded.font_info.ascender, Some(800.0));
        assert!(loaded.features.contains(r"sub \t \r \i by \tri;"));

        let layer = loaded.default_layer();
        assert_eq!(layer.len(), 5);
        let tri = layer.get_glyph("tri").unwrap();
        assert_eq!(tri.width, 1000.0);
        assert_eq!(tri.contours.len(), 1);
        assert_eq!(tri.contours[0].points.len(), 3);
        assert!(tri.codepoints.iter().any(|c| c == '\u{E000}'));
    }
}
