//! OpenType feature code for ligature substitutions

use crate::font_source::IconFont;
use std::fmt::Write;

/// `liga` feature source for the font's substitutions, empty when there are
/// none
pub fn liga_feature(font: &IconFont) -> String {
    let rules: Vec<String> = font
        .substitutions
        .iter()
        .filter_map(|substitution| {
            let components = substitution
                .components
                .iter()
                .map(|&index| font.glyphs.get(index).map(|glyph| escaped(&glyph.name)))
                .collect::<Option<Vec<String>>>()?;
            let target = font.glyphs.get(substitution.glyph)?;
            Some(format!(
                "sub {} by {};",
                components.join(" "),
                escaped(&target.name)
            ))
        })
        .collect();

    if rules.is_empty() {
        return String::new();
    }

    let mut fea = String::from("languagesystem DFLT dflt;\n\nfeature liga {\n");
    for rule in rules {
        let _ = writeln!(fea, "    {rule}");
    }
    fea.push_str("} liga;\n");
    fea
}

/// Glyph names are written with a leading backslash so names like `table`
/// or `by` are never read as keywords
fn escaped(name: &str) -> String {
    format!("\\{name}")
}
