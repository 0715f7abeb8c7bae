//! Glyph names
//!
//! Names end up in `features.fea`, so they stay within the feature-file
//! glyph-name alphabet: ASCII letters, digits, `.`, `_` and `-`, not starting
//! with a digit, `.` or `-`.

use std::collections::HashSet;

pub const NOTDEF: &str = ".notdef";

/// Turn an icon file stem into a usable glyph name
pub fn icon_glyph_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        return "_".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-') {
        name.insert(0, '_');
    }
    name
}

/// Name for the placeholder glyph a ligature character maps to.
///
/// ASCII letters use the letter itself unless an icon already claimed it.
pub fn character_glyph_name(ch: char, taken: &HashSet<String>) -> String {
    if ch.is_ascii_alphabetic() && !taken.contains(&ch.to_string()) {
        return ch.to_string();
    }
    unicode_glyph_name(ch)
}

/// `uniXXXX` inside the Basic Multilingual Plane, `uXXXXX` beyond it
pub fn unicode_glyph_name(ch: char) -> String {
    let code = ch as u32;
    if code <= 0xFFFF {
        format!("uni{code:04X}")
    } else {
        format!("u{code:05X}")
    }
}

/// Claim `candidate`, appending `.1`, `.2`, ... until the name is free
pub fn claim_unique_name(candidate: String, taken: &mut HashSet<String>) -> String {
    let mut name = candidate.clone();
    let mut counter = 1;
    while taken.contains(&name) {
        name = format!("{candidate}.{counter}");
        counter += 1;
    }
    taken.insert(name.clone());
    name
}
