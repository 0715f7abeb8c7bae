//! Font-level metadata
//!
//! Family and style names plus the vertical metrics every icon is fitted
//! into.

use crate::normalize::NormalizeOptions;
use norad::Font;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ASCENDER: f64 = 800.0;
pub const DEFAULT_DESCENDER: f64 = -200.0;
pub const DEFAULT_UNITS_PER_EM: f64 = 1000.0;
pub const DEFAULT_STYLE_NAME: &str = "Regular";

/// Font information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontOptions {
    pub family_name: String,
    pub style_name: String,
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            family_name: "Icons".to_string(),
            style_name: DEFAULT_STYLE_NAME.to_string(),
            units_per_em: DEFAULT_UNITS_PER_EM,
            ascender: DEFAULT_ASCENDER,
            descender: DEFAULT_DESCENDER,
        }
    }
}

impl FontOptions {
    /// Read font info back from a UFO, falling back to the defaults for
    /// anything missing
    pub fn from_norad_font(font: &Font) -> Self {
        let units_per_em = font
            .font_info
            .units_per_em
            .map(|v| v.to_string().parse().unwrap_or(DEFAULT_UNITS_PER_EM))
            .unwrap_or(DEFAULT_UNITS_PER_EM);

        Self {
            family_name: Self::extract_string_field(
                &font.font_info,
                |info| &info.family_name,
                "Untitled",
            ),
            style_name: Self::extract_string_field(
                &font.font_info,
                |info| &info.style_name,
                DEFAULT_STYLE_NAME,
            ),
            units_per_em,
            ascender: font.font_info.ascender.unwrap_or(DEFAULT_ASCENDER),
            descender: font.font_info.descender.unwrap_or(DEFAULT_DESCENDER),
        }
    }

    /// Helper to extract string fields with defaults
    fn extract_string_field<F>(font_info: &norad::FontInfo, getter: F, default: &str) -> String
    where
        F: Fn(&norad::FontInfo) -> &Option<String>,
    {
        getter(font_info)
            .as_ref()
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Family and style joined, skipping empty parts
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }

    pub fn to_norad_font_info(&self) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        if !self.family_name.is_empty() {
            info.family_name = Some(self.family_name.clone());
        }
        if !self.style_name.is_empty() {
            info.style_name = Some(self.style_name.clone());
        }
        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(self.ascender);
        info.descender = Some(self.descender);
        info
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            ascender: self.ascender,
            descender: self.descender,
            units_per_em: self.units_per_em,
            view_box: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_skips_empty_parts() {
        let mut options = FontOptions {
            family_name: "Glyphs".to_string(),
            ..Default::default()
        };
        assert_eq!(options.display_name(), "Glyphs Regular");
        options.style_name.clear();
        assert_eq!(options.display_name(), "Glyphs");
        options.family_name.clear();
        assert_eq!(options.display_name(), "Untitled Font");
    }

    #[test]
    fn font_info_round_trip() {
        let options = FontOptions {
            family_name: "Glyphs".to_string(),
            style_name: "Bold".to_string(),
            units_per_em: 2048.0,
            ascender: 1900.0,
            descender: -148.0,
        };
        let mut font = Font::new();
        font.font_info = options.to_norad_font_info();
        assert_eq!(FontOptions::from_norad_font(&font), options);
    }

    #[test]
    fn missing_font_info_uses_defaults() {
        let options = FontOptions::from_norad_font(&Font::new());
        assert_eq!(options.family_name, "Untitled");
        assert_eq!(options.style_name, DEFAULT_STYLE_NAME);
        assert_eq!(options.units_per_em, DEFAULT_UNITS_PER_EM);
        assert_eq!(options.ascender, DEFAULT_ASCENDER);
    }
}
