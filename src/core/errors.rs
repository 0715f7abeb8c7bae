//! Errors raised while building a font from a batch of icons

use crate::normalize::NormalizeError;
use crate::svg::SvgError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// None of the input directories held an SVG file
    #[error("no SVG files found in the specified directories")]
    NoSvgFiles,

    /// Manual unicode assignment has no entry for this icon
    #[error("no unicode mapping found for icon '{0}'")]
    UnmappedGlyph(String),

    /// Not a Unicode scalar value, or zero (reserved for `.notdef`)
    #[error("invalid code point {0:#X}")]
    InvalidCodePoint(u32),

    #[error("failed to parse {path}")]
    Svg {
        path: PathBuf,
        #[source]
        source: SvgError,
    },

    #[error("failed to normalize {path}")]
    Normalize {
        path: PathBuf,
        #[source]
        source: NormalizeError,
    },
}
