//! glyphforge
//!
//! Builds icon fonts from SVG files: path data is parsed into outlines,
//! cleaned of duplicate backgrounds, fitted to the font's vertical metrics
//! and assembled into a UFO with ligature substitutions.
pub mod core;
pub mod data;
pub mod font_source;
pub mod geometry;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod svg;
pub mod winding;
