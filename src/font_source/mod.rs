//! Font source data structures
//!
//! Font metadata, glyph naming and the assembly of normalized icons into a
//! font with ligature substitutions.

pub mod assembler;
pub mod metrics;
pub mod naming;

pub use assembler::{
    build_substitutions, create_font, create_glyph, outline_for, Glyph, GlyphDefinition,
    GlyphKind, IconFont, LigatureSubstitution,
};
pub use metrics::FontOptions;
pub use naming::{icon_glyph_name, NOTDEF};
