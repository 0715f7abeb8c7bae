//! Font output
//!
//! Everything that turns an assembled [`IconFont`](crate::font_source::IconFont)
//! into files: UFO sources with a `liga` feature, a compiled binary through
//! `fontc`, and the code point map.

pub mod compiler;
pub mod conversions;
pub mod export;
pub mod features;
pub mod ufo;

pub use compiler::FontCompiler;
pub use conversions::outline_to_contours;
pub use export::CodepointMap;
pub use features::liga_feature;
pub use ufo::{load_ufo_from_path, write_ufo};
