//! Input file handling

pub mod loader;

pub use loader::{SvgLoader, SvgSource};
