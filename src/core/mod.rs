//! Core application functionality
//!
//! This module contains the build orchestration and everything around it:
//! - Command line parsing and option resolution
//! - User settings and project files
//! - The icon font library that drives the pipeline

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod library;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::{ConfigFile, ProjectFile};
pub use errors::LibraryError;
pub use library::{
    GeneratedFiles, GenerationResult, IconFontLibrary, LibraryOptions, UnicodeAssignment,
};
pub use runner::run_app;
