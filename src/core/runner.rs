//! Application runner logic
//!
//! Turns parsed CLI arguments into a font build

use crate::core::cli::CliArgs;
use crate::core::config_file::{ConfigFile, ProjectFile};
use crate::core::library::{GeneratedFiles, IconFontLibrary};
use crate::logging;
use anyhow::{anyhow, Result};
use tracing::info;

/// Run one build with the given CLI arguments.
/// `--new-config` only sets up the user config directory.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory();
    }

    cli_args.validate().map_err(|message| anyhow!(message))?;

    // Dropping the guard flushes the log file
    let _guard = logging::init(cli_args.verbose, cli_args.log_file)?;

    let settings = ConfigFile::load();
    let project = cli_args
        .config
        .as_deref()
        .map(ProjectFile::load)
        .transpose()?;
    let options = cli_args.library_options(project, settings)?;

    info!(
        "Building {} from {} director{}",
        options.font.display_name(),
        options.svg_directories.len(),
        if options.svg_directories.len() == 1 { "y" } else { "ies" }
    );

    let mut library = IconFontLibrary::new(options);
    let files = library.generate_to_directory()?;
    print_summary(&files);
    Ok(())
}

fn print_summary(files: &GeneratedFiles) {
    println!("Font source: {}", files.ufo.display());
    println!("Code points: {}", files.codepoints.display());
    if let Some(binary) = &files.binary {
        println!("Font binary: {}", binary.display());
    }
}
