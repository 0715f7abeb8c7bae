//! Command line interface for glyphforge
//!
//! Handles parsing command line arguments, validating them, and merging them
//! with the project file and user settings into [`LibraryOptions`].

use crate::core::config_file::{
    parse_code_point, CodePointValue, ConfigFile, ProjectFile, UnicodeAssignmentFile,
};
use crate::core::library::{LibraryOptions, UnicodeAssignment, DEFAULT_START_CODE_POINT};
use crate::font_source::FontOptions;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// glyphforge CLI arguments
///
/// Examples:
///   glyphforge icons/                          # Build Icons.ufo from icons/*.svg
///   glyphforge icons/ -f "Shop Icons" -o dist  # Family name and output directory
///   glyphforge icons/ --start-code-point 0xF000
///   glyphforge icons/ --mapping codepoints.json
///   glyphforge --config icons.json --compile   # Project file, plus a binary font
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "glyphforge",
    version,
    about = "Build icon fonts from SVG files",
    long_about = "glyphforge turns a directory of SVG icons into a font source (UFO) with one glyph per icon. Each icon gets a code point and, optionally, a ligature so typing its file name shows the icon."
)]
pub struct CliArgs {
    /// Directories containing SVG icons
    #[clap(
        value_name = "DIR",
        help = "Directories containing SVG icons",
        long_help = "Directories containing SVG icons. Files are sorted by name; each file name becomes the icon's ligature. Paths that are not directories are skipped with a warning."
    )]
    pub inputs: Vec<PathBuf>,

    #[clap(long, short = 'o', value_name = "DIR", help = "Output directory")]
    pub output: Option<PathBuf>,

    #[clap(long, short = 'f', help = "Font family name")]
    pub family: Option<String>,

    #[clap(long, help = "Font style name [default: Regular]")]
    pub style: Option<String>,

    #[clap(long, help = "Ascender in font units [default: 800]")]
    pub ascender: Option<f64>,

    #[clap(
        long,
        allow_hyphen_values = true,
        help = "Descender in font units [default: -200]"
    )]
    pub descender: Option<f64>,

    #[clap(long, help = "Units per em [default: 1000]")]
    pub units_per_em: Option<f64>,

    /// First code point for automatic assignment
    #[clap(
        long,
        value_parser = parse_code_point,
        help = "First code point for automatic assignment [default: 0xE000]",
        long_help = "First code point for automatic assignment, as hexadecimal (0xE000, U+E000) or decimal. Icons get consecutive code points in file name order."
    )]
    pub start_code_point: Option<u32>,

    /// JSON file mapping icon names to code points
    #[clap(
        long,
        value_name = "FILE",
        conflicts_with = "start_code_point",
        help = "JSON file mapping icon names to code points",
        long_help = "JSON file mapping each icon's file name to its code point, e.g. {\"home\": \"0xF101\"}. Every icon must be listed."
    )]
    pub mapping: Option<PathBuf>,

    #[clap(long, help = "Do not register file names as ligatures")]
    pub no_ligatures: bool,

    #[clap(long, short = 'r', help = "Search input directories recursively")]
    pub recursive: bool,

    #[clap(long, help = "Also compile a binary font with fontc")]
    pub compile: bool,

    #[clap(long, help = "Stop at the first icon that cannot be processed")]
    pub strict: bool,

    /// Project file describing the icon font
    #[clap(
        long,
        short = 'c',
        value_name = "FILE",
        help = "Project file (JSON)",
        long_help = "JSON project file with any of: family_name, style_name, svg_directories, output_directory, ascender, descender, units_per_em, ligatures, recursive, unicode_assignment. Command line flags take precedence."
    )]
    pub config: Option<PathBuf>,

    #[clap(long, short = 'v', help = "Log debug output")]
    pub verbose: bool,

    #[clap(long, help = "Also write logs to the user config directory")]
    pub log_file: bool,

    /// Initialize user configuration directory with settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/glyphforge directory with a settings.json file holding the built-in defaults, and a logs directory."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        if self.inputs.is_empty() && self.config.is_none() {
            return Err(
                "No input directories given.\nPass one or more directories, or a project file with --config."
                    .to_string(),
            );
        }

        for (flag, path) in [("--config", &self.config), ("--mapping", &self.mapping)] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(format!(
                        "{flag} file does not exist: {}\nMake sure the path is correct and the file exists.",
                        path.display()
                    ));
                }
            }
        }

        if let Some(units_per_em) = self.units_per_em {
            if units_per_em <= 0.0 {
                return Err(format!(
                    "Units per em must be positive, got {units_per_em}"
                ));
            }
        }

        if let (Some(ascender), Some(descender)) = (self.ascender, self.descender) {
            if ascender <= descender {
                return Err(format!(
                    "Ascender ({ascender}) must be above descender ({descender})"
                ));
            }
        }

        Ok(())
    }

    /// Build the library options from CLI args, project file, user settings,
    /// or defaults
    ///
    /// Priority order:
    /// 1. CLI argument
    /// 2. Project file (--config)
    /// 3. User settings (~/.config/glyphforge/settings.json)
    /// 4. Built-in default
    pub fn library_options(
        &self,
        project: Option<ProjectFile>,
        settings: Option<ConfigFile>,
    ) -> Result<LibraryOptions> {
        let project = project.unwrap_or_default();
        let settings = settings.unwrap_or_default();
        let defaults = LibraryOptions::default();

        let svg_directories = if self.inputs.is_empty() {
            project.svg_directories.clone()
        } else {
            self.inputs.clone()
        };
        if svg_directories.is_empty() {
            return Err(anyhow!("No SVG directories given"));
        }

        let font = FontOptions {
            family_name: self
                .family
                .clone()
                .or(project.family_name.clone())
                .unwrap_or(defaults.font.family_name),
            style_name: self
                .style
                .clone()
                .or(project.style_name.clone())
                .or(settings.style_name.clone())
                .unwrap_or(defaults.font.style_name),
            units_per_em: self
                .units_per_em
                .or(project.units_per_em)
                .or(settings.units_per_em)
                .unwrap_or(defaults.font.units_per_em),
            ascender: self
                .ascender
                .or(project.ascender)
                .or(settings.ascender)
                .unwrap_or(defaults.font.ascender),
            descender: self
                .descender
                .or(project.descender)
                .or(settings.descender)
                .unwrap_or(defaults.font.descender),
        };
        if font.ascender <= font.descender {
            return Err(anyhow!(
                "Ascender ({}) must be above descender ({})",
                font.ascender,
                font.descender
            ));
        }

        let options = LibraryOptions {
            font,
            svg_directories,
            output_directory: self
                .output
                .clone()
                .or(project.output_directory.clone())
                .unwrap_or(defaults.output_directory),
            recursive: self.recursive
                || project
                    .recursive
                    .or(settings.recursive)
                    .unwrap_or(defaults.recursive),
            ligatures: !self.no_ligatures
                && project
                    .ligatures
                    .or(settings.ligatures)
                    .unwrap_or(defaults.ligatures),
            unicode_assignment: self.unicode_assignment(&project, &settings)?,
            strict: self.strict,
            compile: self.compile,
            fontc_path: settings.fontc_path,
        };
        debug!("Resolved options: {:?}", options);
        Ok(options)
    }

    fn unicode_assignment(
        &self,
        project: &ProjectFile,
        settings: &ConfigFile,
    ) -> Result<UnicodeAssignment> {
        if let Some(path) = &self.mapping {
            return Ok(UnicodeAssignment::Manual {
                mapping: load_mapping(path)?,
            });
        }
        if let Some(start_code_point) = self.start_code_point {
            return Ok(UnicodeAssignment::Auto { start_code_point });
        }

        match &project.unicode_assignment {
            Some(UnicodeAssignmentFile::Manual { mapping }) => Ok(UnicodeAssignment::Manual {
                mapping: resolve_mapping(mapping)?,
            }),
            Some(UnicodeAssignmentFile::Auto {
                start_code_point: Some(start),
            }) => Ok(UnicodeAssignment::Auto {
                start_code_point: start.resolve().map_err(|e| anyhow!(e))?,
            }),
            _ => Ok(UnicodeAssignment::Auto {
                start_code_point: match &settings.start_code_point {
                    Some(start) => start.resolve().map_err(|e| anyhow!(e))?,
                    None => DEFAULT_START_CODE_POINT,
                },
            }),
        }
    }
}

fn resolve_mapping(mapping: &BTreeMap<String, CodePointValue>) -> Result<BTreeMap<String, u32>> {
    mapping
        .iter()
        .map(|(name, value)| {
            let code_point = value
                .resolve()
                .map_err(|e| anyhow!("{e} (icon '{name}')"))?;
            Ok((name.clone(), code_point))
        })
        .collect()
}

/// Read a `{ "name": code point }` JSON file
pub fn load_mapping(path: &Path) -> Result<BTreeMap<String, u32>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
    let mapping: BTreeMap<String, CodePointValue> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse mapping file {}", path.display()))?;
    resolve_mapping(&mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("glyphforge").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn parses_flags() {
        let args = parse(&[
            "icons",
            "more-icons",
            "-f",
            "Shop",
            "--descender",
            "-250",
            "--start-code-point",
            "U+F000",
            "--no-ligatures",
            "-r",
        ]);
        assert_eq!(args.inputs, vec![PathBuf::from("icons"), PathBuf::from("more-icons")]);
        assert_eq!(args.family.as_deref(), Some("Shop"));
        assert_eq!(args.descender, Some(-250.0));
        assert_eq!(args.start_code_point, Some(0xF000));
        assert!(args.no_ligatures);
        assert!(args.recursive);
    }

    #[test]
    fn mapping_and_start_code_point_conflict() {
        let result = CliArgs::try_parse_from([
            "glyphforge",
            "icons",
            "--mapping",
            "map.json",
            "--start-code-point",
            "0xE000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn validation() {
        assert!(parse(&[]).validate().is_err());
        assert!(parse(&["--new-config"]).validate().is_ok());
        assert!(parse(&["icons"]).validate().is_ok());
        assert!(parse(&["icons", "--config", "/no/such/project.json"])
            .validate()
            .is_err());
        assert!(parse(&["icons", "--units-per-em", "0"]).validate().is_err());
        assert!(parse(&["icons", "--ascender", "100", "--descender", "200"])
            .validate()
            .is_err());
    }

    #[test]
    fn defaults_when_nothing_else_is_given() {
        let options = parse(&["icons"]).library_options(None, None).unwrap();
        assert_eq!(options.font, FontOptions::default());
        assert_eq!(options.unicode_assignment, UnicodeAssignment::default());
        assert!(options.ligatures);
        assert!(!options.recursive);
        assert_eq!(options.output_directory, PathBuf::from("."));
    }

    #[test]
    fn cli_beats_project_beats_settings() {
        let settings = ConfigFile {
            ascender: Some(700.0),
            descender: Some(-300.0),
            units_per_em: Some(2048.0),
            style_name: Some("Light".to_string()),
            start_code_point: Some(CodePointValue::Text("0xF000".to_string())),
            ligatures: Some(false),
            ..Default::default()
        };
        let project = ProjectFile {
            family_name: Some("Project".to_string()),
            svg_directories: vec![PathBuf::from("project-icons")],
            ascender: Some(900.0),
            ..Default::default()
        };

        let options = parse(&["--ascender", "950"])
            .library_options(Some(project.clone()), Some(settings.clone()))
            .unwrap();
        assert_eq!(options.font.ascender, 950.0);
        assert_eq!(options.font.descender, -300.0);
        assert_eq!(options.font.units_per_em, 2048.0);
        assert_eq!(options.font.style_name, "Light");
        assert_eq!(options.font.family_name, "Project");
        assert_eq!(options.svg_directories, vec![PathBuf::from("project-icons")]);
        assert!(!options.ligatures);
        assert_eq!(
            options.unicode_assignment,
            UnicodeAssignment::Auto {
                start_code_point: 0xF000
            }
        );

        let options = parse(&["icons"])
            .library_options(Some(project), Some(settings))
            .unwrap();
        assert_eq!(options.font.ascender, 900.0);
        assert_eq!(options.svg_directories, vec![PathBuf::from("icons")]);
    }

    #[test]
    fn mapping_file_selects_manual_assignment() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.json");
        fs::write(&path, r#"{ "home": "0xF101", "search": 61698 }"#).unwrap();

        let args = parse(&["icons", "--mapping", path.to_str().unwrap()]);
        let options = args.library_options(None, None).unwrap();
        assert_eq!(
            options.unicode_assignment,
            UnicodeAssignment::Manual {
                mapping: BTreeMap::from([
                    ("home".to_string(), 0xF101),
                    ("search".to_string(), 0xF102)
                ])
            }
        );

        fs::write(&path, r#"{ "home": "oops" }"#).unwrap();
        assert!(args.library_options(None, None).is_err());
    }

    #[test]
    fn inverted_metrics_from_files_are_rejected() {
        let settings = ConfigFile {
            ascender: Some(-500.0),
            ..Default::default()
        };
        assert!(parse(&["icons"])
            .library_options(None, Some(settings))
            .is_err());
    }
}
