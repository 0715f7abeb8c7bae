//! Configuration files
//!
//! Two JSON files feed the build besides the command line:
//! - user settings in ~/.config/glyphforge/settings.json, holding personal
//!   defaults
//! - an optional project file passed with `--config`, describing one icon
//!   font

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A code point written either as a JSON number or as text
/// (`"0xE000"`, `"U+E000"`, `"57344"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodePointValue {
    Number(u32),
    Text(String),
}

impl CodePointValue {
    pub fn resolve(&self) -> Result<u32, String> {
        match self {
            CodePointValue::Number(value) => Ok(*value),
            CodePointValue::Text(text) => parse_code_point(text),
        }
    }
}

/// Parse `0xE000`, `U+E000` (hexadecimal) or `57344` (decimal)
pub fn parse_code_point(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix("U+"))
        .or_else(|| text.strip_prefix("u+"));

    let parsed = match hex {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|_| format!("Invalid code point: '{text}'"))
}

/// User configuration from ~/.config/glyphforge/settings.json
///
/// These settings override built-in defaults but are overridden by the
/// project file and CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub ascender: Option<f64>,
    pub descender: Option<f64>,
    pub units_per_em: Option<f64>,
    pub style_name: Option<String>,
    pub start_code_point: Option<CodePointValue>,
    pub ligatures: Option<bool>,
    pub recursive: Option<bool>,
    /// `fontc` executable used by `--compile`
    pub fontc_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Get the path to the glyphforge config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphforge")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Missing files are silently ignored, broken ones are reported
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file listing every option with its built-in default
    pub fn example() -> Self {
        Self {
            ascender: Some(crate::font_source::metrics::DEFAULT_ASCENDER),
            descender: Some(crate::font_source::metrics::DEFAULT_DESCENDER),
            units_per_em: Some(crate::font_source::metrics::DEFAULT_UNITS_PER_EM),
            style_name: Some(crate::font_source::metrics::DEFAULT_STYLE_NAME.to_string()),
            start_code_point: Some(CodePointValue::Text("0xE000".to_string())),
            ligatures: Some(true),
            recursive: Some(false),
            fontc_path: None,
        }
    }

    /// Create the config directory, its logs directory and a settings file
    /// with default values, keeping any settings file already present
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View logs in: {:?}", logs_dir);

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum UnicodeAssignmentFile {
    Auto {
        #[serde(default)]
        start_code_point: Option<CodePointValue>,
    },
    Manual {
        #[serde(default)]
        mapping: BTreeMap<String, CodePointValue>,
    },
}

/// One icon font described in a JSON project file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectFile {
    pub family_name: Option<String>,
    pub style_name: Option<String>,
    /// Relative paths are taken from the project file's directory
    pub svg_directories: Vec<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub ascender: Option<f64>,
    pub descender: Option<f64>,
    pub units_per_em: Option<f64>,
    pub ligatures: Option<bool>,
    pub recursive: Option<bool>,
    pub unicode_assignment: Option<UnicodeAssignmentFile>,
}

impl ProjectFile {
    /// Read a project file; unlike user settings, problems are errors
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;
        let mut project: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse project file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        project.svg_directories = project
            .svg_directories
            .iter()
            .map(|dir| base.join(dir))
            .collect();
        project.output_directory = project.output_directory.map(|dir| base.join(dir));

        debug!("Loaded project file {:?}", path);
        Ok(project)
    }
}
