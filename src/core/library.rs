//! Icon font orchestration
//!
//! [`IconFontLibrary`] drives the whole pipeline for a batch of icon files:
//! load, assign code points, parse and normalize (in parallel), assemble,
//! and finally write the output files. Normalized outlines are cached per
//! file path and modification time, so regenerating after editing a few
//! icons only reprocesses those.

use crate::core::errors::LibraryError;
use crate::data::{write_ufo, CodepointMap, FontCompiler};
use crate::font_source::naming::claim_unique_name;
use crate::font_source::{create_font, icon_glyph_name, FontOptions, GlyphDefinition, IconFont};
use crate::io::{SvgLoader, SvgSource};
use crate::normalize::{normalize, NormalizeOptions, NormalizedGlyphData};
use crate::svg::parse_svg;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub const DEFAULT_START_CODE_POINT: u32 = 0xE000;

/// How icons get their code points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnicodeAssignment {
    /// Consecutive code points in file name order
    Auto { start_code_point: u32 },
    /// Explicit code point per file name
    Manual { mapping: BTreeMap<String, u32> },
}

impl Default for UnicodeAssignment {
    fn default() -> Self {
        UnicodeAssignment::Auto {
            start_code_point: DEFAULT_START_CODE_POINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryOptions {
    pub font: FontOptions,
    pub svg_directories: Vec<PathBuf>,
    pub output_directory: PathBuf,
    pub recursive: bool,
    /// Register each icon's file name as a typed ligature
    pub ligatures: bool,
    pub unicode_assignment: UnicodeAssignment,
    /// Abort on the first icon that cannot be processed
    pub strict: bool,
    /// Also build a binary font with `fontc`
    pub compile: bool,
    pub fontc_path: Option<PathBuf>,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            font: FontOptions::default(),
            svg_directories: Vec::new(),
            output_directory: PathBuf::from("."),
            recursive: false,
            ligatures: true,
            unicode_assignment: UnicodeAssignment::default(),
            strict: false,
            compile: false,
            fontc_path: None,
        }
    }
}

/// Outcome of one generation run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub font: IconFont,
    /// File names of the icons in the font, in glyph order
    pub glyph_names: Vec<String>,
    /// File name to code point, for the icons in the font
    pub unicode_map: BTreeMap<String, u32>,
    /// File names of icons that could not be processed
    pub skipped: Vec<String>,
}

/// Files written by [`IconFontLibrary::generate_to_directory`]
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    pub ufo: PathBuf,
    pub codepoints: PathBuf,
    pub binary: Option<PathBuf>,
}

struct CacheEntry {
    modified: SystemTime,
    data: NormalizedGlyphData,
}

pub struct IconFontLibrary {
    options: LibraryOptions,
    cache: HashMap<PathBuf, CacheEntry>,
}

impl IconFontLibrary {
    pub fn new(options: LibraryOptions) -> Self {
        Self {
            options,
            cache: HashMap::new(),
        }
    }

    pub fn options(&self) -> &LibraryOptions {
        &self.options
    }

    /// Number of icons with cached outlines
    pub fn cached_icons(&self) -> usize {
        self.cache.len()
    }

    pub fn generate(&mut self) -> Result<GenerationResult> {
        let mut sources =
            SvgLoader::new(self.options.svg_directories.clone(), self.options.recursive).load()?;
        if sources.is_empty() {
            return Err(LibraryError::NoSvgFiles.into());
        }
        sources.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        let unicodes = assign_unicodes(&sources, &self.options.unicode_assignment)?;
        let normalize_options = self.options.font.normalize_options();

        let outcomes: Vec<Result<NormalizedGlyphData, LibraryError>> = sources
            .par_iter()
            .map(|source| match self.cached(source) {
                Some(data) => Ok(data.clone()),
                None => process_source(source, &normalize_options),
            })
            .collect();

        let mut definitions = Vec::new();
        let mut glyph_names = Vec::new();
        let mut unicode_map = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut taken = HashSet::new();

        for ((source, unicode), outcome) in sources.iter().zip(unicodes).zip(outcomes) {
            let normalized_data = match outcome {
                Ok(data) => data,
                Err(error) if self.options.strict => return Err(error.into()),
                Err(error) => {
                    warn!("Skipping '{}': {:#}", source.file_name, anyhow::Error::from(error));
                    skipped.push(source.file_name.clone());
                    continue;
                }
            };

            if let Some(modified) = source.modified {
                self.cache.insert(
                    source.file_path.clone(),
                    CacheEntry {
                        modified,
                        data: normalized_data.clone(),
                    },
                );
            }

            if unicode_map.insert(source.file_name.clone(), unicode).is_some() {
                warn!(
                    "Several icons are named '{}'; the code point map lists the last one",
                    source.file_name
                );
            }
            glyph_names.push(source.file_name.clone());
            definitions.push(GlyphDefinition {
                name: claim_unique_name(icon_glyph_name(&source.file_name), &mut taken),
                unicode,
                ligature: self.options.ligatures.then(|| source.file_name.clone()),
                normalized_data,
            });
        }

        self.evict_stale_entries(&sources);

        let font = create_font(&definitions, &self.options.font);
        info!(
            "Generated '{}' with {} icons ({} skipped)",
            self.options.font.display_name(),
            definitions.len(),
            skipped.len()
        );

        Ok(GenerationResult {
            font,
            glyph_names,
            unicode_map,
            skipped,
        })
    }

    /// Generate and write `<family>.ufo` and `<family>.json` to the output
    /// directory, plus `<family>.otf` when compiling
    pub fn generate_to_directory(&mut self) -> Result<GeneratedFiles> {
        let result = self.generate()?;

        let output_directory = &self.options.output_directory;
        fs::create_dir_all(output_directory).with_context(|| {
            format!(
                "Failed to create output directory {}",
                output_directory.display()
            )
        })?;

        let family = &self.options.font.family_name;
        let ufo = output_directory.join(format!("{family}.ufo"));
        write_ufo(&result.font, &ufo)?;

        let codepoints = output_directory.join(format!("{family}.json"));
        CodepointMap::from_unicodes(
            result
                .unicode_map
                .iter()
                .map(|(name, unicode)| (name.as_str(), *unicode)),
        )
        .write_json(&codepoints)?;

        let binary = if self.options.compile {
            let compiler = match &self.options.fontc_path {
                Some(path) => FontCompiler::new(path.clone()),
                None => FontCompiler::default(),
            };
            let binary = output_directory.join(format!("{family}.otf"));
            Some(compiler.compile(&ufo, &binary)?)
        } else {
            None
        };

        Ok(GeneratedFiles {
            ufo,
            codepoints,
            binary,
        })
    }

    fn cached(&self, source: &SvgSource) -> Option<&NormalizedGlyphData> {
        let entry = self.cache.get(&source.file_path)?;
        if source.modified == Some(entry.modified) {
            debug!("Cache hit for {}", source.file_path.display());
            Some(&entry.data)
        } else {
            None
        }
    }

    fn evict_stale_entries(&mut self, sources: &[SvgSource]) {
        let current: HashSet<&PathBuf> = sources.iter().map(|s| &s.file_path).collect();
        self.cache.retain(|path, _| current.contains(path));
    }
}

fn process_source(
    source: &SvgSource,
    options: &NormalizeOptions,
) -> Result<NormalizedGlyphData, LibraryError> {
    let parsed = parse_svg(&source.content).map_err(|source_error| LibraryError::Svg {
        path: source.file_path.clone(),
        source: source_error,
    })?;

    let options = NormalizeOptions {
        view_box: parsed.view_box,
        ..*options
    };
    normalize(&parsed.shapes, &options).map_err(|source_error| LibraryError::Normalize {
        path: source.file_path.clone(),
        source: source_error,
    })
}

/// Code points for `sources`, in the same order
pub fn assign_unicodes(
    sources: &[SvgSource],
    assignment: &UnicodeAssignment,
) -> Result<Vec<u32>, LibraryError> {
    let unicodes: Vec<u32> = match assignment {
        UnicodeAssignment::Auto { start_code_point } => (0..sources.len())
            .map(|offset| {
                u32::try_from(offset)
                    .ok()
                    .and_then(|offset| start_code_point.checked_add(offset))
                    .ok_or(LibraryError::InvalidCodePoint(u32::MAX))
            })
            .collect::<Result<_, _>>()?,
        UnicodeAssignment::Manual { mapping } => sources
            .iter()
            .map(|source| {
                mapping
                    .get(&source.file_name)
                    .copied()
                    .ok_or_else(|| LibraryError::UnmappedGlyph(source.file_name.clone()))
            })
            .collect::<Result<_, _>>()?,
    };

    match unicodes
        .iter()
        .find(|&&unicode| unicode == 0 || char::from_u32(unicode).is_none())
    {
        Some(&invalid) => Err(LibraryError::InvalidCodePoint(invalid)),
        None => Ok(unicodes),
    }
}
