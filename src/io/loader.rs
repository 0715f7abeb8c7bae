//! SVG file discovery
//!
//! Collects `.svg` files (extension matched case-insensitively) from a list
//! of directories. Paths that are not directories are reported and skipped.
//! With recursion enabled, subdirectories are searched as well; every path is
//! visited at most once even when directories overlap.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// One icon file read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSource {
    /// File stem, used as the icon name and ligature
    pub file_name: String,
    pub file_path: PathBuf,
    pub content: String,
    pub modified: Option<SystemTime>,
}

pub struct SvgLoader {
    directories: Vec<PathBuf>,
    recursive: bool,
    visited: HashSet<PathBuf>,
}

impl SvgLoader {
    pub fn new(directories: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            directories,
            recursive,
            visited: HashSet::new(),
        }
    }

    /// Read every SVG file, each directory's results sorted by file name
    pub fn load(&mut self) -> Result<Vec<SvgSource>> {
        let mut sources = Vec::new();
        for directory in self.directories.clone() {
            if !directory.is_dir() {
                warn!("Path is not a directory: {}", directory.display());
                continue;
            }
            sources.extend(self.find_files(&directory)?);
        }
        debug!("Loaded {} SVG files", sources.len());
        Ok(sources)
    }

    fn find_files(&mut self, directory: &Path) -> Result<Vec<SvgSource>> {
        let mut sources = Vec::new();
        let entries = fs::read_dir(directory)
            .with_context(|| format!("Failed to read directory {}", directory.display()))?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if self.visited.contains(&path) {
                continue;
            }

            let file_type = entry.file_type()?;
            if self.recursive && file_type.is_dir() {
                self.visited.insert(path.clone());
                sources.extend(self.find_files(&path)?);
                continue;
            }

            if file_type.is_file() && has_svg_extension(&path) {
                self.visited.insert(path.clone());
                match read_source(&path) {
                    Ok(source) => sources.push(source),
                    Err(error) => warn!("Skipping {}: {:#}", path.display(), error),
                }
            }
        }

        sources.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(sources)
    }
}

fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn read_source(path: &Path) -> Result<SvgSource> {
    let content = fs::read_to_string(path).context("not readable as UTF-8 text")?;
    let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok();
    let file_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SvgSource {
        file_name,
        file_path: path.to_path_buf(),
        content,
        modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SVG: &str = r#"<svg viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn names(sources: &[SvgSource]) -> Vec<&str> {
        sources.iter().map(|s| s.file_name.as_str()).collect()
    }

    #[test]
    fn finds_svg_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "zeta.svg", SVG);
        write(temp_dir.path(), "alpha.SVG", SVG);
        write(temp_dir.path(), "notes.txt", "not an icon");

        let sources = SvgLoader::new(vec![temp_dir.path().to_path_buf()], false)
            .load()
            .unwrap();
        assert_eq!(names(&sources), vec!["alpha", "zeta"]);
        assert_eq!(sources[0].content, SVG);
        assert!(sources[0].modified.is_some());
    }

    #[test]
    fn recursion_is_opt_in() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        write(temp_dir.path(), "top.svg", SVG);
        write(&nested, "inner.svg", SVG);

        let flat = SvgLoader::new(vec![temp_dir.path().to_path_buf()], false)
            .load()
            .unwrap();
        assert_eq!(names(&flat), vec!["top"]);

        let deep = SvgLoader::new(vec![temp_dir.path().to_path_buf()], true)
            .load()
            .unwrap();
        assert_eq!(names(&deep), vec!["inner", "top"]);
    }

    #[test]
    fn overlapping_directories_visit_files_once() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "icon.svg", SVG);

        let dir = temp_dir.path().to_path_buf();
        let sources = SvgLoader::new(vec![dir.clone(), dir], false)
            .load()
            .unwrap();
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn non_directories_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "icon.svg", SVG);

        let sources = SvgLoader::new(
            vec![
                temp_dir.path().join("missing"),
                temp_dir.path().join("icon.svg"),
                temp_dir.path().to_path_buf(),
            ],
            false,
        )
        .load()
        .unwrap();
        assert_eq!(names(&sources), vec!["icon"]);
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("binary.svg"), [0xFF, 0xFE, 0x00]).unwrap();
        write(temp_dir.path(), "good.svg", SVG);

        let sources = SvgLoader::new(vec![temp_dir.path().to_path_buf()], false)
            .load()
            .unwrap();
        assert_eq!(names(&sources), vec!["good"]);
    }
}
