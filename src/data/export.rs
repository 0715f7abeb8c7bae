//! Code point map export
//!
//! A JSON object from icon name to lowercase hexadecimal code point, sorted by
//! name, for stylesheets and application code that reference the icons.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodepointMap(BTreeMap<String, String>);

impl CodepointMap {
    pub fn from_unicodes<'a>(unicodes: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self(
            unicodes
                .into_iter()
                .map(|(name, unicode)| (name.to_string(), format!("{unicode:x}")))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn hex_values_sorted_by_name() {
        let map = CodepointMap::from_unicodes([("zoom", 0xE001), ("arrow", 0xE000)]);
        assert_eq!(map.get("arrow"), Some("e000"));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"arrow":"e000","zoom":"e001"}"#
        );
    }

    #[test]
    fn writes_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Icons.json");
        let map = CodepointMap::from_unicodes([("home", 0xF101)]);
        map.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let read_back: CodepointMap = serde_json::from_str(&text).unwrap();
        assert_eq!(read_back, map);
        assert!(text.contains("\"home\": \"f101\""));
    }
}
