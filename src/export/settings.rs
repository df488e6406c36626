//! Persistent exporter settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::util::Result;

/// Settings that persist between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    // Naming
    pub name_prefix: String,
    pub default_basename: String,
    pub file_extension: String,

    // Scene info
    pub author: String,
    pub revision: String,

    // Logging
    pub verbose: bool,

    // Last written file
    pub last_file: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            name_prefix: String::new(),
            default_basename: "Untitled".to_string(),
            file_extension: "fbx".to_string(),
            author: "fbx-export".to_string(),
            revision: "1.0".to_string(),
            verbose: true,
            last_file: None,
        }
    }
}

impl ExportSettings {
    /// Default settings file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("fbx-export");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        match Self::path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Prefix an object name the way exported objects are named
    pub fn object_name(&self, name: &str) -> String {
        format!("{}{}", self.name_prefix, name)
    }

    /// `basename.extension`, using the default basename when empty
    pub fn file_name(&self, basename: &str) -> String {
        let basename = if basename.is_empty() {
            self.default_basename.as_str()
        } else {
            basename
        };
        format!("{}.{}", basename, self.file_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let s: ExportSettings = serde_json::from_str(r#"{ "name_prefix": "exp_" }"#).unwrap();
        assert_eq!(s.name_prefix, "exp_");
        assert_eq!(s.file_extension, "fbx");
        assert_eq!(s.object_name("fbxScene"), "exp_fbxScene");
    }

    #[test]
    fn test_file_name() {
        let s = ExportSettings::default();
        assert_eq!(s.file_name("Level01"), "Level01.fbx");
        assert_eq!(s.file_name(""), "Untitled.fbx");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let s = ExportSettings {
            author: "someone".into(),
            ..Default::default()
        };
        s.save_to(&path).unwrap();
        assert_eq!(ExportSettings::load_from(&path).unwrap(), s);
    }
}
