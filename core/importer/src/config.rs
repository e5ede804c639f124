//! FILENAME: core/importer/src/config.rs
//! PURPOSE: The persisted application settings.
//! CONTEXT: Two values survive between runs: where the registry lives and
//! which fallback groups to search for when questionnaire checkmarks cannot
//! be read. Settings are stored as JSON in the per-user config directory;
//! a missing or corrupt file never blocks startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub registry_path: String,
    pub fallback_groups: Vec<String>,
}

impl ImportConfig {
    /// Loads settings from `path`, falling back to the defaults when the
    /// file is absent or unparsable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }

    /// Splits a semicolon-separated fallback list as entered in the
    /// settings ("Напитки; Бакалея") into trimmed, non-empty names.
    pub fn parse_group_list(raw: &str) -> Vec<String> {
        raw.split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = ImportConfig::load(&dir.path().join("config.json"));

        assert_eq!(config, ImportConfig::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ это не json").expect("write");

        assert_eq!(ImportConfig::load(&path), ImportConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");

        let config = ImportConfig {
            registry_path: "/data/реестр.xlsx".to_string(),
            fallback_groups: vec!["Напитки".to_string(), "Бакалея".to_string()],
        };
        config.save(&path).expect("save");

        assert_eq!(ImportConfig::load(&path), config);
    }

    #[test]
    fn test_parse_group_list() {
        assert_eq!(
            ImportConfig::parse_group_list(" Напитки ; Бакалея ;;"),
            vec!["Напитки".to_string(), "Бакалея".to_string()]
        );
        assert!(ImportConfig::parse_group_list("").is_empty());
    }
}
