//! Configuration for dataset extraction.
//!
//! Loads settings from config.json. Provides the screenshot naming layout,
//! the scoring sheet column offsets, and Tesseract settings. A missing file
//! means defaults; a file that exists but does not parse or validate is an
//! error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DatasetError, Result};

/// Complete extraction configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub layout: SheetLayout,
    pub scoring: ScoringColumns,
    pub ocr: OcrConfig,
}

/// How screenshots are named inside a match directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Filename prefix of the first team (`teamA_scoring.png`)
    pub team_a_prefix: String,
    /// Filename prefix of the second team
    pub team_b_prefix: String,
    /// Image file extension, without the dot
    pub extension: String,
    /// Also require the attack/block/serve screenshots to exist even though
    /// their content is not parsed
    pub require_all_sheets: bool,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            team_a_prefix: "teamA".to_string(),
            team_b_prefix: "teamB".to_string(),
            extension: "png".to_string(),
            require_all_sheets: true,
        }
    }
}

/// Column positions on the scoring sheet, counted over the numbers found on a
/// line (not over raw tokens).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringColumns {
    /// Offsets of attack, block, serve and opponent error points
    pub columns: [usize; 4],
    /// Minimum count of numbers for a line to be treated as a player row
    pub min_fields: usize,
}

impl Default for ScoringColumns {
    fn default() -> Self {
        // Column 0 is total attempts, which is not a point source.
        Self {
            columns: [1, 2, 3, 4],
            min_fields: 5,
        }
    }
}

impl ScoringColumns {
    /// Numbers a line needs before it counts as a player row. Never less than
    /// what the column offsets index into.
    pub fn required_fields(&self) -> usize {
        let widest = self.columns.iter().copied().max().unwrap_or(0);
        self.min_fields.max(widest + 1)
    }
}

/// Tesseract invocation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit tesseract executable; searched for when unset
    pub tesseract_path: Option<PathBuf>,
    /// Explicit tessdata directory; searched for when unset
    pub tessdata_dir: Option<PathBuf>,
    pub language: String,
    /// Page segmentation mode passed as `--psm`
    pub psm: u8,
    /// Optional brightness threshold (pixels brighter than this become text)
    pub threshold: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            tessdata_dir: None,
            language: "eng".to_string(),
            psm: 3,
            threshold: None,
        }
    }
}

impl DatasetConfig {
    /// Loads configuration from `explicit`, or from config.json next to the
    /// executable when no path is given.
    ///
    /// An explicitly named file must exist; the implicit one may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(crate::paths::get_default_config_path);

        crate::log(&format!("Looking for config at: {}", config_path.display()));

        if !config_path.exists() {
            if explicit.is_some() {
                return Err(DatasetError::Config(format!(
                    "config file {} does not exist",
                    config_path.display()
                )));
            }
            crate::log("config.json not found. Using default config.");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            DatasetError::Config(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        let config = Self::from_json(&contents)?;
        crate::log(&format!("Config loaded from {}", config_path.display()));
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| DatasetError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.team_a_prefix.is_empty() || layout.team_b_prefix.is_empty() {
            return Err(DatasetError::Config("team prefixes must not be empty".into()));
        }
        if layout.team_a_prefix == layout.team_b_prefix {
            return Err(DatasetError::Config(format!(
                "team prefixes must differ (both are '{}')",
                layout.team_a_prefix
            )));
        }
        if layout.extension.is_empty() || layout.extension.starts_with('.') {
            return Err(DatasetError::Config(
                "extension must be non-empty and given without a leading dot".into(),
            ));
        }

        let widest = self.scoring.columns.iter().copied().max().unwrap_or(0);
        if self.scoring.min_fields <= widest {
            return Err(DatasetError::Config(format!(
                "scoring.min_fields ({}) must exceed the largest column offset ({})",
                self.scoring.min_fields, widest
            )));
        }

        if self.ocr.psm > 13 {
            return Err(DatasetError::Config(format!(
                "ocr.psm must be between 0 and 13, got {}",
                self.ocr.psm
            )));
        }
        if self.ocr.language.trim().is_empty() {
            return Err(DatasetError::Config("ocr.language must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_vnl_layout() {
        let config = DatasetConfig::default();
        assert_eq!(config.layout.team_a_prefix, "teamA");
        assert_eq!(config.layout.team_b_prefix, "teamB");
        assert_eq!(config.layout.extension, "png");
        assert_eq!(config.scoring.columns, [1, 2, 3, 4]);
        assert_eq!(config.scoring.min_fields, 5);
        assert_eq!(config.ocr.language, "eng");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DatasetConfig::from_json(r#"{"ocr": {"psm": 6}}"#).unwrap();
        assert_eq!(config.ocr.psm, 6);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.scoring, ScoringColumns::default());
    }

    #[test]
    fn test_shifted_columns() {
        let config = DatasetConfig::from_json(
            r#"{"scoring": {"columns": [2, 3, 4, 5], "min_fields": 6}}"#,
        )
        .unwrap();
        assert_eq!(config.scoring.columns, [2, 3, 4, 5]);
    }

    #[test]
    fn test_min_fields_must_cover_columns() {
        let err = DatasetConfig::from_json(r#"{"scoring": {"columns": [1, 2, 3, 5]}}"#)
            .unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));
    }

    #[test]
    fn test_identical_prefixes_rejected() {
        let err = DatasetConfig::from_json(
            r#"{"layout": {"team_a_prefix": "home", "team_b_prefix": "home"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("home"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            DatasetConfig::from_json("{ not json"),
            Err(DatasetError::Config(_))
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"layout": {"extension": "jpg"}}"#).unwrap();

        let config = DatasetConfig::load(Some(&path)).unwrap();
        assert_eq!(config.layout.extension, "jpg");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(DatasetConfig::load(Some(&path)).is_err());
    }
}
