//! Error kinds for dataset extraction.
//!
//! Every variant is terminal for the current batch: nothing in the pipeline
//! catches and retries them, and no partial dataset is ever written.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// Image file is missing or cannot be decoded.
    #[error("Unable to read image {}: {reason}", .path.display())]
    ImageUnreadable { path: PathBuf, reason: String },

    /// The OCR engine ran but did not produce text for the image.
    #[error("OCR failed for {}: {reason}", .path.display())]
    Ocr { path: PathBuf, reason: String },

    /// A batch entry that cannot be split into `<path>:<label>`.
    #[error("Invalid match specification '{spec}': {reason}")]
    InvalidMatchSpecification { spec: String, reason: String },

    /// A feature row had at least one field left unresolved.
    #[error("Missing value encountered while parsing {}: {}", .match_dir.display(), .missing.join(", "))]
    IncompleteMatchData {
        match_dir: PathBuf,
        missing: Vec<&'static str>,
    },

    /// The assembled table has slots that never received a row.
    #[error("Missing values detected in final dataset (rows {missing_rows:?})")]
    IncompleteDataset { missing_rows: Vec<usize> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

impl DatasetError {
    pub fn image_unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DatasetError::ImageUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_spec(spec: &str, reason: impl ToString) -> Self {
        DatasetError::InvalidMatchSpecification {
            spec: spec.to_string(),
            reason: reason.to_string(),
        }
    }
}
