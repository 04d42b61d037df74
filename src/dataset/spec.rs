use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{DatasetError, Result};

/// One batch entry: a match directory and its caller-supplied label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpec {
    pub match_dir: PathBuf,
    /// Conventionally 1 when team A won and 0 otherwise; not range-checked
    pub label: i64,
}

impl FromStr for MatchSpec {
    type Err = DatasetError;

    /// Parses `<directory>:<label>`, splitting at the first colon.
    fn from_str(spec: &str) -> Result<Self> {
        let (dir, label) = spec.split_once(':').ok_or_else(|| {
            DatasetError::invalid_spec(spec, "must be of the form '<directory>:<label>'")
        })?;

        if dir.is_empty() {
            return Err(DatasetError::invalid_spec(spec, "directory is empty"));
        }

        let label = label.trim().parse::<i64>().map_err(|e| {
            DatasetError::invalid_spec(spec, format!("label '{}' is not an integer: {}", label, e))
        })?;

        Ok(MatchSpec {
            match_dir: PathBuf::from(dir),
            label,
        })
    }
}

/// Parses every entry, failing on the first malformed one.
pub fn parse_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<MatchSpec>> {
    specs.iter().map(|s| s.as_ref().parse()).collect()
}
