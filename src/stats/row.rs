//! Per-match feature rows.
//!
//! A row only exists once every column has a value: `RowBuilder::build` is
//! the single place a `MatchFeatureRow` is created, and it refuses to create
//! one with an unresolved field.

use std::path::Path;

use crate::config::DatasetConfig;
use crate::error::{DatasetError, Result};
use crate::log;
use crate::ocr::TextRecognizer;

use super::sheets::{Team, TeamSheets};
use super::team::{aggregate_team, Stat, TeamStats};

pub const LABEL_COLUMN: &str = "label";

/// Number of output columns: ten diffs plus the label.
pub const COLUMN_COUNT: usize = 11;

/// Output column names, in table order.
pub fn column_names() -> [&'static str; COLUMN_COUNT] {
    let mut names = [LABEL_COLUMN; COLUMN_COUNT];
    for stat in Stat::ALL {
        names[stat.index()] = stat.diff_column();
    }
    names
}

/// Signed team A minus team B differences for one match, plus its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFeatureRow {
    diffs: [i64; 10],
    label: i64,
}

impl MatchFeatureRow {
    pub fn diff(&self, stat: Stat) -> i64 {
        self.diffs[stat.index()]
    }

    pub fn label(&self) -> i64 {
        self.label
    }

    /// All values in column order.
    pub fn values(&self) -> [i64; COLUMN_COUNT] {
        let mut values = [self.label; COLUMN_COUNT];
        values[..10].copy_from_slice(&self.diffs);
        values
    }
}

/// Collects row fields one by one.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    diffs: [Option<i64>; 10],
    label: Option<i64>,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diff(mut self, stat: Stat, value: i64) -> Self {
        self.diffs[stat.index()] = Some(value);
        self
    }

    pub fn label(mut self, label: i64) -> Self {
        self.label = Some(label);
        self
    }

    /// Returns the finished row, or `IncompleteMatchData` naming `match_dir`
    /// and every column that was never set.
    pub fn build(self, match_dir: &Path) -> Result<MatchFeatureRow> {
        let mut missing: Vec<&'static str> = Stat::ALL
            .iter()
            .filter(|stat| self.diffs[stat.index()].is_none())
            .map(|stat| stat.diff_column())
            .collect();
        if self.label.is_none() {
            missing.push(LABEL_COLUMN);
        }

        match (self.diffs, self.label) {
            (diffs, Some(label)) if missing.is_empty() => Ok(MatchFeatureRow {
                diffs: diffs.map(|d| d.unwrap_or_default()),
                label,
            }),
            _ => Err(DatasetError::IncompleteMatchData {
                match_dir: match_dir.to_path_buf(),
                missing,
            }),
        }
    }
}

/// Builds the feature row for two already aggregated teams.
pub fn difference_row(
    team_a: &TeamStats,
    team_b: &TeamStats,
    label: i64,
    match_dir: &Path,
) -> Result<MatchFeatureRow> {
    Stat::ALL
        .iter()
        .fold(RowBuilder::new(), |row, &stat| {
            // Sums of u32 tokens over a sheet's lines stay far below i64::MAX.
            row.diff(stat, team_a.value(stat) as i64 - team_b.value(stat) as i64)
        })
        .label(label)
        .build(match_dir)
}

/// Reads both teams of the match in `match_dir` and returns its feature row.
///
/// The label is attached verbatim; it is never inferred from the images.
pub fn diff_match<R>(
    recognizer: &R,
    config: &DatasetConfig,
    match_dir: &Path,
    label: i64,
) -> Result<MatchFeatureRow>
where
    R: TextRecognizer + ?Sized,
{
    let layout = &config.layout;
    let sheets_a = TeamSheets::resolve(match_dir, Team::A, layout);
    let sheets_b = TeamSheets::resolve(match_dir, Team::B, layout);
    sheets_a.ensure_present(layout.require_all_sheets)?;
    sheets_b.ensure_present(layout.require_all_sheets)?;

    let team_a = aggregate_team(recognizer, &sheets_a, &config.scoring)?;
    let team_b = aggregate_team(recognizer, &sheets_b, &config.scoring)?;

    let row = difference_row(&team_a, &team_b, label, match_dir)?;
    log(&format!("{}: row {:?}", match_dir.display(), row.values()));
    Ok(row)
}
