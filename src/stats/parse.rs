//! Line parsers for the individual statistic sheets.
//!
//! Both parsers work on column positions rather than column labels, which
//! survives OCR mangling the header text but breaks if the sheet layout
//! changes. Lines that do not fit the expected shape are header/footer noise
//! and are skipped, never reported as errors.

use std::path::Path;

use crate::config::ScoringColumns;
use crate::error::Result;
use crate::log;
use crate::ocr::{extract_numbers, ocr_lines, TextRecognizer, TokenLine};

/// Sums read off one team's scoring sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringTotals {
    pub attack: u64,
    pub block: u64,
    pub serve: u64,
    pub opp_error: u64,
    /// Best per-player point total, 0 without any player rows
    pub top_scorer_1: u64,
    /// Second best per-player point total, 0 with fewer than two player rows
    pub top_scorer_2: u64,
    /// Number of lines accepted as player rows
    pub player_rows: usize,
}

impl ScoringTotals {
    pub fn total_points(&self) -> u64 {
        self.attack + self.block + self.serve + self.opp_error
    }
}

/// Parses tokenised scoring sheet lines.
///
/// A line is a player row when it yields at least `columns.min_fields`
/// numbers. The four configured offsets are read as attack, block, serve and
/// opponent error points and summed over all rows; each row's own sum is
/// kept for the top scorer ranking.
pub fn parse_scoring_lines(lines: &[TokenLine], columns: &ScoringColumns) -> ScoringTotals {
    let mut totals = ScoringTotals::default();
    let mut player_points: Vec<u64> = Vec::new();
    let required = columns.required_fields();

    for tokens in lines {
        let numbers = extract_numbers(tokens);
        if numbers.len() < required {
            continue;
        }

        let [attack, block, serve, opp_error] = columns.columns.map(|i| u64::from(numbers[i]));
        totals.attack += attack;
        totals.block += block;
        totals.serve += serve;
        totals.opp_error += opp_error;
        player_points.push(attack + block + serve + opp_error);
    }

    totals.player_rows = player_points.len();
    player_points.sort_unstable_by(|a, b| b.cmp(a));
    totals.top_scorer_1 = player_points.first().copied().unwrap_or(0);
    totals.top_scorer_2 = player_points.get(1).copied().unwrap_or(0);

    totals
}

/// Sums the first number of every line that has one.
///
/// Used for the dig, reception and set sheets, where the action count is
/// the first numeric column.
pub fn parse_simple_total_lines(lines: &[TokenLine]) -> u64 {
    lines
        .iter()
        .filter_map(|tokens| extract_numbers(tokens).first().copied())
        .map(u64::from)
        .sum()
}

/// OCRs and parses a scoring sheet.
pub fn parse_scoring<R>(
    recognizer: &R,
    image_path: &Path,
    columns: &ScoringColumns,
) -> Result<ScoringTotals>
where
    R: TextRecognizer + ?Sized,
{
    let lines = ocr_lines(recognizer, image_path)?;
    let totals = parse_scoring_lines(&lines, columns);

    if totals.player_rows == 0 {
        log(&format!(
            "Warning: no player rows found in {} ({} lines read)",
            image_path.display(),
            lines.len()
        ));
    } else {
        log(&format!(
            "Scoring {}: {} player rows of {} lines, {} points",
            image_path.display(),
            totals.player_rows,
            lines.len(),
            totals.total_points()
        ));
    }

    Ok(totals)
}

/// OCRs and parses a single-column total sheet.
pub fn parse_simple_total<R>(recognizer: &R, image_path: &Path) -> Result<u64>
where
    R: TextRecognizer + ?Sized,
{
    let lines = ocr_lines(recognizer, image_path)?;
    let counted = lines
        .iter()
        .filter(|tokens| !extract_numbers(tokens).is_empty())
        .count();
    let total = parse_simple_total_lines(&lines);

    if counted == 0 {
        log(&format!(
            "Warning: no numeric lines found in {}",
            image_path.display()
        ));
    }

    Ok(total)
}
