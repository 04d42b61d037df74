use crate::config::ScoringColumns;
use crate::error::Result;
use crate::log;
use crate::ocr::TextRecognizer;

use super::parse::{parse_scoring, parse_simple_total, ScoringTotals};
use super::sheets::{Sheet, TeamSheets};

/// One per-team statistic, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Attack,
    Block,
    Serve,
    OppError,
    TotalPoints,
    Dig,
    Reception,
    Set,
    TopScorer1,
    TopScorer2,
}

impl Stat {
    pub const ALL: [Stat; 10] = [
        Stat::Attack,
        Stat::Block,
        Stat::Serve,
        Stat::OppError,
        Stat::TotalPoints,
        Stat::Dig,
        Stat::Reception,
        Stat::Set,
        Stat::TopScorer1,
        Stat::TopScorer2,
    ];

    /// Name of the difference column for this statistic.
    pub fn diff_column(self) -> &'static str {
        match self {
            Stat::Attack => "attack_diff",
            Stat::Block => "block_diff",
            Stat::Serve => "serve_diff",
            Stat::OppError => "opp_error_diff",
            Stat::TotalPoints => "total_points_diff",
            Stat::Dig => "dig_diff",
            Stat::Reception => "reception_diff",
            Stat::Set => "set_diff",
            Stat::TopScorer1 => "top_scorer_1_diff",
            Stat::TopScorer2 => "top_scorer_2_diff",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Aggregated statistics for one team in one match.
///
/// Built in one step from the parsed sheets; there is no way to change a
/// value afterwards. `total_points` is always the sum of the four scoring
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStats {
    attack: u64,
    block: u64,
    serve: u64,
    opp_error: u64,
    dig: u64,
    reception: u64,
    set: u64,
    top_scorer_1: u64,
    top_scorer_2: u64,
}

impl TeamStats {
    pub fn from_sheets(scoring: &ScoringTotals, dig: u64, reception: u64, set: u64) -> Self {
        Self {
            attack: scoring.attack,
            block: scoring.block,
            serve: scoring.serve,
            opp_error: scoring.opp_error,
            dig,
            reception,
            set,
            top_scorer_1: scoring.top_scorer_1,
            top_scorer_2: scoring.top_scorer_2,
        }
    }

    pub fn total_points(&self) -> u64 {
        self.attack + self.block + self.serve + self.opp_error
    }

    pub fn value(&self, stat: Stat) -> u64 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Block => self.block,
            Stat::Serve => self.serve,
            Stat::OppError => self.opp_error,
            Stat::TotalPoints => self.total_points(),
            Stat::Dig => self.dig,
            Stat::Reception => self.reception,
            Stat::Set => self.set,
            Stat::TopScorer1 => self.top_scorer_1,
            Stat::TopScorer2 => self.top_scorer_2,
        }
    }
}

/// Reads one team's sheets into a TeamStats.
///
/// Parses the scoring sheet once and the dig, reception and set sheets with
/// the first-number rule. Attack, block and serve sheets are not read and are
/// not cross-checked against the scoring sheet.
pub fn aggregate_team<R>(
    recognizer: &R,
    sheets: &TeamSheets,
    columns: &ScoringColumns,
) -> Result<TeamStats>
where
    R: TextRecognizer + ?Sized,
{
    let scoring = parse_scoring(recognizer, sheets.path(Sheet::Scoring), columns)?;
    let dig = parse_simple_total(recognizer, sheets.path(Sheet::Dig))?;
    let reception = parse_simple_total(recognizer, sheets.path(Sheet::Reception))?;
    let set = parse_simple_total(recognizer, sheets.path(Sheet::Set))?;

    let stats = TeamStats::from_sheets(&scoring, dig, reception, set);
    log(&format!(
        "{}: points={} (atk {} blk {} srv {} err {}), dig={} rec={} set={}, top=[{}, {}]",
        sheets.prefix(),
        stats.total_points(),
        stats.attack,
        stats.block,
        stats.serve,
        stats.opp_error,
        stats.dig,
        stats.reception,
        stats.set,
        stats.top_scorer_1,
        stats.top_scorer_2
    ));

    Ok(stats)
}
