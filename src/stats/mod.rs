//! Statistic extraction: sheet parsers, team aggregation and match rows.
//!
//! Data flows image → tokens → numbers → per-sheet totals → TeamStats,
//! and two TeamStats become one MatchFeatureRow.

pub mod parse;
pub mod row;
pub mod sheets;
pub mod team;

pub use row::{column_names, diff_match, MatchFeatureRow};
