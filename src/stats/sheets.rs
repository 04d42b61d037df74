//! Canonical screenshot set for one team.
//!
//! Each team contributes seven sheets. Only scoring, reception, dig and set
//! are read; attack, block and serve are part of the naming convention and
//! are checked for presence but never parsed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::SheetLayout;
use crate::error::{DatasetError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Scoring,
    Attack,
    Block,
    Serve,
    Reception,
    Dig,
    Set,
}

impl Sheet {
    pub const ALL: [Sheet; 7] = [
        Sheet::Scoring,
        Sheet::Attack,
        Sheet::Block,
        Sheet::Serve,
        Sheet::Reception,
        Sheet::Dig,
        Sheet::Set,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sheet::Scoring => "scoring",
            Sheet::Attack => "attack",
            Sheet::Block => "block",
            Sheet::Serve => "serve",
            Sheet::Reception => "reception",
            Sheet::Dig => "dig",
            Sheet::Set => "set",
        }
    }

    /// Whether this sheet's content feeds TeamStats.
    pub fn is_parsed(self) -> bool {
        matches!(
            self,
            Sheet::Scoring | Sheet::Reception | Sheet::Dig | Sheet::Set
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two sides of a match, in diff order (A minus B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn prefix(self, layout: &SheetLayout) -> &str {
        match self {
            Team::A => &layout.team_a_prefix,
            Team::B => &layout.team_b_prefix,
        }
    }
}

/// Resolved screenshot paths for one team in one match directory.
#[derive(Debug, Clone)]
pub struct TeamSheets {
    prefix: String,
    paths: [PathBuf; 7],
}

impl TeamSheets {
    /// Builds `<match_dir>/<prefix>_<sheet>.<ext>` for every canonical sheet.
    pub fn resolve(match_dir: &Path, team: Team, layout: &SheetLayout) -> Self {
        let prefix = team.prefix(layout).to_string();
        let paths = Sheet::ALL.map(|sheet| {
            match_dir.join(format!("{}_{}.{}", prefix, sheet.name(), layout.extension))
        });
        Self { prefix, paths }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn path(&self, sheet: Sheet) -> &Path {
        &self.paths[sheet.index()]
    }

    /// Fails with `ImageUnreadable` on the first sheet file that does not exist.
    ///
    /// With `include_unparsed` false only the four parsed sheets are checked.
    pub fn ensure_present(&self, include_unparsed: bool) -> Result<()> {
        for sheet in Sheet::ALL {
            if !include_unparsed && !sheet.is_parsed() {
                continue;
            }
            let path = self.path(sheet);
            if !path.is_file() {
                return Err(DatasetError::image_unreadable(path, "file not found"));
            }
        }
        Ok(())
    }
}
