//! Test doubles shared by the unit tests.

use std::path::Path;

use crate::error::{DatasetError, Result};
use crate::ocr::TextRecognizer;
use crate::stats::sheets::Sheet;

/// Treats every "image" as a UTF-8 file holding the OCR transcript.
pub struct TranscriptRecognizer;

impl TextRecognizer for TranscriptRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String> {
        std::fs::read_to_string(image_path)
            .map_err(|e| DatasetError::image_unreadable(image_path, e))
    }
}

/// Writes all seven sheets for one team. Unparsed sheets get placeholder text.
pub fn write_team(dir: &Path, prefix: &str, scoring: &str, dig: &str, reception: &str, set: &str) {
    for sheet in Sheet::ALL {
        let content = match sheet {
            Sheet::Scoring => scoring,
            Sheet::Dig => dig,
            Sheet::Reception => reception,
            Sheet::Set => set,
            Sheet::Attack | Sheet::Block | Sheet::Serve => "99 99 99 99 99 99\n",
        };
        std::fs::write(dir.join(format!("{}_{}.png", prefix, sheet)), content).unwrap();
    }
}

/// Writes a complete two-team match directory under `root/name`.
pub fn write_match(root: &Path, name: &str) -> std::path::PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    write_team(
        &dir,
        "teamA",
        "Name Tot Atk Blk Srv Err\n1 10 5 3 2\n1 8 2 1 1\n",
        "4\n7\n0\n2\n",
        "20 1\n5\n",
        "30\n",
    );
    write_team(
        &dir,
        "teamB",
        "Name Tot Atk Blk Srv Err\n3 12 1 0 4\n2 3 3 3 1\n9 1 1 1\n",
        "9\n",
        "10\n10\n",
        "12 5\n",
    );
    dir
}
