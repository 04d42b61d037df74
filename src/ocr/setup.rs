use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DatasetError, Result};
use crate::log;
use crate::paths::get_tesseract_dir;

fn executable_name() -> String {
    format!("tesseract{}", std::env::consts::EXE_SUFFIX)
}

fn on_path() -> bool {
    Command::new("tesseract")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Finds the Tesseract executable: explicit path, then our local dir, then PATH.
pub fn find_tesseract_executable(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(DatasetError::Config(format!(
            "Tesseract executable {} does not exist",
            path.display()
        )));
    }

    let local_exe = get_tesseract_dir().join(executable_name());
    if local_exe.is_file() {
        log(&format!("Tesseract found at: {}", local_exe.display()));
        return Ok(local_exe);
    }

    if on_path() {
        return Ok(PathBuf::from("tesseract"));
    }

    Err(DatasetError::Config(format!(
        "Tesseract not found. Install Tesseract-OCR and add it to PATH, \
         pass --tesseract <path>, or copy it to {}",
        get_tesseract_dir().display()
    )))
}

/// Finds a tessdata directory holding `<language>.traineddata`.
///
/// Returns `None` when nothing is found, in which case Tesseract falls back
/// to its compiled-in location.
pub fn find_tessdata_dir(explicit: Option<&Path>, language: &str) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }

    let traineddata = format!("{}.traineddata", language);

    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join(&traineddata).exists() {
        return Some(local_tessdata);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join(&traineddata).exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join(&traineddata).exists() {
            return Some(p);
        }
    }

    None
}
