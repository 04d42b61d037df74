use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use super::preprocess::prepare_for_ocr;
use super::setup::{find_tessdata_dir, find_tesseract_executable};
use crate::config::OcrConfig;
use crate::error::{DatasetError, Result};

/// Turns one screenshot into raw text.
///
/// Output is expected line-oriented, top-to-bottom, with tokens separated by
/// whitespace. Implementations report a missing or undecodable image as
/// `ImageUnreadable`.
pub trait TextRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String>;
}

/// Runs the Tesseract command line tool on a preprocessed copy of the image.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    executable: PathBuf,
    tessdata_dir: Option<PathBuf>,
    language: String,
    psm: u8,
    threshold: Option<u8>,
}

impl TesseractRecognizer {
    /// Locates Tesseract and its language data according to `ocr`.
    pub fn from_config(ocr: &OcrConfig) -> Result<Self> {
        let executable = find_tesseract_executable(ocr.tesseract_path.as_deref())?;
        let tessdata_dir = find_tessdata_dir(ocr.tessdata_dir.as_deref(), &ocr.language);

        crate::log(&format!(
            "Using Tesseract at {} (lang={}, psm={}, tessdata={})",
            executable.display(),
            ocr.language,
            ocr.psm,
            tessdata_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        ));

        Ok(Self {
            executable,
            tessdata_dir,
            language: ocr.language.clone(),
            psm: ocr.psm,
            threshold: ocr.threshold,
        })
    }

    fn ocr_error(image_path: &Path, reason: impl ToString) -> DatasetError {
        DatasetError::Ocr {
            path: image_path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String> {
        // Decode first so a missing or corrupt file never reaches Tesseract.
        let img = image::open(image_path)
            .map_err(|e| DatasetError::image_unreadable(image_path, e))?;
        let prepared = prepare_for_ocr(&img, self.threshold);

        let temp_input = NamedTempFile::with_suffix(".png")?;
        prepared
            .save(temp_input.path())
            .map_err(|e| Self::ocr_error(image_path, format!("failed to stage image: {}", e)))?;

        let mut command = Command::new(&self.executable);
        command
            .arg(temp_input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string());
        if let Some(dir) = &self.tessdata_dir {
            command.arg("--tessdata-dir").arg(dir);
        }

        let output = command
            .output()
            .map_err(|e| Self::ocr_error(image_path, format!("failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::ocr_error(
                image_path,
                format!("tesseract exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn recognizer() -> TesseractRecognizer {
        TesseractRecognizer {
            executable: PathBuf::from("tesseract"),
            tessdata_dir: None,
            language: "eng".to_string(),
            psm: 3,
            threshold: None,
        }
    }

    #[test]
    fn test_missing_image_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("teamA_scoring.png");

        let err = recognizer().recognize(&path).unwrap_err();
        assert!(matches!(err, DatasetError::ImageUnreadable { .. }));
    }

    #[test]
    fn test_corrupt_image_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("teamA_dig.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = recognizer().recognize(&path).unwrap_err();
        match err {
            DatasetError::ImageUnreadable { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ImageUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_executable_is_ocr_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("teamB_set.png");
        image::GrayImage::new(4, 4).save(&path).unwrap();

        let mut rec = recognizer();
        rec.executable = dir.path().join("no-such-tesseract");

        let err = rec.recognize(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Ocr { .. }));
    }
}
