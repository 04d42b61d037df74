use std::path::Path;

use super::csv_writer::write_csv;
use super::spec::{parse_specs, MatchSpec};
use crate::config::DatasetConfig;
use crate::error::{DatasetError, Result};
use crate::log;
use crate::ocr::TextRecognizer;
use crate::stats::team::Stat;
use crate::stats::{diff_match, MatchFeatureRow};

/// Ordered feature rows, one per match specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<MatchFeatureRow>,
}

impl Dataset {
    pub fn rows(&self) -> &[MatchFeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fixed-size table of row slots, one per input specification.
///
/// Each row is written at the index of the specification it came from, so
/// the output order never depends on the order rows were produced in.
#[derive(Debug)]
pub struct DatasetAssembler {
    slots: Vec<Option<MatchFeatureRow>>,
}

impl DatasetAssembler {
    pub fn with_slots(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Stores `row` at `index`. Out-of-range indices are ignored and show up
    /// as missing rows in `finish`.
    pub fn insert(&mut self, index: usize, row: MatchFeatureRow) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(row);
        }
    }

    /// Final table-wide check: every slot must hold a row.
    pub fn finish(self) -> Result<Dataset> {
        let missing_rows: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect();
        if !missing_rows.is_empty() {
            return Err(DatasetError::IncompleteDataset { missing_rows });
        }

        Ok(Dataset {
            rows: self.slots.into_iter().flatten().collect(),
        })
    }
}

/// Processes matches in order. The first failure aborts the whole batch.
pub fn collect_rows<R>(recognizer: &R, config: &DatasetConfig, specs: &[MatchSpec]) -> Result<Dataset>
where
    R: TextRecognizer + ?Sized,
{
    let mut assembler = DatasetAssembler::with_slots(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        log(&format!(
            "Match {}/{}: {} (label {})",
            index + 1,
            specs.len(),
            spec.match_dir.display(),
            spec.label
        ));
        let row = diff_match(recognizer, config, &spec.match_dir, spec.label)?;
        log(&format!(
            "Match {}: total_points_diff={} label={}",
            index + 1,
            row.diff(Stat::TotalPoints),
            row.label()
        ));
        assembler.insert(index, row);
    }

    assembler.finish()
}

/// Builds the dataset for `specs` and writes it to `output` as CSV.
///
/// Every specification is validated before any image is read. Nothing is
/// written unless every match produced a complete row.
pub fn build_dataset<R, S>(
    recognizer: &R,
    config: &DatasetConfig,
    specs: &[S],
    output: &Path,
) -> Result<Dataset>
where
    R: TextRecognizer + ?Sized,
    S: AsRef<str>,
{
    let specs = parse_specs(specs)?;
    let dataset = collect_rows(recognizer, config, &specs)?;

    write_csv(output, &dataset)?;
    if dataset.is_empty() {
        log("No matches given, wrote header only");
    }
    log(&format!(
        "Wrote {} rows to {}",
        dataset.len(),
        output.display()
    ));

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::csv_writer::header_line;
    use crate::testing::{write_match, TranscriptRecognizer};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Records which images were requested.
    struct CountingRecognizer {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl TextRecognizer for CountingRecognizer {
        fn recognize(&self, image_path: &Path) -> Result<String> {
            self.seen.borrow_mut().push(image_path.to_path_buf());
            TranscriptRecognizer.recognize(image_path)
        }
    }

    fn spec(dir: &Path, label: i64) -> String {
        format!("{}:{}", dir.display(), label)
    }

    #[test]
    fn test_build_dataset_writes_rows_in_order() {
        let dir = tempdir().unwrap();
        let m1 = write_match(dir.path(), "m1");
        let m2 = write_match(dir.path(), "m2");
        // m2 has team B's scoring sheet emptied out.
        std::fs::write(m2.join("teamB_scoring.png"), "no rows here\n").unwrap();
        let output = dir.path().join("dataset.csv");

        let specs = vec![spec(&m1, 1), spec(&m2, 0)];
        let dataset =
            build_dataset(&TranscriptRecognizer, &DatasetConfig::default(), &specs, &output)
                .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].diff(Stat::TotalPoints), 32);

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], header_line());
        assert_eq!(lines[1], "3,3,1,-2,5,4,5,18,3,2,1");
        assert_eq!(lines[2], "18,7,4,3,32,4,5,18,20,12,0");
    }

    #[test]
    fn test_malformed_spec_aborts_before_any_ocr() {
        let dir = tempdir().unwrap();
        let m1 = write_match(dir.path(), "m1");
        let output = dir.path().join("dataset.csv");
        let recognizer = CountingRecognizer {
            seen: RefCell::new(Vec::new()),
        };

        let specs = vec![spec(&m1, 1), "match1".to_string()];
        let err = build_dataset(&recognizer, &DatasetConfig::default(), &specs, &output)
            .unwrap_err();

        assert!(matches!(err, DatasetError::InvalidMatchSpecification { .. }));
        assert!(recognizer.seen.borrow().is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_scoring_image_propagates() {
        let dir = tempdir().unwrap();
        let m1 = write_match(dir.path(), "m1");
        let m2 = write_match(dir.path(), "m2");
        std::fs::remove_file(m2.join("teamA_scoring.png")).unwrap();
        let output = dir.path().join("dataset.csv");

        let specs = vec![spec(&m1, 1), spec(&m2, 1)];
        let err = build_dataset(&TranscriptRecognizer, &DatasetConfig::default(), &specs, &output)
            .unwrap_err();

        match err {
            DatasetError::ImageUnreadable { path, .. } => {
                assert_eq!(path, m2.join("teamA_scoring.png"));
            }
            other => panic!("expected ImageUnreadable, got {other:?}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_run_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dataset.csv");
        std::fs::write(&output, "previous\n").unwrap();

        let specs = vec![spec(&dir.path().join("nowhere"), 1)];
        assert!(
            build_dataset(&TranscriptRecognizer, &DatasetConfig::default(), &specs, &output)
                .is_err()
        );
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn test_assembler_reports_empty_slots() {
        let mut assembler = DatasetAssembler::with_slots(3);
        let dir = tempdir().unwrap();
        let m1 = write_match(dir.path(), "m1");
        let row = diff_match(&TranscriptRecognizer, &DatasetConfig::default(), &m1, 1).unwrap();
        assembler.insert(1, row);
        assembler.insert(7, diff_match(&TranscriptRecognizer, &DatasetConfig::default(), &m1, 0).unwrap());

        match assembler.finish() {
            Err(DatasetError::IncompleteDataset { missing_rows }) => {
                assert_eq!(missing_rows, vec![0, 2]);
            }
            other => panic!("expected IncompleteDataset, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_writes_header_only() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dataset.csv");
        let specs: Vec<String> = Vec::new();

        let dataset =
            build_dataset(&TranscriptRecognizer, &DatasetConfig::default(), &specs, &output)
                .unwrap();
        assert!(dataset.is_empty());
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            format!("{}\n", header_line())
        );
    }
}
