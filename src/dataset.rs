//! Loading labeled posts from `;`-separated CSV files.
//!
//! The file has no header row; columns are `id;text;class`. Loading cleans
//! the rows before training sees them:
//!
//! - rows missing the text or class field are dropped
//! - repeated `(text, class)` pairs keep only their first occurrence
//! - rows whose text is blank are dropped
//!
//! An unknown class name fails the whole load.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};
use crate::model::label::Label;

/// One labeled post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    /// Source identifier (for example the author handle).
    pub id: String,
    /// Raw post text.
    pub text: String,
    /// Target class.
    pub label: Label,
}

impl LabeledText {
    /// Create a labeled post.
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T, label: Label) -> Self {
        LabeledText {
            id: id.into(),
            text: text.into(),
            label,
        }
    }
}

/// A cleaned corpus of labeled posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<LabeledText>,
    total_rows: usize,
}

impl Dataset {
    /// Build a dataset from records, dropping duplicates and blank texts.
    pub fn from_records(records: Vec<LabeledText>) -> Self {
        let total_rows = records.len();
        let records = deduplicate(records);
        Dataset {
            records,
            total_rows,
        }
    }

    /// Load a dataset from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        DatasetReader::new().read_path(path)
    }

    /// The cleaned records, in file order.
    pub fn records(&self) -> &[LabeledText] {
        &self.records
    }

    /// Number of cleaned records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether no records survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of data rows read before cleaning.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Integer class id of every record.
    pub fn label_ids(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.label.id()).collect()
    }

    /// Number of records per class.
    pub fn class_counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.label).or_insert(0) += 1;
        }
        counts
    }
}

fn deduplicate(records: Vec<LabeledText>) -> Vec<LabeledText> {
    let before = records.len();
    let mut seen: HashSet<(String, Label)> = HashSet::new();
    let mut blank = 0usize;

    let kept: Vec<LabeledText> = records
        .into_iter()
        .filter(|record| {
            if record.text.trim().is_empty() {
                blank += 1;
                return false;
            }
            seen.insert((record.text.clone(), record.label))
        })
        .collect();

    let duplicates = before - kept.len() - blank;
    if duplicates > 0 {
        warn!("Dropped {duplicates} duplicate rows");
    }
    if blank > 0 {
        warn!("Dropped {blank} rows with blank text");
    }
    kept
}

/// CSV reader for labeled post datasets.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    /// Field delimiter (default: `;`)
    delimiter: u8,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader {
    /// Create a reader for `;`-separated files.
    pub fn new() -> Self {
        DatasetReader { delimiter: b';' }
    }

    /// Read and clean a dataset file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            UjaranError::input(format!("cannot open dataset {}: {e}", path.display()))
        })?;
        debug!("Reading dataset from {}", path.display());
        self.read(file)
    }

    /// Read and clean a dataset from any reader.
    ///
    /// Fields are decoded as UTF-8, replacing invalid bytes.
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut total_rows = 0usize;
        let mut missing = 0usize;
        let mut row = ByteRecord::new();

        while reader.read_byte_record(&mut row)? {
            total_rows += 1;

            let field = |index: usize| {
                row.get(index)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    .filter(|value| !value.is_empty())
            };

            let (Some(text), Some(class)) = (field(1), field(2)) else {
                missing += 1;
                continue;
            };
            if class.trim().is_empty() {
                missing += 1;
                continue;
            }

            let label = class.parse::<Label>().map_err(|e| {
                UjaranError::input(format!("row {total_rows}: {e}"))
            })?;
            records.push(LabeledText::new(field(0).unwrap_or_default(), text, label));
        }

        if missing > 0 {
            warn!("Dropped {missing} rows with a missing text or class field");
        }

        let records = deduplicate(records);
        if records.is_empty() {
            return Err(UjaranError::input(format!(
                "dataset has no usable rows ({total_rows} read)"
            )));
        }
        debug!(
            "Loaded {} of {total_rows} rows after cleaning",
            records.len()
        );

        Ok(Dataset {
            records,
            total_rows,
        })
    }
}
