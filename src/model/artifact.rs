//! The portable model artifact.
//!
//! A [`ModelArtifact`] carries everything an inference consumer needs to
//! reproduce predictions without any training code: classifier parameters,
//! vectorizer state, the spelling tables, the label maps, and the metrics
//! and dataset counters of the run that produced it. It serializes to JSON
//! with sorted map keys, so the same run always writes the same bytes.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};
use crate::ml::naive_bayes::MultinomialNaiveBayes;
use crate::ml::tfidf::TfIdfVectorizer;

/// Scores of the classifier on one data split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    /// Micro-averaged precision.
    pub precision: f64,
    /// Micro-averaged recall.
    pub recall: f64,
    /// Micro-averaged F1.
    pub f1: f64,
    /// Mean one-vs-rest AUC.
    pub auc: f64,
}

impl Metrics {
    fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("accuracy", self.accuracy),
            ("precision", self.precision),
            ("recall", self.recall),
            ("f1", self.f1),
            ("auc", self.auc),
        ]
    }
}

/// Cross-validation summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvMetrics {
    /// Mean held-out accuracy across folds.
    pub accuracy: f64,
    /// Population standard deviation of the fold accuracies.
    pub std: f64,
    #[serde(default)]
    pub fold_accuracies: Vec<f64>,
}

fn default_max_edit_distance() -> usize {
    2
}

/// A trained model in its portable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: MultinomialNaiveBayes,
    pub vectorizer: TfIdfVectorizer,
    /// Correctly spelled words; empty when spelling correction is off.
    pub vocab: Vec<String>,
    /// Corpus word counts backing spelling correction.
    pub word_freq: BTreeMap<String, usize>,
    /// Maximum edit distance of spelling corrections.
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    pub map_target: BTreeMap<String, usize>,
    pub reverse: BTreeMap<usize, String>,
    pub training_accuracy: f64,
    pub testing_accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
    /// Rows in the dataset before cleaning.
    pub total_data: usize,
    pub train_ratio: f64,
    pub test_ratio: f64,
    pub alpha: f64,
    pub max_features: Option<usize>,
    pub training_metrics: Metrics,
    pub testing_metrics: Metrics,
    pub cv_metrics: CvMetrics,
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(UjaranError::artifact(format!(
            "{name} must be a finite number, found {value}"
        )))
    }
}

impl ModelArtifact {
    /// Check that the artifact is complete and self-consistent.
    ///
    /// Every metric must be finite: JSON has no NaN, so a NaN metric would
    /// be exported as `null`.
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.vectorizer.validate()?;

        if self.model.n_features() != self.vectorizer.n_features() {
            return Err(UjaranError::artifact(format!(
                "classifier expects {} features but the vectorizer produces {}",
                self.model.n_features(),
                self.vectorizer.n_features()
            )));
        }
        if self.model.class_log_prior().iter().any(|p| !p.is_finite()) {
            return Err(UjaranError::artifact(
                "class_log_prior contains a class without training samples",
            ));
        }

        for class in self.model.classes() {
            if !self.reverse.contains_key(class) {
                return Err(UjaranError::artifact(format!(
                    "class {class} has no entry in the reverse label map"
                )));
            }
        }
        for (name, id) in &self.map_target {
            if self.reverse.get(id) != Some(name) {
                return Err(UjaranError::artifact(format!(
                    "label maps disagree on {name:?} -> {id}"
                )));
            }
        }
        if self.map_target.len() != self.reverse.len() {
            return Err(UjaranError::artifact("label maps have different sizes"));
        }

        if let Some(word) = self.vocab.iter().find(|w| !self.word_freq.contains_key(*w)) {
            return Err(UjaranError::artifact(format!(
                "vocabulary word {word:?} has no frequency entry"
            )));
        }

        for (split, metrics) in [
            ("training_metrics", &self.training_metrics),
            ("testing_metrics", &self.testing_metrics),
        ] {
            for (name, value) in metrics.values() {
                check_finite(&format!("{split}.{name}"), value)?;
            }
        }
        check_finite("cv_metrics.accuracy", self.cv_metrics.accuracy)?;
        check_finite("cv_metrics.std", self.cv_metrics.std)?;
        for value in &self.cv_metrics.fold_accuracies {
            check_finite("cv_metrics.fold_accuracies", *value)?;
        }
        for (name, value) in [
            ("training_accuracy", self.training_accuracy),
            ("testing_accuracy", self.testing_accuracy),
            ("train_ratio", self.train_ratio),
            ("test_ratio", self.test_ratio),
            ("alpha", self.alpha),
        ] {
            check_finite(name, value)?;
        }

        if self.alpha != self.model.alpha() {
            return Err(UjaranError::artifact(format!(
                "alpha {} differs from the classifier's {}",
                self.alpha,
                self.model.alpha()
            )));
        }
        if self.max_features != self.vectorizer.max_features() {
            return Err(UjaranError::artifact(
                "max_features differs from the vectorizer's cap",
            ));
        }
        if self.train_size + self.test_size > self.total_data {
            return Err(UjaranError::artifact(format!(
                "train_size {} + test_size {} exceeds total_data {}",
                self.train_size, self.test_size, self.total_data
            )));
        }

        Ok(())
    }

    /// Serialize to a JSON string.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse and validate an artifact from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Validate and write the artifact as pretty-printed JSON.
    ///
    /// The JSON goes to a temporary file next to `path`, which is renamed
    /// over `path` only once fully written. A failed write leaves no
    /// artifact behind.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;

        let path = path.as_ref();
        let temp_path = temporary_path(path);
        let result = (|| -> Result<()> {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.write_all(b"\n")?;
            let file = writer
                .into_inner()
                .map_err(|e| UjaranError::from(e.into_error()))?;
            file.sync_all()?;
            fs::rename(&temp_path, path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        } else {
            debug!("Wrote model artifact to {}", path.display());
        }
        result
    }

    /// Read and validate an artifact from a JSON file.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))?;
        artifact.validate()?;
        debug!("Read model artifact from {}", path.display());
        Ok(artifact)
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model.json".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}
