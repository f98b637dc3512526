//! Training configuration.
//!
//! Every field has a default, so a JSON configuration file only needs to
//! name the values it overrides:
//!
//! ```json
//! { "alpha": 1.0, "max_features": 500 }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};
use crate::spelling::CorrectorConfig;

/// Configuration of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of each class used for training.
    pub train_fraction: f64,
    /// Seed for the stratified split and the cross-validation permutation.
    pub seed: u64,
    /// Vocabulary cap of the vectorizer; `None` keeps every term.
    pub max_features: Option<usize>,
    /// Additive smoothing of the classifier.
    pub alpha: f64,
    /// Number of cross-validation folds.
    pub cv_folds: usize,
    /// Minimum corpus frequency of a correctly spelled word.
    pub min_word_count: usize,
    /// Maximum edit distance of a spelling correction.
    pub max_edit_distance: usize,
    /// Number of thresholds sampled for AUC.
    pub auc_thresholds: usize,
    /// Whether to correct spelling against the corpus vocabulary.
    pub spelling_correction: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            train_fraction: 0.8,
            seed: 42,
            max_features: Some(200),
            alpha: 2.0,
            cv_folds: 5,
            min_word_count: 2,
            max_edit_distance: 2,
            auc_thresholds: 200,
            spelling_correction: true,
        }
    }
}

impl TrainingConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            UjaranError::invalid_config(format!("cannot open {}: {e}", path.display()))
        })?;
        let config: TrainingConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(UjaranError::invalid_config(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(UjaranError::invalid_config(format!(
                "train_fraction must lie strictly between 0 and 1, got {}",
                self.train_fraction
            )));
        }
        if self.cv_folds < 2 {
            return Err(UjaranError::invalid_config(format!(
                "cv_folds must be at least 2, got {}",
                self.cv_folds
            )));
        }
        if self.auc_thresholds < 2 {
            return Err(UjaranError::invalid_config(format!(
                "auc_thresholds must be at least 2, got {}",
                self.auc_thresholds
            )));
        }
        if self.max_features == Some(0) {
            return Err(UjaranError::invalid_config("max_features must be at least 1"));
        }
        Ok(())
    }

    /// Fraction of each class held out for testing.
    ///
    /// Rounded to 12 decimal places, so `0.8` gives exactly `0.2`.
    pub fn test_fraction(&self) -> f64 {
        ((1.0 - self.train_fraction) * 1e12).round() / 1e12
    }

    /// Spelling corrector settings derived from this configuration.
    pub fn corrector_config(&self) -> CorrectorConfig {
        CorrectorConfig {
            max_distance: self.max_edit_distance,
        }
    }
}
