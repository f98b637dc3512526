//! Multinomial Naive Bayes over continuous (TF-IDF) features.
//!
//! Fitting is closed form. For each class `c` with `n_c` of `n` samples:
//!
//! ```text
//! class_log_prior[c]     = ln(n_c / n)
//! feature_count[c][f]    = Σ x[i][f]  over samples i of class c
//! feature_log_prob[c][f] = ln((feature_count[c][f] + α) / Σ_f (feature_count[c][f] + α))
//! ```
//!
//! Prediction works in log space:
//! `log_joint[i][c] = x[i] · feature_log_prob[c] + class_log_prior[c]`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};
use crate::ml::matrix::FeatureMatrix;

/// Multinomial Naive Bayes classifier with additive smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNaiveBayes {
    /// Additive (Laplace/Lidstone) smoothing constant.
    alpha: f64,
    /// Sorted class labels.
    classes: Vec<usize>,
    /// Log prior per class.
    class_log_prior: Vec<f64>,
    /// Log probability of each feature given a class, `n_classes × n_features`.
    feature_log_prob: Vec<Vec<f64>>,
    /// Number of features seen at fit time.
    n_features: usize,
}

impl Default for MultinomialNaiveBayes {
    fn default() -> Self {
        MultinomialNaiveBayes {
            alpha: 1.0,
            classes: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
            n_features: 0,
        }
    }
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha > 0.0 {
        Ok(())
    } else {
        Err(UjaranError::numeric(format!(
            "alpha must be a positive finite number, got {alpha}"
        )))
    }
}

impl MultinomialNaiveBayes {
    /// Create an unfitted classifier with smoothing constant `alpha`.
    pub fn new(alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        Ok(MultinomialNaiveBayes {
            alpha,
            ..Default::default()
        })
    }

    /// Rebuild a fitted classifier from exported parameters.
    ///
    /// A `-inf` prior is accepted (a class that never occurred); NaN is not.
    pub fn from_parts(
        alpha: f64,
        classes: Vec<usize>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let n_features = feature_log_prob.first().map_or(0, Vec::len);
        let model = MultinomialNaiveBayes {
            alpha,
            classes,
            class_log_prior,
            feature_log_prob,
            n_features,
        };
        model.validate()?;
        Ok(model)
    }

    /// Fit on `x` with labels `y`; the classes are the sorted unique labels.
    pub fn fit(&mut self, x: &FeatureMatrix, y: &[usize]) -> Result<()> {
        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        self.fit_with_classes(x, y, &classes)
    }

    /// Fit on `x` with labels `y` against a declared class list.
    ///
    /// Every declared class must have at least one sample, otherwise its
    /// prior would be `ln(0)`.
    pub fn fit_with_classes(
        &mut self,
        x: &FeatureMatrix,
        y: &[usize],
        classes: &[usize],
    ) -> Result<()> {
        if x.n_rows() != y.len() {
            return Err(UjaranError::input(format!(
                "feature matrix has {} rows but {} labels were given",
                x.n_rows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(UjaranError::input("cannot fit on zero samples"));
        }
        if let Some(value) = x.as_slice().iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(UjaranError::numeric(format!(
                "Multinomial Naive Bayes requires non-negative finite feature values, found {value}"
            )));
        }

        let mut classes = classes.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let n_classes = classes.len();
        let n_features = x.n_cols();
        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0f64; n_features]; n_classes];

        for (row, label) in x.rows().zip(y) {
            let c = classes
                .binary_search(label)
                .map_err(|_| UjaranError::input(format!("label {label} is not a declared class")))?;
            class_count[c] += 1;
            for (total, value) in feature_count[c].iter_mut().zip(row) {
                *total += value;
            }
        }

        if let Some(c) = class_count.iter().position(|count| *count == 0) {
            return Err(UjaranError::numeric(format!(
                "class {} has no training samples",
                classes[c]
            )));
        }

        let n_samples = y.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|count| (*count as f64 / n_samples).ln())
            .collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let smoothed: Vec<f64> = counts.into_iter().map(|v| v + self.alpha).collect();
                let total: f64 = smoothed.iter().sum();
                smoothed.into_iter().map(|v| (v / total).ln()).collect()
            })
            .collect();

        self.classes = classes;
        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        self.n_features = n_features;

        Ok(())
    }

    fn check_input(&self, x: &FeatureMatrix) -> Result<()> {
        if !self.is_fitted() {
            return Err(UjaranError::other("classifier has not been fitted"));
        }
        if x.n_cols() != self.n_features {
            return Err(UjaranError::dimension(self.n_features, x.n_cols()));
        }
        Ok(())
    }

    fn log_joint_row(&self, row: &[f64]) -> Vec<f64> {
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_prob, prior)| {
                let likelihood: f64 = row.iter().zip(log_prob).map(|(x, lp)| x * lp).sum();
                likelihood + prior
            })
            .collect()
    }

    /// Unnormalized log posterior per sample and class.
    pub fn predict_log_joint(&self, x: &FeatureMatrix) -> Result<Vec<Vec<f64>>> {
        self.check_input(x)?;
        Ok(x.rows().map(|row| self.log_joint_row(row)).collect())
    }

    /// Class probabilities per sample; each row sums to 1.
    ///
    /// The row maximum is subtracted before exponentiating. A row whose
    /// entries are all `-inf` becomes uniform.
    pub fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<Vec<f64>>> {
        Ok(self
            .predict_log_joint(x)?
            .into_iter()
            .map(|row| normalize_log_row(&row))
            .collect())
    }

    /// Most probable class per sample.
    pub fn predict(&self, x: &FeatureMatrix) -> Result<Vec<usize>> {
        Ok(self
            .predict_log_joint(x)?
            .iter()
            .map(|row| self.classes[argmax(row)])
            .collect())
    }

    /// Check shapes and values of fitted state.
    pub fn validate(&self) -> Result<()> {
        check_alpha(self.alpha)?;
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(UjaranError::artifact("classifier has no classes"));
        }
        if self.classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(UjaranError::artifact("classes must be sorted and unique"));
        }
        if self.class_log_prior.len() != n_classes || self.feature_log_prob.len() != n_classes {
            return Err(UjaranError::artifact(format!(
                "expected {n_classes} priors and feature rows, got {} and {}",
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            )));
        }
        if let Some(row) = self
            .feature_log_prob
            .iter()
            .find(|row| row.len() != self.n_features)
        {
            return Err(UjaranError::artifact(format!(
                "feature_log_prob row has {} entries, expected {}",
                row.len(),
                self.n_features
            )));
        }
        if self.class_log_prior.iter().any(|p| p.is_nan() || *p > 0.0) {
            return Err(UjaranError::artifact("class_log_prior must be valid log probabilities"));
        }
        if self.feature_log_prob.iter().flatten().any(|p| !p.is_finite()) {
            return Err(UjaranError::artifact("feature_log_prob must be finite"));
        }
        Ok(())
    }

    /// Check whether the classifier has been fitted.
    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// The smoothing constant.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Sorted class labels.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Log prior per class.
    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    /// Per-class feature log probabilities.
    pub fn feature_log_prob(&self) -> &[Vec<f64>] {
        &self.feature_log_prob
    }

    /// Number of features.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// Index of the largest value; `-inf` entries never win over finite ones.
fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (index, value) in row.iter().enumerate() {
        if *value > best_value {
            best = index;
            best_value = *value;
        }
    }
    best
}

fn normalize_log_row(row: &[f64]) -> Vec<f64> {
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return vec![1.0 / row.len() as f64; row.len()];
    }
    let exp: Vec<f64> = row.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.into_iter().map(|v| v / total).collect()
}
