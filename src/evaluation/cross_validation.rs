//! K-fold cross validation of the Naive Bayes classifier.
//!
//! Samples are permuted once with a seeded generator and cut into `folds`
//! contiguous blocks. Block sizes are `n / folds`, with the first
//! `n % folds` blocks one sample larger. Each fold trains an independent
//! classifier on the other blocks, so folds run in parallel on the rayon
//! pool; statistics are computed only after every fold has finished.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};
use crate::evaluation::metrics::accuracy;
use crate::ml::matrix::FeatureMatrix;
use crate::ml::naive_bayes::MultinomialNaiveBayes;

/// Per-fold held-out accuracies of one cross-validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Held-out accuracy of each fold, in fold order.
    pub fold_accuracies: Vec<f64>,
    /// Number of held-out samples in each fold.
    pub fold_sizes: Vec<usize>,
}

impl CrossValidationResult {
    /// Mean accuracy across folds.
    pub fn mean(&self) -> f64 {
        if self.fold_accuracies.is_empty() {
            return 0.0;
        }
        self.fold_accuracies.iter().sum::<f64>() / self.fold_accuracies.len() as f64
    }

    /// Population standard deviation of the fold accuracies.
    pub fn std(&self) -> f64 {
        if self.fold_accuracies.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .fold_accuracies
            .iter()
            .map(|a| (a - mean).powi(2))
            .sum::<f64>()
            / self.fold_accuracies.len() as f64;
        variance.sqrt()
    }

    /// Lowest fold accuracy.
    pub fn min(&self) -> f64 {
        self.fold_accuracies.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Highest fold accuracy.
    pub fn max(&self) -> f64 {
        self.fold_accuracies
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Sizes of `folds` blocks covering `n_samples` samples.
///
/// # Examples
///
/// ```
/// use ujaran::evaluation::fold_sizes;
///
/// assert_eq!(fold_sizes(11, 3), vec![4, 4, 3]);
/// ```
pub fn fold_sizes(n_samples: usize, folds: usize) -> Vec<usize> {
    if folds == 0 {
        return Vec::new();
    }
    let base = n_samples / folds;
    let extra = n_samples % folds;
    (0..folds).map(|i| base + usize::from(i < extra)).collect()
}

/// Cross-validate a `MultinomialNaiveBayes(alpha)` on `(x, y)`.
///
/// `folds` must lie in `[2, n_samples]`.
pub fn k_fold_cross_validate(
    x: &FeatureMatrix,
    y: &[usize],
    alpha: f64,
    folds: usize,
    seed: u64,
) -> Result<CrossValidationResult> {
    let n_samples = x.n_rows();
    if y.len() != n_samples {
        return Err(UjaranError::input(format!(
            "feature matrix has {n_samples} rows but {} labels were given",
            y.len()
        )));
    }
    if folds < 2 || folds > n_samples {
        return Err(UjaranError::invalid_config(format!(
            "folds must lie in [2, {n_samples}], got {folds}"
        )));
    }

    let mut permutation: Vec<usize> = (0..n_samples).collect();
    permutation.shuffle(&mut StdRng::seed_from_u64(seed));

    let sizes = fold_sizes(n_samples, folds);
    let mut bounds = Vec::with_capacity(folds);
    let mut start = 0;
    for size in &sizes {
        bounds.push((start, start + size));
        start += size;
    }

    let fold_accuracies = bounds
        .par_iter()
        .map(|&(start, end)| {
            let held_out = &permutation[start..end];
            let train: Vec<usize> = permutation[..start]
                .iter()
                .chain(&permutation[end..])
                .copied()
                .collect();

            let x_train = x.select_rows(&train);
            let y_train: Vec<usize> = train.iter().map(|&i| y[i]).collect();
            let x_val = x.select_rows(held_out);
            let y_val: Vec<usize> = held_out.iter().map(|&i| y[i]).collect();

            let mut model = MultinomialNaiveBayes::new(alpha)?;
            model.fit(&x_train, &y_train)?;
            accuracy(&y_val, &model.predict(&x_val)?)
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(CrossValidationResult {
        fold_accuracies,
        fold_sizes: sizes,
    })
}
