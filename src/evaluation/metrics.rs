//! Classification metrics for multi-class label vectors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};

/// Averaging strategy for multi-class precision, recall and F1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Sum true positives, false positives and false negatives over all
    /// classes before dividing.
    Micro,
    /// Compute each class's ratio, then take the unweighted mean.
    Macro,
}

fn check_lengths(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(UjaranError::input(format!(
            "y_true has {} labels but y_pred has {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(UjaranError::input("cannot score an empty label vector"));
    }
    Ok(())
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    ratio(2.0 * precision * recall, precision + recall)
}

/// Fraction of predictions equal to the true label.
///
/// # Examples
///
/// ```
/// use ujaran::evaluation::accuracy;
///
/// let acc = accuracy(&[0, 1, 2, 0], &[0, 2, 2, 0]).unwrap();
/// assert!((acc - 0.75).abs() < 1e-12);
/// ```
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// A square confusion matrix; `counts[i][j]` is the number of samples whose
/// true label is `labels[i]` and predicted label is `labels[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<usize>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Row/column labels.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Raw counts.
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    /// Count for a `(true, predicted)` pair of row/column indices.
    pub fn get(&self, true_index: usize, pred_index: usize) -> usize {
        self.counts[true_index][pred_index]
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// True positives of class index `k`.
    pub fn true_positives(&self, k: usize) -> usize {
        self.counts[k][k]
    }

    /// False positives of class index `k` (predicted `k`, true label differs).
    pub fn false_positives(&self, k: usize) -> usize {
        self.counts.iter().map(|row| row[k]).sum::<usize>() - self.counts[k][k]
    }

    /// False negatives of class index `k` (true `k`, predicted otherwise).
    pub fn false_negatives(&self, k: usize) -> usize {
        self.counts[k].iter().sum::<usize>() - self.counts[k][k]
    }
}

/// Build a confusion matrix.
///
/// `labels` defaults to the sorted union of the observed true and predicted
/// labels. A label outside an explicit `labels` list is an input error.
pub fn confusion_matrix(
    y_true: &[usize],
    y_pred: &[usize],
    labels: Option<&[usize]>,
) -> Result<ConfusionMatrix> {
    check_lengths(y_true, y_pred)?;

    let labels: Vec<usize> = match labels {
        Some(labels) => labels.to_vec(),
        None => y_true
            .iter()
            .chain(y_pred)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let index_of = |label: usize| {
        labels
            .iter()
            .position(|l| *l == label)
            .ok_or_else(|| UjaranError::input(format!("label {label} is not in {labels:?}")))
    };

    let mut counts = vec![vec![0usize; labels.len()]; labels.len()];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        counts[index_of(t)?][index_of(p)?] += 1;
    }

    Ok(ConfusionMatrix { labels, counts })
}

/// Precision, recall and F1 of one averaging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallF1 {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Precision, recall and F1 over the observed labels.
///
/// Any ratio with a zero denominator is 0.
pub fn precision_recall_f1(
    y_true: &[usize],
    y_pred: &[usize],
    average: Average,
) -> Result<PrecisionRecallF1> {
    let cm = confusion_matrix(y_true, y_pred, None)?;
    let n_labels = cm.labels().len();

    let tp: Vec<f64> = (0..n_labels).map(|k| cm.true_positives(k) as f64).collect();
    let fp: Vec<f64> = (0..n_labels).map(|k| cm.false_positives(k) as f64).collect();
    let fn_: Vec<f64> = (0..n_labels).map(|k| cm.false_negatives(k) as f64).collect();

    let scores = match average {
        Average::Micro => {
            let tp_sum: f64 = tp.iter().sum();
            let precision = ratio(tp_sum, tp_sum + fp.iter().sum::<f64>());
            let recall = ratio(tp_sum, tp_sum + fn_.iter().sum::<f64>());
            PrecisionRecallF1 {
                precision,
                recall,
                f1: harmonic_mean(precision, recall),
            }
        }
        Average::Macro => {
            let mut precision = 0.0;
            let mut recall = 0.0;
            let mut f1 = 0.0;
            for k in 0..n_labels {
                let p = ratio(tp[k], tp[k] + fp[k]);
                let r = ratio(tp[k], tp[k] + fn_[k]);
                precision += p;
                recall += r;
                f1 += harmonic_mean(p, r);
            }
            let n = n_labels as f64;
            PrecisionRecallF1 {
                precision: precision / n,
                recall: recall / n,
                f1: f1 / n,
            }
        }
    };

    Ok(scores)
}

/// Area under a ROC curve sampled at fixed thresholds, by the trapezoid rule.
fn threshold_grid_auc(positive: &[bool], scores: &[f64], n_thresholds: usize) -> f64 {
    let n_pos = positive.iter().filter(|p| **p).count() as f64;
    let n_neg = positive.len() as f64 - n_pos;

    let mut points: Vec<(f64, f64)> = (0..n_thresholds)
        .map(|i| {
            let threshold = i as f64 / (n_thresholds - 1) as f64;
            let mut tp = 0usize;
            let mut fp = 0usize;
            for (&is_positive, &score) in positive.iter().zip(scores) {
                if score >= threshold {
                    if is_positive {
                        tp += 1;
                    } else {
                        fp += 1;
                    }
                }
            }
            (ratio(fp as f64, n_neg), ratio(tp as f64, n_pos))
        })
        .collect();

    points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .sum()
}

/// Mean one-vs-rest AUC over the classes that occur in `y_true`.
///
/// `proba[i][k]` is the probability of `classes[k]` for sample `i`. Each
/// class's ROC curve is sampled at `n_thresholds` evenly spaced thresholds
/// in `[0, 1]` and integrated with the trapezoid rule, so the result is an
/// approximation of the rank-based AUC.
pub fn one_vs_rest_auc(
    y_true: &[usize],
    proba: &[Vec<f64>],
    classes: &[usize],
    n_thresholds: usize,
) -> Result<f64> {
    if n_thresholds < 2 {
        return Err(UjaranError::invalid_config(format!(
            "at least 2 AUC thresholds are required, got {n_thresholds}"
        )));
    }
    if y_true.len() != proba.len() {
        return Err(UjaranError::input(format!(
            "y_true has {} labels but proba has {} rows",
            y_true.len(),
            proba.len()
        )));
    }
    if let Some(row) = proba.iter().find(|row| row.len() != classes.len()) {
        return Err(UjaranError::dimension(classes.len(), row.len()));
    }

    let present: BTreeSet<usize> = y_true.iter().copied().collect();
    let aucs: Vec<f64> = classes
        .iter()
        .enumerate()
        .filter(|(_, class)| present.contains(*class))
        .map(|(k, class)| {
            let positive: Vec<bool> = y_true.iter().map(|y| y == class).collect();
            let scores: Vec<f64> = proba.iter().map(|row| row[k]).collect();
            threshold_grid_auc(&positive, &scores, n_thresholds)
        })
        .collect();

    if aucs.is_empty() {
        return Err(UjaranError::input(
            "none of the true labels is a known class; AUC is undefined",
        ));
    }
    Ok(aucs.iter().sum::<f64>() / aucs.len() as f64)
}
