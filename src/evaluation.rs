//! Model evaluation: stratified splitting, classification metrics and
//! k-fold cross validation.

pub mod cross_validation;
pub mod metrics;
pub mod split;

pub use cross_validation::{CrossValidationResult, fold_sizes, k_fold_cross_validate};
pub use metrics::{
    Average, ConfusionMatrix, PrecisionRecallF1, accuracy, confusion_matrix, one_vs_rest_auc,
    precision_recall_f1,
};
pub use split::{stratified_split, stratified_split_indices};
