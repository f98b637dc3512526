//! End-to-end training: dataset in, [`TrainedModel`] out.
//!
//! ```text
//! Dataset → clean + tokenize → spelling tables → finish preprocessing
//!         → stratified split → TF-IDF (fit on train) → Naive Bayes
//!         → train/test metrics + k-fold CV → ModelArtifact
//! ```
//!
//! Training is a pure function of the dataset and the configuration. It
//! never touches the filesystem; persisting the artifact is up to the
//! caller.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::analysis::Preprocessor;
use crate::config::TrainingConfig;
use crate::dataset::Dataset;
use crate::error::{Result, UjaranError};
use crate::evaluation::{
    Average, CrossValidationResult, accuracy, k_fold_cross_validate, one_vs_rest_auc,
    precision_recall_f1, stratified_split_indices,
};
use crate::ml::matrix::FeatureMatrix;
use crate::ml::naive_bayes::MultinomialNaiveBayes;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::model::artifact::{CvMetrics, Metrics, ModelArtifact};
use crate::model::label::{map_target, reverse_map};
use crate::model::predictor::{Prediction, Predictor};
use crate::spelling::SpellingDictionary;

/// A freshly trained model: the portable artifact plus live components
/// that can predict without a reload.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    artifact: ModelArtifact,
    predictor: Predictor,
    cross_validation: CrossValidationResult,
}

impl TrainedModel {
    /// The portable artifact.
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Consume the model, keeping only the artifact.
    pub fn into_artifact(self) -> ModelArtifact {
        self.artifact
    }

    /// The live predictor.
    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Per-fold cross-validation results.
    pub fn cross_validation(&self) -> &CrossValidationResult {
        &self.cross_validation
    }

    /// Classify one text.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        self.predictor.predict(text)
    }
}

/// Trains hate speech classifiers.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// Create a trainer, validating the configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Trainer { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the whole training pipeline.
    pub fn train(&self, dataset: &Dataset) -> Result<TrainedModel> {
        let config = &self.config;
        let started = Instant::now();

        if dataset.is_empty() {
            return Err(UjaranError::input("cannot train on an empty dataset"));
        }
        info!(
            "Training on {} documents ({} rows before cleaning)",
            dataset.len(),
            dataset.total_rows()
        );
        debug!("Class counts: {:?}", dataset.class_counts());

        // Clean and tokenize
        let base = Preprocessor::new();
        let tokenized = dataset
            .records()
            .par_iter()
            .map(|record| base.tokenize(&record.text))
            .collect::<Result<Vec<Vec<String>>>>()?;

        // Spelling tables come from the tokenized corpus
        let (dictionary, preprocessor) = if config.spelling_correction {
            let dictionary = Arc::new(SpellingDictionary::from_corpus(
                &tokenized,
                config.min_word_count,
            ));
            debug!(
                "Spelling vocabulary: {} of {} distinct words",
                dictionary.vocabulary().len(),
                dictionary.word_freq().len()
            );
            let preprocessor =
                Preprocessor::with_dictionary(dictionary.clone(), config.corrector_config());
            (dictionary, preprocessor)
        } else {
            (Arc::new(SpellingDictionary::default()), base.clone())
        };

        info!("Preprocessing: {}", preprocessor.stages().join(" → "));
        let documents = tokenized
            .into_par_iter()
            .map(|tokens| preprocessor.finish(tokens))
            .collect::<Result<Vec<Vec<String>>>>()?;

        let empty = documents.iter().filter(|d| d.is_empty()).count();
        if empty > 0 {
            warn!("{empty} documents have no tokens left after preprocessing");
        }

        // Split
        let labels = dataset.label_ids();
        let (train_idx, test_idx) =
            stratified_split_indices(&labels, config.train_fraction, config.seed)?;
        if train_idx.is_empty() || test_idx.is_empty() {
            return Err(UjaranError::input(format!(
                "dataset too small to split: {} training and {} testing documents",
                train_idx.len(),
                test_idx.len()
            )));
        }
        let train_docs: Vec<Vec<String>> =
            train_idx.iter().map(|&i| documents[i].clone()).collect();
        let test_docs: Vec<Vec<String>> = test_idx.iter().map(|&i| documents[i].clone()).collect();
        let y_train: Vec<usize> = train_idx.iter().map(|&i| labels[i]).collect();
        let y_test: Vec<usize> = test_idx.iter().map(|&i| labels[i]).collect();
        info!(
            "Split: {} training, {} testing documents",
            y_train.len(),
            y_test.len()
        );

        // Vectorize; the vectorizer only ever sees the training split
        let mut vectorizer = TfIdfVectorizer::new(config.max_features);
        let x_train = vectorizer.fit_transform(&train_docs)?;
        let x_test = vectorizer.transform(&test_docs)?;
        debug!("Vectorizer: {} features", vectorizer.n_features());

        // Fit
        let mut model = MultinomialNaiveBayes::new(config.alpha)?;
        model.fit(&x_train, &y_train)?;
        debug!("Classifier classes: {:?}", model.classes());

        // Evaluate
        let training_metrics = evaluate(&model, &x_train, &y_train, config.auc_thresholds)?;
        let testing_metrics = evaluate(&model, &x_test, &y_test, config.auc_thresholds)?;
        let cross_validation = k_fold_cross_validate(
            &x_train,
            &y_train,
            config.alpha,
            config.cv_folds,
            config.seed,
        )?;
        info!(
            "Training accuracy: {:.4}, testing accuracy: {:.4}",
            training_metrics.accuracy, testing_metrics.accuracy
        );
        info!(
            "Cross validation: {:.4} ± {:.4}",
            cross_validation.mean(),
            cross_validation.std()
        );

        let (vocab, word_freq) = if preprocessor.has_spelling_correction() {
            (
                dictionary.vocabulary().iter().cloned().collect(),
                dictionary.word_freq().clone(),
            )
        } else {
            (Vec::new(), Default::default())
        };

        let artifact = ModelArtifact {
            model: model.clone(),
            vectorizer: vectorizer.clone(),
            vocab,
            word_freq,
            max_edit_distance: config.max_edit_distance,
            map_target: map_target(),
            reverse: reverse_map(),
            training_accuracy: training_metrics.accuracy,
            testing_accuracy: testing_metrics.accuracy,
            train_size: y_train.len(),
            test_size: y_test.len(),
            total_data: dataset.total_rows(),
            train_ratio: config.train_fraction,
            test_ratio: config.test_fraction(),
            alpha: config.alpha,
            max_features: config.max_features,
            training_metrics,
            testing_metrics,
            cv_metrics: CvMetrics {
                accuracy: cross_validation.mean(),
                std: cross_validation.std(),
                fold_accuracies: cross_validation.fold_accuracies.clone(),
            },
        };
        artifact.validate()?;

        let predictor = Predictor::new(preprocessor, vectorizer, model, artifact.reverse.clone())?;
        info!("Training finished in {:.2?}", started.elapsed());

        Ok(TrainedModel {
            artifact,
            predictor,
            cross_validation,
        })
    }
}

/// Score a fitted classifier on one split.
fn evaluate(
    model: &MultinomialNaiveBayes,
    x: &FeatureMatrix,
    y: &[usize],
    auc_thresholds: usize,
) -> Result<Metrics> {
    let predicted = model.predict(x)?;
    let proba = model.predict_proba(x)?;
    let scores = precision_recall_f1(y, &predicted, Average::Micro)?;

    Ok(Metrics {
        accuracy: accuracy(y, &predicted)?,
        precision: scores.precision,
        recall: scores.recall,
        f1: scores.f1,
        auc: one_vs_rest_auc(y, &proba, model.classes(), auc_thresholds)?,
    })
}
