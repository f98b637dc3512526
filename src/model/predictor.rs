//! Inference from a portable model artifact.
//!
//! A [`Predictor`] runs the training-time pipeline on new text: the same
//! preprocessing (with spelling correction when the artifact carries the
//! spelling tables), the exported vocabulary and idf weights, and the
//! exported classifier parameters.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::Preprocessor;
use crate::error::{Result, UjaranError};
use crate::ml::matrix::FeatureMatrix;
use crate::ml::naive_bayes::MultinomialNaiveBayes;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::model::artifact::ModelArtifact;
use crate::spelling::{CorrectorConfig, SpellingDictionary};

/// The outcome of classifying one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label name.
    pub label: String,
    /// Predicted class id.
    pub class: usize,
    /// Probability of every known label.
    pub proba: BTreeMap<String, f64>,
}

impl Prediction {
    /// Probability of the predicted label.
    pub fn confidence(&self) -> f64 {
        self.proba.get(&self.label).copied().unwrap_or(0.0)
    }
}

/// Classifies raw text with a trained model.
#[derive(Debug, Clone)]
pub struct Predictor {
    preprocessor: Preprocessor,
    vectorizer: TfIdfVectorizer,
    model: MultinomialNaiveBayes,
    reverse: BTreeMap<usize, String>,
}

impl Predictor {
    /// Assemble a predictor from live components.
    pub fn new(
        preprocessor: Preprocessor,
        vectorizer: TfIdfVectorizer,
        model: MultinomialNaiveBayes,
        reverse: BTreeMap<usize, String>,
    ) -> Result<Self> {
        if model.n_features() != vectorizer.n_features() {
            return Err(UjaranError::dimension(
                model.n_features(),
                vectorizer.n_features(),
            ));
        }
        if let Some(class) = model.classes().iter().find(|c| !reverse.contains_key(*c)) {
            return Err(UjaranError::artifact(format!(
                "class {class} has no label name"
            )));
        }
        Ok(Predictor {
            preprocessor,
            vectorizer,
            model,
            reverse,
        })
    }

    /// Rebuild a predictor from an exported artifact.
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self> {
        artifact.validate()?;

        let dictionary = SpellingDictionary::from_parts(
            artifact.vocab.iter().cloned(),
            artifact.word_freq.clone(),
        );
        let preprocessor = Preprocessor::with_dictionary(
            Arc::new(dictionary),
            CorrectorConfig {
                max_distance: artifact.max_edit_distance,
            },
        );

        Self::new(
            preprocessor,
            artifact.vectorizer.clone(),
            artifact.model.clone(),
            artifact.reverse.clone(),
        )
    }

    /// Read an artifact file and build a predictor from it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_artifact(&ModelArtifact::read_json(path)?)
    }

    /// Classify one text.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let tokens = self.preprocessor.preprocess(text)?;
        let row = FeatureMatrix::from_rows(
            vec![self.vectorizer.transform_one(&tokens)],
            self.vectorizer.n_features(),
        )?;

        let class = self.model.predict(&row)?[0];
        let proba_row = self.model.predict_proba(&row)?.remove(0);

        let proba = self
            .model
            .classes()
            .iter()
            .zip(proba_row)
            .map(|(c, p)| (self.label_name(*c), p))
            .collect();

        Ok(Prediction {
            label: self.label_name(class),
            class,
            proba,
        })
    }

    /// Classify many texts in parallel, preserving order.
    pub fn predict_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<Prediction>> {
        texts
            .par_iter()
            .map(|text| self.predict(text.as_ref()))
            .collect()
    }

    fn label_name(&self, class: usize) -> String {
        self.reverse
            .get(&class)
            .cloned()
            .unwrap_or_else(|| class.to_string())
    }

    /// The preprocessing pipeline.
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// The fitted classifier.
    pub fn model(&self) -> &MultinomialNaiveBayes {
        &self.model
    }
}
