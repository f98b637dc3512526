//! TF-IDF vectorizer over preprocessed token sequences.
//!
//! `fit` learns a bounded vocabulary and inverse document frequencies:
//!
//! ```text
//! idf[t] = ln((N + 1) / (df[t] + 1)) + 1
//! ```
//!
//! where `N` is the number of fitted documents and `df[t]` the number of
//! documents containing `t`. The `+1` terms keep every weight strictly
//! positive. `transform` weights raw in-vocabulary counts by the document's
//! token length and multiplies by `idf`; unseen terms are ignored.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};
use crate::ml::matrix::FeatureMatrix;

/// TF-IDF vectorizer for text feature extraction.
///
/// With a `max_features` cap the vocabulary keeps the most frequent terms by
/// total occurrence count; equal counts are ordered lexicographically and
/// column order follows that ranking. Without a cap every observed term is
/// kept in first-seen order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index.
    vocab: BTreeMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Term of each column.
    feature_names: Vec<String>,
    /// Number of columns.
    n_features: usize,
    /// Vocabulary cap.
    max_features: Option<usize>,
    #[serde(skip)]
    n_documents: usize,
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(max_features: Option<usize>) -> Self {
        TfIdfVectorizer {
            max_features,
            ..Default::default()
        }
    }

    /// Rebuild a fitted vectorizer from exported state.
    ///
    /// `feature_names[i]` is the term of column `i`.
    pub fn from_parts(
        feature_names: Vec<String>,
        idf: Vec<f64>,
        max_features: Option<usize>,
    ) -> Result<Self> {
        let vocab = feature_names
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        let vectorizer = TfIdfVectorizer {
            vocab,
            n_features: feature_names.len(),
            idf,
            feature_names,
            max_features,
            n_documents: 0,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Fit the vocabulary and idf weights on tokenized documents.
    ///
    /// Documents without tokens count towards `N` but contribute no terms.
    pub fn fit(&mut self, documents: &[Vec<String>]) -> Result<()> {
        if documents.is_empty() {
            return Err(UjaranError::input("cannot fit a vectorizer on zero documents"));
        }
        if self.max_features == Some(0) {
            return Err(UjaranError::invalid_config("max_features must be at least 1"));
        }

        let mut seen_order: Vec<&str> = Vec::new();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for document in documents {
            let mut unique: HashSet<&str> = HashSet::new();
            for term in document {
                let count = term_freq.entry(term.as_str()).or_insert_with(|| {
                    seen_order.push(term.as_str());
                    0
                });
                *count += 1;
                unique.insert(term.as_str());
            }
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if seen_order.is_empty() {
            return Err(UjaranError::input(
                "no terms left after preprocessing; cannot build a vocabulary",
            ));
        }

        let terms: Vec<&str> = match self.max_features {
            None => seen_order,
            Some(cap) => {
                let mut ranked = seen_order;
                ranked.sort_by(|a, b| term_freq[b].cmp(&term_freq[a]).then_with(|| a.cmp(b)));
                ranked.truncate(cap);
                ranked
            }
        };

        let n = documents.len() as f64;
        self.idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((n + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();
        self.feature_names = terms.iter().map(|t| t.to_string()).collect();
        self.vocab = self
            .feature_names
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        self.n_features = self.feature_names.len();
        self.n_documents = documents.len();

        Ok(())
    }

    /// Transform one tokenized document into a feature row.
    pub fn transform_one(&self, document: &[String]) -> Vec<f64> {
        let mut row = vec![0.0; self.n_features];
        if document.is_empty() {
            return row;
        }

        for term in document {
            if let Some(&index) = self.vocab.get(term) {
                row[index] += 1.0;
            }
        }

        let doc_length = document.len() as f64;
        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value = *value / doc_length * idf;
        }
        row
    }

    /// Transform tokenized documents into a feature matrix.
    pub fn transform(&self, documents: &[Vec<String>]) -> Result<FeatureMatrix> {
        let rows = documents.iter().map(|doc| self.transform_one(doc)).collect();
        FeatureMatrix::from_rows(rows, self.n_features)
    }

    /// Fit on `documents` and transform them.
    pub fn fit_transform(&mut self, documents: &[Vec<String>]) -> Result<FeatureMatrix> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Check the internal consistency of fitted state.
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.n_features {
            return Err(UjaranError::artifact(format!(
                "vectorizer has {} idf weights for {} features",
                self.idf.len(),
                self.n_features
            )));
        }
        if self.feature_names.len() != self.n_features || self.vocab.len() != self.n_features {
            return Err(UjaranError::artifact(format!(
                "vectorizer vocabulary size {} and feature names {} disagree with n_features {}",
                self.vocab.len(),
                self.feature_names.len(),
                self.n_features
            )));
        }
        for (term, &index) in &self.vocab {
            if self.feature_names.get(index) != Some(term) {
                return Err(UjaranError::artifact(format!(
                    "vocabulary index {index} of {term:?} is not a contiguous column"
                )));
            }
        }
        if let Some(bad) = self.idf.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(UjaranError::artifact(format!(
                "idf weights must be finite and positive, found {bad}"
            )));
        }
        if let Some(cap) = self.max_features {
            if self.n_features > cap {
                return Err(UjaranError::artifact(format!(
                    "vectorizer has {} features but max_features is {cap}",
                    self.n_features
                )));
            }
        }
        Ok(())
    }

    /// Check whether `fit` has run (or state was restored).
    pub fn is_fitted(&self) -> bool {
        self.n_features > 0
    }

    /// Term -> column index.
    pub fn vocab(&self) -> &BTreeMap<String, usize> {
        &self.vocab
    }

    /// Inverse document frequencies, by column.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Term of each column.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of columns.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// The vocabulary cap.
    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    /// Number of documents seen by the last `fit` (zero for restored state).
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
