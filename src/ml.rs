//! Feature extraction and classification.
//!
//! Token sequences become dense TF-IDF rows in a [`FeatureMatrix`], which a
//! [`MultinomialNaiveBayes`] classifier fits and scores.

pub mod matrix;
pub mod naive_bayes;
pub mod tfidf;

pub use matrix::FeatureMatrix;
pub use naive_bayes::MultinomialNaiveBayes;
pub use tfidf::TfIdfVectorizer;
