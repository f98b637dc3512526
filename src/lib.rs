//! # Ujaran
//!
//! A hate speech classifier for Indonesian social media text.
//!
//! ## Features
//!
//! - Social media text cleaning, slang normalization, stop words and stemming
//! - Spelling correction against a corpus-derived vocabulary
//! - TF-IDF features with an optional vocabulary cap
//! - Multinomial Naive Bayes with additive smoothing
//! - Stratified splitting, k-fold cross validation and one-vs-rest AUC
//! - A portable JSON model artifact for inference elsewhere
//!
//! ## Example
//!
//! ```no_run
//! use ujaran::dataset::Dataset;
//! use ujaran::config::TrainingConfig;
//! use ujaran::model::Trainer;
//!
//! # fn main() -> ujaran::error::Result<()> {
//! let dataset = Dataset::from_csv_path("data.csv")?;
//! let trained = Trainer::new(TrainingConfig::default())?.train(&dataset)?;
//! trained.artifact().write_json("model.json")?;
//! println!("{}", trained.predict("dasar kafir sesat")?.label);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod ml;
pub mod model;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
