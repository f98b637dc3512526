//! Spelling correction against a corpus-derived vocabulary.
//!
//! The vocabulary is built from the training corpus itself: every word seen at
//! least `min_count` times is considered correctly spelled, and any other word
//! is replaced by its nearest vocabulary neighbour by edit distance.

pub mod corrector;
pub mod dictionary;
pub mod levenshtein;

pub use corrector::{CorrectorConfig, SpellingCorrector, correct_word};
pub use dictionary::{SpellingDictionary, vocabulary, word_frequency};
pub use levenshtein::{levenshtein_distance, levenshtein_distance_threshold};
